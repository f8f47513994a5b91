//! Redirect verification engine.
//!
//! Issues one request per rule, strictly in input order, and classifies
//! what came back. Two variants exist: the default inspects a single
//! response head without following redirects; `follow` walks the redirect
//! chain manually and classifies the landing point.

use anyhow::Result;
use log::{debug, warn};
use reqwest::Url;

use crate::config::{MAX_REDIRECT_HOPS, REDIRECT_STATUSES};
use crate::error_handling::ConfigError;
use crate::headers::{parse_headers, HeaderMap};
use crate::models::{preprocess, RedirectRule};

/// Options for a verification run.
#[derive(Debug, Clone, Default)]
pub struct TestOptions {
    /// Absolute URL prefixed to root-relative sources and destinations.
    pub base_url: Option<String>,
    /// Follow the redirect chain and compare the final URL instead of
    /// inspecting a single response.
    pub follow: bool,
}

/// Classification of one verification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The source redirected exactly where it was expected to.
    Match,
    /// The source redirected, but somewhere else.
    Mismatch { actual: String },
    /// The source answered with a status that is neither a redirect nor 200.
    UnexpectedStatus { code: u16 },
    /// The request never produced a response (DNS, connect, TLS, ...).
    TransportError { message: String },
}

impl Outcome {
    /// Whether this outcome counts toward the error tally.
    pub fn is_error(&self) -> bool {
        !matches!(self, Outcome::Match)
    }
}

/// Result for one rule: the effective URLs that were checked and the
/// outcome, if any.
///
/// `None` is the single-response variant's silent success: a plain 200
/// that never redirected is not a finding in that variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleResult {
    pub source: String,
    pub destination: String,
    pub outcome: Option<Outcome>,
}

/// Aggregated verification results, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReport {
    pub results: Vec<RuleResult>,
    pub errors_count: usize,
    pub total: usize,
}

impl VerificationReport {
    /// Renders the human-readable transcript plus the trailing error
    /// summary.
    pub fn render(&self) -> String {
        let mut output = Vec::new();

        for result in &self.results {
            output.push(format!(
                "Does {} go to {}?",
                result.source, result.destination
            ));

            match &result.outcome {
                Some(Outcome::Match) => output.push("Yes".to_string()),
                Some(Outcome::Mismatch { actual }) => {
                    output.push(format!("No, {} goes to {}", result.source, actual));
                }
                Some(Outcome::UnexpectedStatus { code }) => {
                    output.push(format!("No, {} returns {}", result.source, code));
                }
                Some(Outcome::TransportError { message }) => {
                    output.push(format!("Error: {message}"));
                }
                None => {}
            }

            output.push(String::new());
        }

        output.push(format!("Errors: {} / {}", self.errors_count, self.total));
        output.join("\n")
    }
}

/// Resolves a rule's effective source and destination.
///
/// A root-relative source is prefixed with the base URL. A root-relative
/// destination is prefixed with the source's own scheme and host when the
/// parsed source carries one, falling back to the base URL otherwise.
/// Needing a base URL without having one is a configuration error.
pub fn resolve_effective(
    rule: &RedirectRule,
    base_url: Option<&str>,
) -> Result<(String, String), ConfigError> {
    let source = if rule.source.starts_with('/') {
        let base = base_url.ok_or_else(|| ConfigError::MissingBaseUrl(rule.source.clone()))?;
        format!("{base}{}", rule.source)
    } else {
        rule.source.clone()
    };

    let destination = if rule.destination.starts_with('/') {
        let parsed = rule.parsed_source.as_ref();
        match parsed.and_then(|parsed| parsed.host.as_deref()) {
            Some(host) => {
                let scheme = parsed
                    .and_then(|parsed| parsed.scheme.as_deref())
                    .unwrap_or("http");
                format!("{scheme}://{host}{}", rule.destination)
            }
            None => {
                let base = base_url
                    .ok_or_else(|| ConfigError::MissingBaseUrl(rule.destination.clone()))?;
                format!("{base}{}", rule.destination)
            }
        }
    } else {
        rule.destination.clone()
    };

    Ok((source, destination))
}

/// Classifies a single, unfollowed response against the expected
/// destination.
///
/// Returns `None` for a plain 200: in this variant a page that answers
/// directly without redirecting is not a finding.
pub fn classify_response(
    status: u16,
    headers: &HeaderMap,
    destination: &str,
) -> Option<Outcome> {
    if REDIRECT_STATUSES.contains(&status) {
        let location = headers.first("location").unwrap_or_default();
        if location == destination {
            Some(Outcome::Match)
        } else {
            Some(Outcome::Mismatch {
                actual: location.to_string(),
            })
        }
    } else if status != 200 {
        Some(Outcome::UnexpectedStatus { code: status })
    } else {
        None
    }
}

/// Classifies where a followed redirect chain landed.
///
/// Unlike the single-response variant, a 200 on the wrong URL is a
/// mismatch here: the chain was supposed to end at the destination.
pub fn classify_final_url(final_url: &str, status: u16, destination: &str) -> Outcome {
    if final_url == destination {
        Outcome::Match
    } else if status != 200 {
        Outcome::UnexpectedStatus { code: status }
    } else {
        Outcome::Mismatch {
            actual: final_url.to_string(),
        }
    }
}

/// Where a followed redirect chain ended up.
#[derive(Debug, Clone)]
pub struct RedirectChain {
    pub final_url: String,
    pub final_status: u16,
    pub hops: Vec<String>,
}

/// Follows the redirect chain for a URL, up to `max_hops` hops.
///
/// The client has redirect following disabled, so each hop is requested
/// and inspected manually. Relative `Location` values are resolved against
/// the URL that produced them.
pub async fn resolve_redirect_chain(
    client: &reqwest::Client,
    start_url: &str,
    max_hops: usize,
) -> Result<RedirectChain> {
    let mut hops: Vec<String> = Vec::new();
    let mut current = start_url.to_string();
    let mut final_status = 0;

    for _ in 0..max_hops {
        hops.push(current.clone());
        let resp = client.get(&current).send().await?;
        final_status = resp.status().as_u16();

        if !REDIRECT_STATUSES.contains(&final_status) {
            break;
        }

        match resp.headers().get(reqwest::header::LOCATION) {
            Some(location) => {
                let location = location.to_str().unwrap_or("").to_string();
                let next = Url::parse(&location)
                    .or_else(|_| Url::parse(&current).and_then(|base| base.join(&location)))?;
                current = next.to_string();
            }
            None => {
                warn!("Redirect status {final_status} for {current} but no Location header");
                break;
            }
        }
    }

    Ok(RedirectChain {
        final_url: current,
        final_status,
        hops,
    })
}

/// Verifies every rule in input order and aggregates the outcomes.
///
/// Effective URLs are resolved for all rules before the first request, so
/// a configuration problem (a relative rule with no base URL) aborts the
/// run without producing partial results. Rules are checked sequentially
/// with no retries; a rule's state is terminal on first classification.
pub async fn run_verification(
    client: &reqwest::Client,
    rules: &mut [RedirectRule],
    options: &TestOptions,
) -> Result<VerificationReport> {
    preprocess(rules)?;

    let targets = rules
        .iter()
        .map(|rule| resolve_effective(rule, options.base_url.as_deref()))
        .collect::<Result<Vec<_>, _>>()?;

    let mut results = Vec::with_capacity(targets.len());
    let mut errors_count = 0;

    for (source, destination) in targets {
        debug!("Checking {source} -> {destination}");

        let outcome = if options.follow {
            check_followed(client, &source, &destination).await
        } else {
            check_single(client, &source, &destination).await
        };

        if outcome.as_ref().is_some_and(Outcome::is_error) {
            errors_count += 1;
        }

        results.push(RuleResult {
            source,
            destination,
            outcome,
        });
    }

    Ok(VerificationReport {
        total: results.len(),
        errors_count,
        results,
    })
}

async fn check_single(
    client: &reqwest::Client,
    source: &str,
    destination: &str,
) -> Option<Outcome> {
    match fetch_response_head(client, source).await {
        Ok((status, headers)) => classify_response(status, &headers, destination),
        Err(e) => Some(Outcome::TransportError {
            message: e.to_string(),
        }),
    }
}

async fn check_followed(
    client: &reqwest::Client,
    source: &str,
    destination: &str,
) -> Option<Outcome> {
    match resolve_redirect_chain(client, source, MAX_REDIRECT_HOPS).await {
        Ok(chain) => {
            debug!("{} hop(s) from {source}: {:?}", chain.hops.len(), chain.hops);
            Some(classify_final_url(
                &chain.final_url,
                chain.final_status,
                destination,
            ))
        }
        Err(e) => Some(Outcome::TransportError {
            message: e.to_string(),
        }),
    }
}

/// Fetches one response, without following redirects, and parses its head.
async fn fetch_response_head(
    client: &reqwest::Client,
    url: &str,
) -> Result<(u16, HeaderMap), reqwest::Error> {
    let resp = client.get(url).send().await?;
    let status = resp.status().as_u16();
    Ok((status, parse_headers(&response_head(&resp))))
}

/// Renders a response's status line and headers back into the textual head
/// form [`parse_headers`] consumes, so live responses and recorded heads
/// classify through the same path.
fn response_head(resp: &reqwest::Response) -> String {
    let status = resp.status();
    let mut head = format!(
        "HTTP/1.1 {} {}\r\n",
        status.as_u16(),
        status.canonical_reason().unwrap_or("")
    );

    for (name, value) in resp.headers() {
        head.push_str(name.as_str());
        head.push_str(": ");
        head.push_str(value.to_str().unwrap_or(""));
        head.push_str("\r\n");
    }

    head
}
