//! Redirect rule model and normalization.

use crate::config::DEFAULT_STATUS_CODE;
use crate::error_handling::UrlParseError;
use crate::url_util::{parse_url, ParsedUrl};

/// One source → destination mapping read from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectRule {
    pub source: String,
    pub destination: String,
    /// Decomposed source URL, computed once by [`preprocess`].
    pub parsed_source: Option<ParsedUrl>,
    pub options: RuleOptions,
}

/// Per-rule options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleOptions {
    /// Status code used when rewriting. [`preprocess`] fills in
    /// [`DEFAULT_STATUS_CODE`] when unset and never overwrites an explicit
    /// value.
    pub code: Option<String>,
}

impl RedirectRule {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        RedirectRule {
            source: source.into(),
            destination: destination.into(),
            parsed_source: None,
            options: RuleOptions::default(),
        }
    }
}

/// Normalizes raw rules in place: computes `parsed_source` where absent and
/// fills in the default status code. Already-populated fields are left
/// untouched, so running this twice is a no-op.
pub fn preprocess(rules: &mut [RedirectRule]) -> Result<(), UrlParseError> {
    for rule in rules.iter_mut() {
        if rule.parsed_source.is_none() {
            rule.parsed_source = Some(parse_url(&rule.source)?);
        }

        if rule.options.code.is_none() {
            rule.options.code = Some(DEFAULT_STATUS_CODE.to_string());
        }
    }

    Ok(())
}
