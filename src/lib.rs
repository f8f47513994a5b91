//! redirect_status library: redirect generation and verification.
//!
//! Reads `(source, destination)` redirect mappings and either renders them
//! into a target configuration format (Apache rewrite rules, Drupal
//! redirect-table inserts) or verifies each mapping against a live site
//! with one HTTP request per rule.
//!
//! # Example
//!
//! ```no_run
//! use redirect_status::{generate, GenerateOptions, RedirectRule};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut rules = vec![RedirectRule::new("https://example.com/old", "/new")];
//! let output = generate(&mut rules, &GenerateOptions::default())?;
//! println!("{output}");
//! # Ok(())
//! # }
//! ```
//!
//! Verification requires a Tokio runtime; use `#[tokio::main]` in your
//! application or call the async entry points from an async context.

pub mod config;
mod error_handling;
pub mod generators;
mod headers;
pub mod initialization;
mod models;
mod parse;
mod url_util;
pub mod verify;

// Re-export public API
pub use config::Config;
pub use error_handling::{ConfigError, UrlParseError};
pub use generators::{generate, GenerateOptions, Generator};
pub use headers::{parse_headers, HeaderMap};
pub use models::{preprocess, RedirectRule, RuleOptions};
pub use parse::{parse_input_line, read_rules};
pub use run::run;
pub use url_util::{is_absolute_url, parse_url, ParsedUrl};
pub use verify::{run_verification, Outcome, TestOptions, VerificationReport};

// Internal run module (wires standard input to the two pipelines)
mod run {
    use anyhow::{Context, Result};
    use log::info;
    use regex::Regex;
    use tokio::io::BufReader;

    use crate::config::Config;
    use crate::error_handling::ConfigError;
    use crate::generators::{generate, GenerateOptions};
    use crate::initialization::init_client;
    use crate::parse::read_rules;
    use crate::verify::{run_verification, TestOptions};

    /// Reads rules from standard input, runs the configured mode and
    /// returns the text to print.
    ///
    /// # Errors
    ///
    /// Returns an error on configuration problems (bad separator pattern,
    /// missing base URL for a relative rule), malformed rule URLs, or a
    /// failure to read standard input. Per-rule verification findings are
    /// not errors; they are part of the returned transcript.
    pub async fn run(config: Config) -> Result<String> {
        let separator =
            Regex::new(&config.separator).map_err(ConfigError::InvalidSeparator)?;

        let stdin = BufReader::new(tokio::io::stdin());
        let mut rules = read_rules(stdin, &separator)
            .await
            .context("Failed to read redirects from standard input")?;

        info!("Read {} redirect rule(s)", rules.len());

        if config.test {
            let client = init_client().context("Failed to initialize HTTP client")?;
            let options = TestOptions {
                base_url: config.base_url.clone(),
                follow: config.follow,
            };

            let report = run_verification(&client, &mut rules, &options).await?;
            Ok(report.render())
        } else {
            let options = GenerateOptions {
                generator: config.generator,
                indent: Some(config.indent.clone()),
                db_prefix: Some(config.db_prefix.clone()),
            };

            Ok(generate(&mut rules, &options)?)
        }
    }
}
