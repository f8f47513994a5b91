//! Error taxonomy for configuration and input problems.
//!
//! Verification findings (mismatches, unexpected statuses, transport
//! failures) are not errors of the tool itself; they live in
//! [`crate::verify::Outcome`]. The types here are the fatal kind: the run
//! aborts before producing any output.

use thiserror::Error;

/// Configuration problems that stop a run before any work is done.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A `--generator` name that is not in the registry.
    #[error("unknown generator '{name}' (choose from: {available})")]
    UnknownGenerator {
        /// The name that failed to resolve.
        name: String,
        /// Comma-separated list of registered generator names.
        available: String,
    },

    /// A `--base_url` value without a scheme or host.
    #[error("base url '{0}' is not an absolute url")]
    InvalidBaseUrl(String),

    /// A root-relative source or destination with no `--base_url` to
    /// resolve it against.
    #[error("'{0}' is root-relative and no --base_url was given")]
    MissingBaseUrl(String),

    /// A `--separator` value that does not compile as a regular expression.
    #[error("invalid separator pattern: {0}")]
    InvalidSeparator(#[from] regex::Error),
}

/// A rule URL the parser could not make sense of.
///
/// Root-relative inputs are not errors; this only fires on genuinely
/// malformed URLs.
#[derive(Error, Debug)]
#[error("malformed url '{url}': {source}")]
pub struct UrlParseError {
    /// The offending input.
    pub url: String,
    /// The underlying parse failure.
    #[source]
    pub source: url::ParseError,
}
