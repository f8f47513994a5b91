//! Command-line options and process-wide constants.

use clap::{Parser, ValueEnum};

use crate::error_handling::ConfigError;
use crate::generators::Generator;
use crate::url_util::is_absolute_url;

// constants (used as defaults)

/// Status code applied to rules that do not specify one.
pub const DEFAULT_STATUS_CODE: &str = "301";

/// Status codes treated as redirects when classifying a response.
pub const REDIRECT_STATUSES: [u16; 4] = [301, 302, 303, 307];

/// Maximum number of redirect hops followed in `--follow` mode.
/// Prevents infinite redirect loops and excessive request chains.
pub const MAX_REDIRECT_HOPS: usize = 10;

/// Input field separator used when `--separator` is not given: one tab.
pub const DEFAULT_SEPARATOR: &str = "\t";

/// Indent applied to generated rule bodies when none is configured.
pub const DEFAULT_INDENT: &str = "\t";

/// Default User-Agent string for verification requests.
///
/// Uses a generic Chrome-like string without a specific version number to
/// avoid becoming outdated. Some sites answer redirects differently (or
/// not at all) to obvious non-browser agents.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to
/// most verbose (Trace). Used with the `--log-level` CLI option.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: human-readable format (default)
/// - `Json`: one JSON object per line, for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    Plain,
    Json,
}

/// Command-line options and configuration.
///
/// This struct is generated by `clap` from the field attributes. Redirect
/// mappings themselves arrive on standard input, one `source<sep>dest`
/// line at a time.
///
/// # Examples
///
/// ```bash
/// # Render Apache rewrite rules
/// cat site_redirects.txt | redirect_status
///
/// # Render Drupal insert statements with a table prefix
/// cat site_redirects.txt | redirect_status --generator=drupal --db_prefix=d7_
///
/// # Verify the redirects against a live site
/// cat site_redirects.txt | redirect_status --test --base_url=https://example.com
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "redirect_status",
    about = "Turns URL redirect mappings into web-server configuration, or tests them against a live site."
)]
pub struct Config {
    /// Test redirects against a live server instead of generating them
    #[arg(long)]
    pub test: bool,

    /// Absolute URL prefixed to root-relative sources and destinations
    /// (test mode only)
    #[arg(long = "base_url", requires = "test", value_parser = parse_base_url)]
    pub base_url: Option<String>,

    /// Generator used to render the redirects: apache|drupal
    /// (generation mode only)
    #[arg(long, conflicts_with = "test", value_parser = Generator::from_name)]
    pub generator: Option<Generator>,

    /// Regular expression separating source and destination in each input
    /// line
    #[arg(long, default_value = DEFAULT_SEPARATOR)]
    pub separator: String,

    /// Follow the full redirect chain and compare the final URL instead of
    /// inspecting a single response (test mode only)
    #[arg(long, requires = "test")]
    pub follow: bool,

    /// Indent for generated rule bodies (generation mode only)
    #[arg(long, default_value = DEFAULT_INDENT, conflicts_with = "test")]
    pub indent: String,

    /// Table name prefix for the drupal generator (generation mode only)
    #[arg(long = "db_prefix", default_value = "", conflicts_with = "test")]
    pub db_prefix: String,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

/// Validates `--base_url` at argument-parse time, before any input is
/// consumed.
fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    if is_absolute_url(raw) {
        Ok(raw.to_string())
    } else {
        Err(ConfigError::InvalidBaseUrl(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }

    #[test]
    fn test_base_url_must_be_absolute() {
        assert!(parse_base_url("http://example.com").is_ok());
        assert!(parse_base_url("/just/a/path").is_err());
        assert!(parse_base_url("example.com").is_err());
    }

    #[test]
    fn test_generator_flag_conflicts_with_test_mode() {
        let result = Config::try_parse_from([
            "redirect_status",
            "--test",
            "--generator=apache",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_base_url_requires_test_mode() {
        let result = Config::try_parse_from([
            "redirect_status",
            "--base_url=http://example.com",
        ]);
        assert!(result.is_err());
    }
}
