//! Logger and HTTP client construction.

use std::io::Write;

use log::LevelFilter;

use crate::config::{LogFormat, DEFAULT_USER_AGENT};

/// Initializes the global logger at the given level and format.
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), log::SetLoggerError> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);

    if let LogFormat::Json = format {
        builder.format(|buf, record| {
            writeln!(
                buf,
                "{}",
                serde_json::json!({
                    "level": record.level().to_string(),
                    "target": record.target(),
                    "message": record.args().to_string(),
                })
            )
        });
    }

    builder.try_init()
}

/// Builds the HTTP client used for verification.
///
/// Redirect following is disabled so each hop can be inspected manually,
/// and certificate verification is off: sites under test are routinely
/// still behind self-signed or staging certificates.
pub fn init_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .danger_accept_invalid_certs(true)
        .user_agent(DEFAULT_USER_AGENT)
        .build()
}
