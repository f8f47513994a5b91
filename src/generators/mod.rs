//! Generator registry and the generation pipeline.
//!
//! Generators are a closed set: each variant is a pure function from the
//! normalized rule list to output lines for one target format. The enum
//! doubles as the registry, so an unrecognized name fails at lookup time
//! as a configuration error, before any output is produced.

use std::fmt;
use std::str::FromStr;

use crate::error_handling::{ConfigError, UrlParseError};
use crate::models::{preprocess, RedirectRule};

mod apache;
mod drupal;

/// A registered output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    /// Apache `mod_rewrite` rules.
    Apache,
    /// Drupal redirect-table insert statements.
    Drupal,
}

impl Generator {
    /// Registered generators, in registration order. The first entry is
    /// the default.
    pub const ALL: [Generator; 2] = [Generator::Apache, Generator::Drupal];

    pub fn name(&self) -> &'static str {
        match self {
            Generator::Apache => "apache",
            Generator::Drupal => "drupal",
        }
    }

    /// Registry lookup by name.
    pub fn from_name(name: &str) -> Result<Generator, ConfigError> {
        Generator::ALL
            .into_iter()
            .find(|generator| generator.name() == name)
            .ok_or_else(|| ConfigError::UnknownGenerator {
                name: name.to_string(),
                available: Generator::ALL.map(|generator| generator.name()).join(", "),
            })
    }

    fn emit(&self, rules: &[RedirectRule], options: &GenerateOptions) -> Vec<String> {
        match self {
            Generator::Apache => apache::emit(rules, options),
            Generator::Drupal => drupal::emit(rules, options),
        }
    }
}

impl Default for Generator {
    fn default() -> Self {
        Generator::ALL[0]
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Generator {
    type Err = ConfigError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Generator::from_name(name)
    }
}

/// Caller-supplied generation options.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Output format; the first registered generator when absent.
    pub generator: Option<Generator>,
    /// Indent for rule bodies; one tab when absent.
    pub indent: Option<String>,
    /// Table name prefix for database-backed generators; empty when absent.
    pub db_prefix: Option<String>,
}

/// Renders the rules with the configured (or default) generator.
///
/// Preprocessing runs first, so callers can hand over raw rules straight
/// from input parsing.
pub fn generate(
    rules: &mut [RedirectRule],
    options: &GenerateOptions,
) -> Result<String, UrlParseError> {
    preprocess(rules)?;

    let generator = options.generator.unwrap_or_default();
    log::debug!("Rendering {} rule(s) with the {generator} generator", rules.len());

    Ok(generator.emit(rules, options).join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_generator_is_first_registered() {
        assert_eq!(Generator::default(), Generator::ALL[0]);
        assert_eq!(Generator::default(), Generator::Apache);
    }

    #[test]
    fn test_from_name_resolves_registered_generators() {
        assert_eq!(Generator::from_name("apache").unwrap(), Generator::Apache);
        assert_eq!(Generator::from_name("drupal").unwrap(), Generator::Drupal);
    }

    #[test]
    fn test_from_name_rejects_unknown_generator() {
        let err = Generator::from_name("nginx").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("nginx"));
        assert!(message.contains("apache"));
    }

    #[test]
    fn test_generate_defaults_to_first_generator() {
        let mut rules = vec![RedirectRule::new("/old", "/new")];
        let output = generate(&mut rules, &GenerateOptions::default()).unwrap();

        assert!(output.starts_with("<IfModule mod_rewrite.c>"));
        assert!(output.ends_with("</IfModule>"));
    }
}
