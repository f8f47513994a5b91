//! Drupal redirect-table generator.
//!
//! Emits one `INSERT` statement per rule against the redirect module's
//! table. The row hash follows the module's scheme: a canonical
//! serialization of the source descriptor, digested with SHA-256 and
//! encoded with the URL-safe base64 alphabet, padding stripped.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::models::RedirectRule;

use super::GenerateOptions;

/// Language code stored on every generated row.
const LANGUAGE_NONE: &str = "und";

/// Canonical hash input. Field order is the sorted key order, so the
/// serialized form is deterministic without any runtime key sorting.
#[derive(Serialize)]
struct HashInput<'a> {
    language: &'a str,
    source: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_query: Option<&'a str>,
}

pub(super) fn emit(rules: &[RedirectRule], options: &GenerateOptions) -> Vec<String> {
    let prefix = options.db_prefix.as_deref().unwrap_or("");
    let mut output = Vec::new();

    for rule in rules {
        // generate() preprocesses before dispatching, so parsed_source is set
        let parsed = rule.parsed_source.as_ref().expect("rule not preprocessed");

        let source = trim_slashes(&parsed.path);
        let destination = trim_slashes(&rule.destination);
        let hash = source_hash(source, parsed.query.as_deref());

        output.push(format!(
            "INSERT INTO {prefix}redirect (hash, type, uid, source, source_options, \
             redirect, redirect_options, language, status_code, count, status) \
             VALUES ('{}', 'redirect', 1, '{}', '', '{}', '', '{LANGUAGE_NONE}', 301, 0, 1);",
            sql_escape(&hash),
            sql_escape(source),
            sql_escape(destination),
        ));
    }

    output
}

/// Hash of the canonical source descriptor: URL-safe base64 of the SHA-256
/// digest, with padding stripped.
fn source_hash(source: &str, query: Option<&str>) -> String {
    let input = HashInput {
        language: LANGUAGE_NONE,
        source,
        source_query: query.filter(|query| !query.is_empty()),
    };

    // A flat struct of strings cannot fail to serialize.
    let canonical = serde_json::to_string(&input).expect("canonical serialization");
    URL_SAFE_NO_PAD.encode(Sha256::digest(canonical.as_bytes()))
}

fn trim_slashes(value: &str) -> &str {
    value.trim_matches('/')
}

fn sql_escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
