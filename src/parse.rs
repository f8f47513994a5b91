//! Input-line parsing.
//!
//! Each input line holds a source and a destination separated by a
//! configurable pattern. Lines that do not split into exactly two fields
//! carry no usable mapping and are skipped.

use log::debug;
use regex::Regex;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::models::RedirectRule;

/// Splits one line into a rule. Fields are trimmed; anything other than
/// exactly two fields is rejected.
pub fn parse_input_line(line: &str, separator: &Regex) -> Option<RedirectRule> {
    let fields: Vec<&str> = separator.split(line).map(str::trim).collect();

    match fields.as_slice() {
        [source, destination] => Some(RedirectRule::new(*source, *destination)),
        _ => None,
    }
}

/// Reads rules line by line, skipping blank and malformed lines.
pub async fn read_rules<R>(reader: R, separator: &Regex) -> std::io::Result<Vec<RedirectRule>>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut rules = Vec::new();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        match parse_input_line(&line, separator) {
            Some(rule) => rules.push(rule),
            None => debug!("Skipping input line without exactly two fields: {line}"),
        }
    }

    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab() -> Regex {
        Regex::new("\t").unwrap()
    }

    #[test]
    fn test_parse_input_line_tab_separated() {
        let rule = parse_input_line("/old\t/new", &tab()).unwrap();
        assert_eq!(rule.source, "/old");
        assert_eq!(rule.destination, "/new");
    }

    #[test]
    fn test_parse_input_line_trims_fields() {
        let rule = parse_input_line("  /old \t /new  ", &tab()).unwrap();
        assert_eq!(rule.source, "/old");
        assert_eq!(rule.destination, "/new");
    }

    #[test]
    fn test_parse_input_line_rejects_wrong_field_counts() {
        assert!(parse_input_line("/old", &tab()).is_none());
        assert!(parse_input_line("/a\t/b\t/c", &tab()).is_none());
    }

    #[test]
    fn test_parse_input_line_custom_separator() {
        let separator = Regex::new(r"\s*->\s*").unwrap();
        let rule = parse_input_line("/old -> /new", &separator).unwrap();
        assert_eq!(rule.source, "/old");
        assert_eq!(rule.destination, "/new");
    }

    #[tokio::test]
    async fn test_read_rules_skips_blank_and_malformed_lines() {
        let input = "/old\t/new\n\njust-one-field\n/a\t/b\n";
        let reader = tokio::io::BufReader::new(input.as_bytes());

        let rules = read_rules(reader, &tab()).await.unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].source, "/old");
        assert_eq!(rules[1].destination, "/b");
    }
}
