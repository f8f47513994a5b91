//! Apache `mod_rewrite` generator.
//!
//! Emits a block guarded by `<IfModule mod_rewrite.c>`, with one
//! condition/rule group per redirect in input order. Conditions narrow the
//! match down to the exact source: transport, host (only when the source
//! names one), path, and the literal query string.

use crate::config::{DEFAULT_INDENT, DEFAULT_STATUS_CODE};
use crate::models::RedirectRule;

use super::GenerateOptions;

pub(super) fn emit(rules: &[RedirectRule], options: &GenerateOptions) -> Vec<String> {
    let indent = options.indent.as_deref().unwrap_or(DEFAULT_INDENT);
    let mut output = Vec::new();

    output.push("<IfModule mod_rewrite.c>".to_string());
    output.push("RewriteEngine On".to_string());

    for (index, rule) in rules.iter().enumerate() {
        // generate() preprocesses before dispatching, so parsed_source is set
        let parsed = rule.parsed_source.as_ref().expect("rule not preprocessed");

        if parsed.scheme.as_deref() == Some("https") {
            output.push(format!("{indent}RewriteCond %{{HTTPS}} =on"));
        }

        // No host in the source means the rule applies to any host; the
        // condition is omitted entirely rather than emitted as a wildcard.
        if let Some(host) = &parsed.host {
            output.push(format!("{indent}RewriteCond %{{HTTP_HOST}} ={host}"));
        }

        output.push(format!("{indent}RewriteCond %{{REQUEST_URI}} ={}", parsed.path));

        match parsed.query.as_deref() {
            Some(query) => {
                output.push(format!("{indent}RewriteCond %{{QUERY_STRING}} ={query}"));
            }
            None => {
                output.push(format!("{indent}RewriteCond %{{QUERY_STRING}} =\"\""));
            }
        }

        let code = rule.options.code.as_deref().unwrap_or(DEFAULT_STATUS_CODE);
        output.push(format!(
            "{indent}RewriteRule .* {} [R={code},L,QSA,QSD,NE]",
            rule.destination
        ));

        if index < rules.len() - 1 {
            output.push(String::new());
        }
    }

    output.push("</IfModule>".to_string());
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::preprocess;

    fn render(rules: &mut [RedirectRule]) -> String {
        preprocess(rules).unwrap();
        emit(rules, &GenerateOptions::default()).join("\n")
    }

    #[test]
    fn test_absolute_https_source_emits_all_conditions() {
        let mut rules = vec![RedirectRule::new("https://example.com/old?x=1", "/new")];
        let output = render(&mut rules);

        assert!(output.contains("\tRewriteCond %{HTTPS} =on"));
        assert!(output.contains("\tRewriteCond %{HTTP_HOST} =example.com"));
        assert!(output.contains("\tRewriteCond %{REQUEST_URI} =/old"));
        assert!(output.contains("\tRewriteCond %{QUERY_STRING} =x=1"));
        assert!(output.contains("\tRewriteRule .* /new [R=301,L,QSA,QSD,NE]"));
    }

    #[test]
    fn test_hostless_source_omits_host_condition() {
        let mut rules = vec![RedirectRule::new("/old", "/new")];
        let output = render(&mut rules);

        assert!(!output.contains("HTTP_HOST"));
        assert!(!output.contains("HTTPS"));
        assert!(output.contains("\tRewriteCond %{REQUEST_URI} =/old"));
    }

    #[test]
    fn test_empty_query_matches_empty_query_string() {
        let mut rules = vec![RedirectRule::new("/old", "/new")];
        let output = render(&mut rules);

        assert!(output.contains("\tRewriteCond %{QUERY_STRING} =\"\""));
    }

    #[test]
    fn test_explicit_code_is_used() {
        let mut rules = vec![RedirectRule::new("/old", "/new")];
        rules[0].options.code = Some("302".to_string());
        let output = render(&mut rules);

        assert!(output.contains("[R=302,L,QSA,QSD,NE]"));
    }

    #[test]
    fn test_blank_line_between_rules_but_not_after_last() {
        let mut rules = vec![
            RedirectRule::new("/a", "/b"),
            RedirectRule::new("/c", "/d"),
        ];
        let output = render(&mut rules);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.iter().filter(|line| line.is_empty()).count(), 1);
        assert_eq!(*lines.last().unwrap(), "</IfModule>");
        assert_ne!(lines[lines.len() - 2], "");
    }

    #[test]
    fn test_empty_rule_list_emits_wrapper_only() {
        let mut rules: Vec<RedirectRule> = Vec::new();
        let output = render(&mut rules);

        assert_eq!(
            output,
            "<IfModule mod_rewrite.c>\nRewriteEngine On\n</IfModule>"
        );
    }

    #[test]
    fn test_custom_indent() {
        let mut rules = vec![RedirectRule::new("/old", "/new")];
        preprocess(&mut rules).unwrap();

        let options = GenerateOptions {
            indent: Some("    ".to_string()),
            ..Default::default()
        };
        let output = emit(&rules, &options).join("\n");

        assert!(output.contains("    RewriteCond %{REQUEST_URI} =/old"));
        assert!(!output.contains('\t'));
    }
}
