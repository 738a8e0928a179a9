//! Field extraction from a fetched page.
//!
//! Two strategies: selector-based reads from the parsed document (text
//! or an attribute), and regex scanning of a field extracted earlier
//! in the same record (used to pull an email out of a bio). "Not
//! found" is `None`, never an error.

use regex::Regex;
use scraper::{Html, Selector};

/// Declarative rule for one named output field. Specs are compile-time
/// constants (see `jobs`); a selector or regex that fails to parse is
/// a programmer error, not a runtime condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSpec {
    /// Text content of the first element matching `selector`, trimmed.
    Text {
        name: &'static str,
        selector: &'static str,
    },
    /// An attribute of the first element matching `selector`.
    Attr {
        name: &'static str,
        selector: &'static str,
        attr: &'static str,
    },
    /// First case-insensitive regex match over a previously extracted
    /// field's text.
    Pattern {
        name: &'static str,
        from_field: &'static str,
        pattern: &'static str,
    },
}

impl FieldSpec {
    /// The output column this spec produces.
    pub fn name(&self) -> &'static str {
        match self {
            FieldSpec::Text { name, .. }
            | FieldSpec::Attr { name, .. }
            | FieldSpec::Pattern { name, .. } => name,
        }
    }
}

/// Run every field spec against one fetched page, in declaration order.
/// Pattern specs see the fields extracted before them, so a `bio` text
/// spec can feed an `email` pattern spec.
pub fn extract_fields(
    html: &str,
    specs: &[FieldSpec],
) -> Vec<(&'static str, Option<String>)> {
    let document = Html::parse_document(html);
    let mut extracted: Vec<(&'static str, Option<String>)> = Vec::with_capacity(specs.len());

    for spec in specs {
        let value = match spec {
            FieldSpec::Text { selector, .. } => {
                let selector = Selector::parse(selector).expect("invalid CSS selector");
                document.select(&selector).next().map(|el| {
                    el.text().collect::<String>().trim().to_string()
                })
            }
            FieldSpec::Attr { selector, attr, .. } => {
                let selector = Selector::parse(selector).expect("invalid CSS selector");
                document
                    .select(&selector)
                    .next()
                    .and_then(|el| el.value().attr(attr))
                    .map(|v| v.trim().to_string())
            }
            FieldSpec::Pattern {
                from_field,
                pattern,
                ..
            } => {
                let source = extracted
                    .iter()
                    .find(|(name, _)| name == from_field)
                    .and_then(|(_, v)| v.as_deref())
                    .unwrap_or("");
                let re = Regex::new(&format!("(?i){}", pattern)).expect("invalid field pattern");
                re.find(source).map(|m| m.as_str().to_string())
            }
        };
        extracted.push((spec.name(), value));
    }

    extracted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::EMAIL_PATTERN;

    const BIO_SPEC: FieldSpec = FieldSpec::Text {
        name: "bio",
        selector: r#"[data-a-target="user-bio"]"#,
    };

    const EMAIL_SPEC: FieldSpec = FieldSpec::Pattern {
        name: "email",
        from_field: "bio",
        pattern: EMAIL_PATTERN,
    };

    #[test]
    fn test_selector_text() {
        let html = r#"<html><body><p data-a-target="user-bio">  hello there  </p></body></html>"#;
        let fields = extract_fields(html, &[BIO_SPEC]);
        assert_eq!(fields, vec![("bio", Some("hello there".to_string()))]);
    }

    #[test]
    fn test_selector_absent_is_none() {
        let fields = extract_fields("<html><body></body></html>", &[BIO_SPEC]);
        assert_eq!(fields, vec![("bio", None)]);
    }

    #[test]
    fn test_anchor_attribute_with_marker() {
        let spec = FieldSpec::Attr {
            name: "twitch_url",
            selector: r#"a[href*="twitch.tv"]"#,
            attr: "href",
        };
        let html = r#"<a href="https://other.example/x">x</a>
                      <a href="https://www.twitch.tv/alice">alice</a>"#;
        let fields = extract_fields(html, &[spec]);
        assert_eq!(
            fields,
            vec![("twitch_url", Some("https://www.twitch.tv/alice".to_string()))]
        );
    }

    #[test]
    fn test_email_pattern_over_bio() {
        let html = r#"<div data-a-target="user-bio">contact me at John.Doe+tag@example.co.uk!</div>"#;
        let fields = extract_fields(html, &[BIO_SPEC, EMAIL_SPEC]);
        assert_eq!(fields[0].1.as_deref(), Some("contact me at John.Doe+tag@example.co.uk!"));
        assert_eq!(fields[1].1.as_deref(), Some("John.Doe+tag@example.co.uk"));
    }

    #[test]
    fn test_email_pattern_no_token() {
        let html = r#"<div data-a-target="user-bio">just vibes, no contact</div>"#;
        let fields = extract_fields(html, &[BIO_SPEC, EMAIL_SPEC]);
        assert_eq!(fields[1].1, None);
    }

    #[test]
    fn test_email_pattern_first_match_only() {
        let html = r#"<div data-a-target="user-bio">a@one.io then b@two.io</div>"#;
        let fields = extract_fields(html, &[BIO_SPEC, EMAIL_SPEC]);
        assert_eq!(fields[1].1.as_deref(), Some("a@one.io"));
    }

    #[test]
    fn test_pattern_missing_source_field_is_none() {
        let fields = extract_fields("<html></html>", &[EMAIL_SPEC]);
        assert_eq!(fields, vec![("email", None)]);
    }
}
