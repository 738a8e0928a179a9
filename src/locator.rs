//! Record locator: derive the page URL for one input record.
//!
//! Pure data transformation, no I/O. A missing or empty source column
//! yields an empty locator; the fetch layer is the one that fails on it.

use url::Url;

use crate::table::Record;

/// Placeholder substituted into templated locators.
pub const TEMPLATE_SLOT: &str = "{name}";

/// How the page URL is derived from a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocatorMode {
    /// Read a designated column's value verbatim.
    Column(String),
    /// Substitute a designated column's value into a fixed URL
    /// template, percent-encoding it for a path segment.
    Template { column: String, template: String },
}

impl LocatorMode {
    /// Derive the locator for `record`. Never fails.
    pub fn locate(&self, record: &Record) -> String {
        match self {
            LocatorMode::Column(column) => record.get(column).unwrap_or_default().to_string(),
            LocatorMode::Template { column, template } => {
                let value = record.get(column).unwrap_or_default();
                if value.is_empty() {
                    return String::new();
                }
                let substituted = template.replace(TEMPLATE_SLOT, value);
                // WHATWG parsing percent-encodes spaces and non-ASCII
                // in the path. An unparseable result is passed through
                // raw and left to the fetch layer.
                match Url::parse(&substituted) {
                    Ok(url) => url.to_string(),
                    Err(_) => substituted,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_direct_column() {
        let mode = LocatorMode::Column("twitch_url".to_string());
        let rec = record(&[("twitch_url", "https://www.twitch.tv/alice")]);
        assert_eq!(mode.locate(&rec), "https://www.twitch.tv/alice");
    }

    #[test]
    fn test_direct_column_missing_is_empty() {
        let mode = LocatorMode::Column("twitch_url".to_string());
        assert_eq!(mode.locate(&record(&[("Nom", "Alice")])), "");
    }

    #[test]
    fn test_template_substitution() {
        let mode = LocatorMode::Template {
            column: "Nom".to_string(),
            template: "https://streameurs.fr/streamer/{name}".to_string(),
        };
        let rec = record(&[("Nom", "alice")]);
        assert_eq!(mode.locate(&rec), "https://streameurs.fr/streamer/alice");
    }

    #[test]
    fn test_template_percent_encodes_path_value() {
        let mode = LocatorMode::Template {
            column: "Nom".to_string(),
            template: "https://example.test/streamer/{name}".to_string(),
        };
        let rec = record(&[("Nom", "Ana Müller")]);
        assert_eq!(
            mode.locate(&rec),
            "https://example.test/streamer/Ana%20M%C3%BCller"
        );
    }

    #[test]
    fn test_template_empty_value_is_empty_locator() {
        let mode = LocatorMode::Template {
            column: "Nom".to_string(),
            template: "https://example.test/streamer/{name}".to_string(),
        };
        assert_eq!(mode.locate(&record(&[("Nom", "")])), "");
        assert_eq!(mode.locate(&record(&[("other", "x")])), "");
    }
}
