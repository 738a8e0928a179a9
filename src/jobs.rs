//! The enrichment variants as declared job definitions. Selectors,
//! templates and patterns are fixed constants; only the source/id
//! columns and timings are configurable per run.

use std::time::Duration;

use crate::extract::FieldSpec;
use crate::locator::LocatorMode;

/// Bio block on a channel page.
pub const BIO_SELECTOR: &str = r#"[data-a-target="user-bio"]"#;

/// Email-like token: `local@domain.tld`, matched case-insensitively,
/// first occurrence wins.
pub const EMAIL_PATTERN: &str = r"[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}";

/// First anchor whose address carries the channel marker.
pub const TWITCH_ANCHOR_SELECTOR: &str = r#"a[href*="twitch.tv"]"#;

/// Profile page template on the directory site.
pub const PROFILE_URL_TEMPLATE: &str = "https://streameurs.fr/streamer/{name}";

/// Channel page template derived straight from the display name.
pub const CHANNEL_URL_TEMPLATE: &str = "https://www.twitch.tv/{name}";

/// One enrichment variant: how to locate each record's page, which
/// fields to extract from it, and which column identifies the record
/// in progress output. The declared field set fixes the output schema
/// regardless of any single record's outcome.
#[derive(Debug, Clone)]
pub struct EnrichJob {
    /// Column used to label per-record progress and failures.
    pub id_column: String,
    pub locator: LocatorMode,
    /// When set, the derived locator itself is written to the output
    /// under this column.
    pub locator_column: Option<&'static str>,
    /// Extraction specs, in output-column order. Empty means the job
    /// is offline: no fetch, no delay.
    pub fields: Vec<FieldSpec>,
    /// Per-fetch bound; a fetch past it counts as a failed record.
    pub timeout: Duration,
}

impl EnrichJob {
    /// Every column this job adds to the output, in order.
    pub fn declared_columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.locator_column
            .into_iter()
            .chain(self.fields.iter().map(|f| f.name()))
    }
}

/// Scrape `bio` from each record's channel page and pull `email` out
/// of the bio text. The locator is read from an existing URL column.
pub fn bio_email(url_column: String, id_column: String, timeout: Duration) -> EnrichJob {
    EnrichJob {
        id_column,
        locator: LocatorMode::Column(url_column),
        locator_column: None,
        fields: vec![
            FieldSpec::Text {
                name: "bio",
                selector: BIO_SELECTOR,
            },
            FieldSpec::Pattern {
                name: "email",
                from_field: "bio",
                pattern: EMAIL_PATTERN,
            },
        ],
        timeout,
    }
}

/// Visit each record's directory profile page (templated from the
/// display name) and scrape the channel link out of its anchors. The
/// derived profile URL is kept as an output column.
pub fn channel_links(name_column: String, timeout: Duration) -> EnrichJob {
    EnrichJob {
        id_column: name_column.clone(),
        locator: LocatorMode::Template {
            column: name_column,
            template: PROFILE_URL_TEMPLATE.to_string(),
        },
        locator_column: Some("profile_url"),
        fields: vec![FieldSpec::Attr {
            name: "twitch_url",
            selector: TWITCH_ANCHOR_SELECTOR,
            attr: "href",
        }],
        timeout,
    }
}

/// Offline variant: synthesize the channel URL from the display name.
/// No network traffic at all.
pub fn derive_channel_urls(name_column: String) -> EnrichJob {
    EnrichJob {
        id_column: name_column.clone(),
        locator: LocatorMode::Template {
            column: name_column,
            template: CHANNEL_URL_TEMPLATE.to_string(),
        },
        locator_column: Some("twitch_url"),
        fields: Vec::new(),
        timeout: Duration::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bio_email_declared_columns() {
        let job = bio_email("twitch_url".into(), "pseudo".into(), Duration::from_secs(5));
        let cols: Vec<_> = job.declared_columns().collect();
        assert_eq!(cols, vec!["bio", "email"]);
    }

    #[test]
    fn test_channel_links_declared_columns() {
        let job = channel_links("Nom".into(), Duration::from_secs(10));
        let cols: Vec<_> = job.declared_columns().collect();
        assert_eq!(cols, vec!["profile_url", "twitch_url"]);
    }

    #[test]
    fn test_derive_job_is_offline() {
        let job = derive_channel_urls("Nom".into());
        assert!(job.fields.is_empty());
        assert_eq!(job.declared_columns().collect::<Vec<_>>(), vec!["twitch_url"]);
    }
}
