use clap::{Parser, Subcommand};

/// CLI entry point: one subcommand per enrichment variant.
#[derive(Parser, Debug)]
#[command(name = "stream_enrich")]
#[command(about = "Enrich a CSV of streamer profiles by scraping their pages")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scrape each record's channel page for its bio and pull an email
    /// address out of the bio text.
    EnrichBio {
        #[arg(short, long, help = "Input CSV file")]
        input: String,

        #[arg(short, long, help = "Output CSV file (overwritten)")]
        output: String,

        #[arg(
            long,
            default_value = "twitch_url",
            help = "Column holding each record's page URL"
        )]
        url_column: String,

        #[arg(
            long,
            default_value = "pseudo",
            help = "Column used to identify records in progress output"
        )]
        id_column: String,

        #[arg(
            long,
            default_value_t = 500,
            help = "Politeness delay between requests, in milliseconds"
        )]
        delay_ms: u64,

        #[arg(long, default_value_t = 5, help = "Per-request timeout in seconds")]
        timeout: u64,

        #[arg(
            short,
            long,
            default_value = "Mozilla/5.0",
            help = "User agent string for requests"
        )]
        user_agent: String,
    },

    /// Visit each record's directory profile page and scrape the
    /// channel link out of its anchors.
    EnrichLinks {
        #[arg(short, long, help = "Input CSV file")]
        input: String,

        #[arg(short, long, help = "Output CSV file (overwritten)")]
        output: String,

        #[arg(
            long,
            default_value = "Nom",
            help = "Column holding each record's display name"
        )]
        name_column: String,

        #[arg(
            long,
            default_value_t = 500,
            help = "Politeness delay between requests, in milliseconds"
        )]
        delay_ms: u64,

        #[arg(long, default_value_t = 10, help = "Per-request timeout in seconds")]
        timeout: u64,

        #[arg(
            short,
            long,
            default_value = "Mozilla/5.0",
            help = "User agent string for requests"
        )]
        user_agent: String,
    },

    /// Derive each record's channel URL from its display name, without
    /// any network traffic.
    DeriveUrls {
        #[arg(short, long, help = "Input CSV file")]
        input: String,

        #[arg(short, long, help = "Output CSV file (overwritten)")]
        output: String,

        #[arg(
            long,
            default_value = "Nom",
            help = "Column holding each record's display name"
        )]
        name_column: String,
    },
}

impl Cli {
    /// Parse CLI arguments; on error clap prints help and exits with a
    /// usage-error code.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
