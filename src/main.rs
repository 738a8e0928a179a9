use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::info;

use stream_enrich::cli::{Cli, Commands};
use stream_enrich::jobs::{self, EnrichJob};
use stream_enrich::pipeline::{Enricher, PipelineConfig};
use stream_enrich::{export, logging, table, ExportError, HttpClient, TableError};

#[derive(Error, Debug)]
pub enum MainError {
    #[error("Input error: {0}")]
    Table(#[from] TableError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

/// Decode the input, run one job over it and write the result. Shared
/// by all three subcommands.
async fn run_job(
    input: &str,
    output: &str,
    job: EnrichJob,
    config: PipelineConfig,
    user_agent: &str,
) -> Result<(), MainError> {
    let table = table::read_table(Path::new(input))?;
    info!("{} records to process from {}", table.rows.len(), input);

    let fetcher = Arc::new(HttpClient::new(user_agent, job.timeout));
    let enricher = Enricher::new(fetcher, job, config);
    let records = enricher.run(&table.rows).await;

    let written = export::write_table(&records, Path::new(output))?;
    info!("wrote {} records to {}", written, output);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), MainError> {
    logging::init();
    let cli = Cli::parse_args();

    match cli.command {
        Commands::EnrichBio {
            input,
            output,
            url_column,
            id_column,
            delay_ms,
            timeout,
            user_agent,
        } => {
            let job = jobs::bio_email(url_column, id_column, Duration::from_secs(timeout));
            let config = PipelineConfig {
                delay: Duration::from_millis(delay_ms),
            };
            run_job(&input, &output, job, config, &user_agent).await?;
        }

        Commands::EnrichLinks {
            input,
            output,
            name_column,
            delay_ms,
            timeout,
            user_agent,
        } => {
            let job = jobs::channel_links(name_column, Duration::from_secs(timeout));
            let config = PipelineConfig {
                delay: Duration::from_millis(delay_ms),
            };
            run_job(&input, &output, job, config, &user_agent).await?;
        }

        Commands::DeriveUrls {
            input,
            output,
            name_column,
        } => {
            let job = jobs::derive_channel_urls(name_column);
            let config = PipelineConfig {
                delay: Duration::ZERO,
            };
            run_job(&input, &output, job, config, "Mozilla/5.0").await?;
        }
    }

    Ok(())
}
