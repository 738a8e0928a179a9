pub mod cli;
pub mod export;
pub mod extract;
pub mod jobs;
pub mod locator;
pub mod logging;
pub mod network;
pub mod pipeline;
pub mod table;

// Re-export main types for library usage
pub use export::{write_table, ExportError};
pub use extract::{extract_fields, FieldSpec};
pub use jobs::EnrichJob;
pub use locator::LocatorMode;
pub use network::{FetchError, Fetcher, HttpClient};
pub use pipeline::{Enricher, PipelineConfig};
pub use table::{Record, Table, TableError};
