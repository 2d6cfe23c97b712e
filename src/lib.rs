pub mod cache;
pub mod config;
pub mod dataset;
pub mod enrich;
pub mod error;
pub mod ingest;
pub mod logging;
pub mod stats;
pub mod summary;
pub mod types;

pub use config::Config;
pub use dataset::EnrichedDataset;
pub use error::{EnrichError, Result};
pub use types::{EnrichedRecord, ResultRecord, Status};
