pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{
    postgres::{PostgresConnector, PostgresGateway},
    storage::LocalStorage,
};
pub use config::RunConfig;
pub use core::{etl::EtlEngine, pipeline::SkuPipeline};
pub use domain::model::{
    ConnectionParameters, ExportSummary, LookupOutcome, LookupReport, SkuRecord, SkuSource,
};
pub use utils::error::{EtlError, Result};
