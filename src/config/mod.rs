#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::{ConfigProvider, ConnectionParameters, SkuSource};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, Validate,
};

pub const DEFAULT_OUTPUT_PATH: &str = "output.csv";

/// Fully resolved settings for one export run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub connection: ConnectionParameters,
    pub sku_source: SkuSource,
    pub output_path: String,
}

impl ConfigProvider for RunConfig {
    fn connection(&self) -> &ConnectionParameters {
        &self.connection
    }

    fn sku_source(&self) -> &SkuSource {
        &self.sku_source
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("host", &self.connection.host)?;
        validate_range("port", self.connection.port, 1, u16::MAX)?;
        validate_non_empty_string("service", &self.connection.service)?;
        validate_non_empty_string("user", &self.connection.user)?;
        validate_path("output", &self.output_path)?;
        Ok(())
    }
}
