use crate::config::toml_config::FileConfig;
use crate::config::{RunConfig, DEFAULT_OUTPUT_PATH};
use crate::core::{ConnectionParameters, SkuSource};
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;
use clap::{ArgGroup, Parser};
use std::fmt;
use std::path::PathBuf;

#[derive(Clone, Parser)]
#[command(name = "sku-export")]
#[command(about = "Look up SKUs in the database and export net weight and HSN code to CSV")]
#[command(group(ArgGroup::new("sku_input").required(true).args(["skus", "sku_file"])))]
pub struct CliConfig {
    #[arg(long, help = "Database host")]
    pub host: Option<String>,

    #[arg(long, help = "Database port")]
    pub port: Option<u16>,

    #[arg(long, help = "Database service (database name)")]
    pub service: Option<String>,

    #[arg(long, help = "Database username")]
    pub user: Option<String>,

    #[arg(long, help = "Database password")]
    pub password: Option<String>,

    #[arg(long, num_args = 1.., value_name = "SKU", help = "SKUs to look up")]
    pub skus: Vec<String>,

    #[arg(long, value_name = "PATH", help = "File containing SKUs, one per line")]
    pub sku_file: Option<PathBuf>,

    #[arg(long, value_name = "PATH", help = "Output CSV file [default: output.csv]")]
    pub output: Option<String>,

    #[arg(long, value_name = "PATH", help = "TOML file with database and output settings")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit log lines as JSON")]
    pub log_json: bool,
}

impl fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CliConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("service", &self.service)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("skus", &self.skus)
            .field("sku_file", &self.sku_file)
            .field("output", &self.output)
            .field("config", &self.config)
            .field("verbose", &self.verbose)
            .field("log_json", &self.log_json)
            .finish()
    }
}

impl CliConfig {
    /// Loads the `--config` file, if any, and merges it under the flags.
    pub fn resolve(&self) -> Result<RunConfig> {
        let file = match &self.config {
            Some(path) => {
                tracing::debug!("Loading config file: {}", path.display());
                FileConfig::from_file(path)?
            }
            None => FileConfig::default(),
        };
        self.merge(file)
    }

    /// Flags win over file values; anything still missing is an error.
    pub fn merge(&self, file: FileConfig) -> Result<RunConfig> {
        let db = file.database;

        let connection = ConnectionParameters {
            host: validate_required_field("host", self.host.clone().or(db.host))?,
            port: validate_required_field("port", self.port.or(db.port))?,
            service: validate_required_field("service", self.service.clone().or(db.service))?,
            user: validate_required_field("user", self.user.clone().or(db.user))?,
            password: validate_required_field("password", self.password.clone().or(db.password))?,
        };

        let sku_source = match &self.sku_file {
            Some(path) => SkuSource::File(path.clone()),
            None => SkuSource::List(self.skus.clone()),
        };

        let output_path = self
            .output
            .clone()
            .or(file.output.path)
            .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string());

        Ok(RunConfig {
            connection,
            sku_source,
            output_path,
        })
    }
}
