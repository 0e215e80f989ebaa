use crate::utils::error::{EtlError, Result};
use regex::{Captures, Regex};
use serde::Deserialize;
use std::path::Path;

/// Optional settings file passed with `--config`. Every value can also be
/// given on the command line, which takes precedence.
///
/// ```toml
/// [database]
/// host = "db.internal"
/// port = 5432
/// service = "inventory"
/// user = "reporter"
/// password = "${SKU_DB_PASSWORD}"
///
/// [output]
/// path = "exports/skus.csv"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub database: DatabaseSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseSection {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub service: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for DatabaseSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseSection")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("service", &self.service)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    pub path: Option<String>,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(&path).map_err(|e| EtlError::ConfigError {
                message: format!(
                    "cannot read config file {}: {}",
                    path.as_ref().display(),
                    e
                ),
            })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }
}

/// Replaces `${VAR_NAME}` with the value of the environment variable. An unset
/// variable is an error rather than being left in place.
fn substitute_env_vars(content: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
        message: e.to_string(),
    })?;

    let mut unresolved = Vec::new();
    let result = re.replace_all(content, |caps: &Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| {
            unresolved.push(var_name.to_string());
            String::new()
        })
    });

    if !unresolved.is_empty() {
        return Err(EtlError::ConfigError {
            message: format!(
                "environment variable(s) not set: {}",
                unresolved.join(", ")
            ),
        });
    }

    Ok(result.into_owned())
}
