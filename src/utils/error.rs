use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Error reading SKU file {path}: {message}")]
    InputError { path: String, message: String },

    #[error("Database connection error: {message}")]
    ConnectionError { message: String },

    #[error("Error querying SKU {sku}: {message}")]
    QueryError { sku: String, message: String },

    #[error("Error writing CSV {path}: {message}")]
    OutputError { path: String, message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl EtlError {
    /// The underlying cause without this crate's prefix, for wrapping into a
    /// more specific variant.
    pub fn cause_message(&self) -> String {
        match self {
            EtlError::IoError(e) => e.to_string(),
            EtlError::CsvError(e) => e.to_string(),
            EtlError::InputError { message, .. }
            | EtlError::ConnectionError { message }
            | EtlError::QueryError { message, .. }
            | EtlError::OutputError { message, .. }
            | EtlError::ConfigError { message } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Short operator hint printed after a fatal error.
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::InputError { .. } => "Check that the SKU file exists and is readable UTF-8 text",
            EtlError::ConnectionError { .. } => {
                "Check host, port, service name and credentials, and that the database is reachable"
            }
            EtlError::QueryError { .. } => "Check that the sku table and its columns exist",
            EtlError::OutputError { .. } | EtlError::CsvError(_) | EtlError::IoError(_) => {
                "Check that the output directory exists and is writable"
            }
            EtlError::ConfigError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. } => {
                "Pass the value on the command line or set it in the --config file"
            }
        }
    }

    /// Process exit status for a fatal error. Configuration problems share
    /// clap's usage-error status.
    pub fn exit_code(&self) -> i32 {
        match self {
            EtlError::ConfigError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. } => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
