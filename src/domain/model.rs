use std::fmt;
use std::path::PathBuf;

/// Connection target and credentials for the backing database.
///
/// `service` is the database name on the server. The password is kept out of
/// the `Debug` rendering so the struct can be logged safely.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionParameters {
    pub host: String,
    pub port: u16,
    pub service: String,
    pub user: String,
    pub password: String,
}

impl ConnectionParameters {
    /// `host:port/service`, the credential-free form used in logs.
    pub fn target(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.service)
    }
}

impl fmt::Debug for ConnectionParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParameters")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("service", &self.service)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Where the SKUs to look up come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkuSource {
    /// Identifiers given directly, e.g. `--skus A1 B2`.
    List(Vec<String>),
    /// Text file with one identifier per line.
    File(PathBuf),
}

/// One found SKU, normalised for export. Missing weight or HSN code values
/// are empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkuRecord {
    pub sku: String,
    pub net_weight: String,
    pub hsn_code: String,
}

impl SkuRecord {
    pub fn new(sku: String, net_weight: Option<String>, hsn_code: Option<String>) -> Self {
        Self {
            sku,
            net_weight: net_weight.unwrap_or_default(),
            hsn_code: hsn_code.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(SkuRecord),
    /// `cause` is set when the lookup itself failed rather than matching no row.
    Missing { sku: String, cause: Option<String> },
}

/// Outcomes of one run, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupReport {
    pub outcomes: Vec<LookupOutcome>,
}

impl LookupReport {
    pub fn found(&self) -> impl Iterator<Item = &SkuRecord> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            LookupOutcome::Found(record) => Some(record),
            LookupOutcome::Missing { .. } => None,
        })
    }

    pub fn missing(&self) -> impl Iterator<Item = &str> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            LookupOutcome::Missing { sku, .. } => Some(sku.as_str()),
            LookupOutcome::Found(_) => None,
        })
    }

    pub fn found_count(&self) -> usize {
        self.found().count()
    }

    pub fn missing_count(&self) -> usize {
        self.missing().count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportSummary {
    Exported { count: usize, path: String },
    NothingFound { missing: usize },
}

/// The closing console line of a run.
impl fmt::Display for ExportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportSummary::Exported { count, path } => {
                write!(f, "Exported {} SKUs to {}", count, path)
            }
            ExportSummary::NothingFound { .. } => f.write_str("No SKUs found to export."),
        }
    }
}
