use anyhow::Result;
use async_trait::async_trait;
use sku_export::core::{GatewayConnector, SkuGateway};
use sku_export::{
    ConnectionParameters, EtlEngine, EtlError, ExportSummary, LocalStorage, RunConfig, SkuPipeline,
    SkuRecord, SkuSource,
};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

#[derive(Default)]
struct Counters {
    connects: AtomicUsize,
    lookups: AtomicUsize,
    closes: AtomicUsize,
}

/// In-memory stand-in for the `sku` table.
#[derive(Clone, Default)]
struct MemoryConnector {
    rows: Arc<HashMap<String, (Option<String>, Option<String>)>>,
    failing: Arc<HashSet<String>>,
    refuse: bool,
    counters: Arc<Counters>,
}

impl MemoryConnector {
    fn with_rows(rows: &[(&str, Option<&str>, Option<&str>)]) -> Self {
        let rows = rows
            .iter()
            .map(|(sku, weight, hsn)| {
                (
                    sku.to_string(),
                    (weight.map(str::to_string), hsn.map(str::to_string)),
                )
            })
            .collect();
        Self {
            rows: Arc::new(rows),
            ..Default::default()
        }
    }

    fn failing_on(mut self, skus: &[&str]) -> Self {
        self.failing = Arc::new(skus.iter().map(|s| s.to_string()).collect());
        self
    }

    fn refusing() -> Self {
        Self {
            refuse: true,
            ..Default::default()
        }
    }
}

struct MemoryGateway {
    connector: MemoryConnector,
    open: bool,
}

#[async_trait]
impl GatewayConnector for MemoryConnector {
    type Gateway = MemoryGateway;

    async fn connect(&self) -> sku_export::Result<MemoryGateway> {
        self.counters.connects.fetch_add(1, Ordering::SeqCst);
        if self.refuse {
            return Err(EtlError::ConnectionError {
                message: "connection refused".to_string(),
            });
        }
        Ok(MemoryGateway {
            connector: self.clone(),
            open: true,
        })
    }
}

#[async_trait]
impl SkuGateway for MemoryGateway {
    async fn lookup(&self, sku: &str) -> sku_export::Result<Option<SkuRecord>> {
        self.connector.counters.lookups.fetch_add(1, Ordering::SeqCst);
        if self.connector.failing.contains(sku) {
            return Err(EtlError::QueryError {
                sku: sku.to_string(),
                message: "statement timeout".to_string(),
            });
        }
        Ok(self.connector.rows.get(sku).map(|(weight, hsn)| {
            SkuRecord::new(sku.to_string(), weight.clone(), hsn.clone())
        }))
    }

    async fn close(&mut self) {
        if self.open {
            self.open = false;
            self.connector.counters.closes.fetch_add(1, Ordering::SeqCst);
        }
    }
}

fn run_config(source: SkuSource, output_path: &Path) -> RunConfig {
    RunConfig {
        connection: ConnectionParameters {
            host: "localhost".to_string(),
            port: 5432,
            service: "inventory".to_string(),
            user: "reporter".to_string(),
            password: "secret".to_string(),
        },
        sku_source: source,
        output_path: output_path.to_str().unwrap().to_string(),
    }
}

fn sku_list(skus: &[&str]) -> SkuSource {
    SkuSource::List(skus.iter().map(|s| s.to_string()).collect())
}

async fn run(
    connector: MemoryConnector,
    source: SkuSource,
    output_path: &Path,
) -> sku_export::Result<ExportSummary> {
    let pipeline = SkuPipeline::new(
        LocalStorage::new(),
        run_config(source, output_path),
        connector,
    );
    EtlEngine::new(pipeline).run().await
}

fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn test_all_found_in_input_order() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output = temp_dir.path().join("output.csv");
    let connector = MemoryConnector::with_rows(&[
        ("A1", Some("1.5"), Some("0101")),
        ("B2", Some("2.25"), Some("0202")),
        ("C3", Some("3"), Some("0303")),
    ]);

    let summary = run(connector.clone(), sku_list(&["C3", "A1", "B2"]), &output).await?;

    assert_eq!(
        summary,
        ExportSummary::Exported {
            count: 3,
            path: output.to_str().unwrap().to_string()
        }
    );
    assert_eq!(
        read_lines(&output),
        vec![
            "SKU,Net Weight,HSN Code",
            "C3,3,0303",
            "A1,1.5,0101",
            "B2,2.25,0202"
        ]
    );
    assert_eq!(connector.counters.connects.load(Ordering::SeqCst), 1);
    assert_eq!(connector.counters.lookups.load(Ordering::SeqCst), 3);
    assert_eq!(connector.counters.closes.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn test_null_fields_exported_as_empty() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output = temp_dir.path().join("output.csv");
    let connector = MemoryConnector::with_rows(&[("A1", None, None)]);

    run(connector, sku_list(&["A1"]), &output).await?;

    assert_eq!(read_lines(&output), vec!["SKU,Net Weight,HSN Code", "A1,,"]);
    Ok(())
}

#[tokio::test]
async fn test_partial_match_exports_only_found() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output = temp_dir.path().join("output.csv");
    let connector = MemoryConnector::with_rows(&[("B2", Some("12.5"), Some("1001"))]);

    let summary = run(connector, sku_list(&["A1", "B2", "C3"]), &output).await?;

    assert!(matches!(summary, ExportSummary::Exported { count: 1, .. }));
    assert_eq!(
        read_lines(&output),
        vec!["SKU,Net Weight,HSN Code", "B2,12.5,1001"]
    );
    Ok(())
}

#[tokio::test]
async fn test_nothing_found_leaves_output_untouched() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output = temp_dir.path().join("output.csv");
    std::fs::write(&output, "previous run\n")?;
    let connector = MemoryConnector::with_rows(&[]);

    let summary = run(connector.clone(), sku_list(&["A1", "B2"]), &output).await?;

    assert_eq!(summary, ExportSummary::NothingFound { missing: 2 });
    assert_eq!(std::fs::read_to_string(&output)?, "previous run\n");
    assert_eq!(connector.counters.closes.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn test_nothing_found_creates_no_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output = temp_dir.path().join("output.csv");

    run(MemoryConnector::with_rows(&[]), sku_list(&["A1"]), &output).await?;

    assert!(!output.exists());
    Ok(())
}

#[tokio::test]
async fn test_query_error_is_isolated() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output = temp_dir.path().join("output.csv");
    let connector = MemoryConnector::with_rows(&[
        ("A1", Some("1"), Some("0101")),
        ("B2", Some("2"), Some("0202")),
        ("C3", Some("3"), Some("0303")),
    ])
    .failing_on(&["B2"]);

    run(connector.clone(), sku_list(&["A1", "B2", "C3"]), &output).await?;

    assert_eq!(connector.counters.lookups.load(Ordering::SeqCst), 3);
    assert_eq!(
        read_lines(&output),
        vec!["SKU,Net Weight,HSN Code", "A1,1,0101", "C3,3,0303"]
    );
    Ok(())
}

#[tokio::test]
async fn test_sku_file_with_blank_lines() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let sku_file = temp_dir.path().join("skus.txt");
    let output = temp_dir.path().join("output.csv");
    tokio::fs::write(&sku_file, "  A1  \n\n   \nB2\n").await?;
    let connector = MemoryConnector::with_rows(&[
        ("A1", Some("1"), Some("0101")),
        ("B2", Some("2"), Some("0202")),
    ]);

    run(connector.clone(), SkuSource::File(sku_file), &output).await?;

    assert_eq!(connector.counters.lookups.load(Ordering::SeqCst), 2);
    assert_eq!(read_lines(&output).len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_missing_sku_file_aborts_before_connecting() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output = temp_dir.path().join("output.csv");
    let connector = MemoryConnector::with_rows(&[("A1", None, None)]);

    let err = run(
        connector.clone(),
        SkuSource::File(temp_dir.path().join("missing.txt")),
        &output,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, EtlError::InputError { .. }));
    assert_eq!(connector.counters.connects.load(Ordering::SeqCst), 0);
    assert!(!output.exists());
    Ok(())
}

#[tokio::test]
async fn test_connection_failure_aborts_before_lookups() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output = temp_dir.path().join("output.csv");
    let connector = MemoryConnector::refusing();

    let err = run(connector.clone(), sku_list(&["A1"]), &output)
        .await
        .unwrap_err();

    assert!(matches!(err, EtlError::ConnectionError { .. }));
    assert_eq!(connector.counters.lookups.load(Ordering::SeqCst), 0);
    assert!(!output.exists());
    Ok(())
}

#[tokio::test]
async fn test_unwritable_output_is_fatal_after_close() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output = temp_dir.path().join("missing-dir").join("output.csv");
    let connector = MemoryConnector::with_rows(&[("A1", Some("1"), Some("0101"))]);

    let err = run(connector.clone(), sku_list(&["A1"]), &output)
        .await
        .unwrap_err();

    assert!(matches!(err, EtlError::OutputError { .. }));
    assert_eq!(err.exit_code(), 1);
    assert_eq!(connector.counters.closes.load(Ordering::SeqCst), 1);
    Ok(())
}
