use crate::core::{ExportSummary, Pipeline};
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<ExportSummary> {
        tracing::info!("Starting SKU export");

        // Extract
        let skus = self.pipeline.extract().await?;
        tracing::info!("Resolved {} SKUs", skus.len());

        // Transform
        let report = self.pipeline.transform(skus).await?;
        tracing::info!(
            "Lookup finished: {} found, {} missing",
            report.found_count(),
            report.missing_count()
        );

        // Load
        let summary = self.pipeline.load(report).await?;
        if let ExportSummary::Exported { count, path } = &summary {
            tracing::info!("Wrote {} rows to {}", count, path);
        }

        Ok(summary)
    }
}
