use crate::core::input::resolve_skus;
use crate::core::lookup::run_lookups;
use crate::core::report::write_report;
use crate::core::{
    ConfigProvider, ExportSummary, GatewayConnector, LookupReport, Pipeline, SkuGateway, Storage,
};
use crate::utils::error::Result;

/// SKU export pipeline: resolve the SKU list, look every SKU up over a single
/// database session, write the found rows as CSV.
pub struct SkuPipeline<S: Storage, C: ConfigProvider, G: GatewayConnector> {
    storage: S,
    config: C,
    connector: G,
}

impl<S: Storage, C: ConfigProvider, G: GatewayConnector> SkuPipeline<S, C, G> {
    pub fn new(storage: S, config: C, connector: G) -> Self {
        Self {
            storage,
            config,
            connector,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, G: GatewayConnector> Pipeline for SkuPipeline<S, C, G> {
    async fn extract(&self) -> Result<Vec<String>> {
        resolve_skus(self.config.sku_source(), &self.storage).await
    }

    async fn transform(&self, skus: Vec<String>) -> Result<LookupReport> {
        tracing::info!(
            "Connecting to {} as {}",
            self.config.connection().target(),
            self.config.connection().user
        );
        let mut gateway = self.connector.connect().await?;

        let report = run_lookups(
            &gateway,
            &skus,
            &mut std::io::stdout(),
            &mut std::io::stderr(),
        )
        .await;

        // Early exits (panics) are covered by the gateway's Drop.
        gateway.close().await;
        tracing::debug!("Database session closed");

        Ok(report)
    }

    async fn load(&self, report: LookupReport) -> Result<ExportSummary> {
        write_report(&self.storage, self.config.output_path(), &report).await
    }
}
