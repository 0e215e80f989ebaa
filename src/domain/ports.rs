use crate::domain::model::{
    ConnectionParameters, ExportSummary, LookupReport, SkuRecord, SkuSource,
};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn connection(&self) -> &ConnectionParameters;
    fn sku_source(&self) -> &SkuSource;
    fn output_path(&self) -> &str;
}

/// An open session against the SKU store.
#[async_trait]
pub trait SkuGateway: Send + Sync {
    /// Point lookup of one SKU. `Ok(None)` when no row matches.
    async fn lookup(&self, sku: &str) -> Result<Option<SkuRecord>>;

    /// Releases the session. Calling it again is a no-op.
    async fn close(&mut self);
}

#[async_trait]
pub trait GatewayConnector: Send + Sync {
    type Gateway: SkuGateway;

    async fn connect(&self) -> Result<Self::Gateway>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<String>>;
    async fn transform(&self, skus: Vec<String>) -> Result<LookupReport>;
    async fn load(&self, report: LookupReport) -> Result<ExportSummary>;
}
