pub mod etl;
pub mod input;
pub mod lookup;
pub mod pipeline;
pub mod report;

pub use crate::domain::model::{
    ConnectionParameters, ExportSummary, LookupOutcome, LookupReport, SkuRecord, SkuSource,
};
pub use crate::domain::ports::{ConfigProvider, GatewayConnector, Pipeline, SkuGateway, Storage};
pub use crate::utils::error::Result;
