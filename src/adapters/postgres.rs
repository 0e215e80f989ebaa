//! PostgreSQL-backed SKU gateway.
//!
//! One `tokio-postgres` session per run. The connection driver runs as a
//! spawned task owned by [`PostgresGateway`]; closing the gateway drops the
//! client and waits for the driver to finish, dropping it without closing
//! aborts the driver.

use crate::core::{ConnectionParameters, GatewayConnector, SkuGateway, SkuRecord};
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::error::Error as _;
use tokio::task::JoinHandle;
use tokio_postgres::{Client, NoTls};

/// Point lookup on the `sku` table. Columns are cast to text so any column
/// type decodes; weights are normalised afterwards by [`normalize_weight`].
pub const LOOKUP_SQL: &str =
    "SELECT sku_id::text, net_weight::text, hsn_code::text FROM sku WHERE sku_id = $1";

/// Drops the scale padding of fixed-scale `NUMERIC` text (`12.500` -> `12.5`).
/// Text that is not a decimal is returned unchanged.
pub fn normalize_weight(text: String) -> String {
    match Decimal::from_str_exact(text.trim()) {
        Ok(value) => value.normalize().to_string(),
        Err(_) => text,
    }
}

/// Cause text for a driver error. `tokio_postgres::Error` displays only
/// `db error` for server errors, so the server message or the source chain is
/// used instead.
pub fn describe_pg_error(e: &tokio_postgres::Error) -> String {
    if let Some(db) = e.as_db_error() {
        return db.to_string();
    }

    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[derive(Debug, Clone)]
pub struct PostgresConnector {
    params: ConnectionParameters,
}

impl PostgresConnector {
    pub fn new(params: ConnectionParameters) -> Self {
        Self { params }
    }

    fn pg_config(&self) -> tokio_postgres::Config {
        let mut config = tokio_postgres::Config::new();
        config
            .host(self.params.host.as_str())
            .port(self.params.port)
            .dbname(self.params.service.as_str())
            .user(self.params.user.as_str())
            .password(self.params.password.as_str())
            .application_name("sku-export");
        config
    }
}

#[async_trait]
impl GatewayConnector for PostgresConnector {
    type Gateway = PostgresGateway;

    async fn connect(&self) -> Result<PostgresGateway> {
        let (client, connection) = self
            .pg_config()
            .connect(NoTls)
            .await
            .map_err(|e| EtlError::ConnectionError {
                message: describe_pg_error(&e),
            })?;

        let driver = tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("Database connection error: {}", describe_pg_error(&e));
            }
        });

        tracing::debug!("Connected to {}", self.params.target());
        Ok(PostgresGateway {
            client: Some(client),
            driver: Some(driver),
        })
    }
}

pub struct PostgresGateway {
    client: Option<Client>,
    driver: Option<JoinHandle<()>>,
}

#[async_trait]
impl SkuGateway for PostgresGateway {
    async fn lookup(&self, sku: &str) -> Result<Option<SkuRecord>> {
        let query_error = |message: String| EtlError::QueryError {
            sku: sku.to_string(),
            message,
        };

        let client = self
            .client
            .as_ref()
            .ok_or_else(|| query_error("connection already closed".to_string()))?;

        let rows = client
            .query(LOOKUP_SQL, &[&sku])
            .await
            .map_err(|e| query_error(describe_pg_error(&e)))?;

        if rows.len() > 1 {
            tracing::warn!("SKU {} matched {} rows, using the first", sku, rows.len());
        }

        let Some(row) = rows.first() else {
            return Ok(None);
        };

        let column = |idx: usize| -> Result<Option<String>> {
            row.try_get(idx)
                .map_err(|e| query_error(describe_pg_error(&e)))
        };
        let sku_id = column(0)?;
        let net_weight = column(1)?;
        let hsn_code = column(2)?;

        Ok(Some(SkuRecord::new(
            sku_id.unwrap_or_else(|| sku.to_string()),
            net_weight.map(normalize_weight),
            hsn_code,
        )))
    }

    async fn close(&mut self) {
        // Dropping the last client makes the driver send Terminate and finish.
        drop(self.client.take());

        if let Some(driver) = self.driver.take() {
            if let Err(e) = driver.await {
                tracing::warn!("Connection task ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for PostgresGateway {
    fn drop(&mut self) {
        if let Some(driver) = self.driver.take() {
            tracing::debug!("Gateway dropped without close, aborting connection task");
            driver.abort();
        }
    }
}
