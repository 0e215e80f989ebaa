use crate::core::Storage;
use crate::utils::error::Result;

/// Local filesystem storage. Paths are used as given; parent directories are
/// not created.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = tokio::fs::read(path).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        tokio::fs::write(path, data).await?;
        Ok(())
    }
}
