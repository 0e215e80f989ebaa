use crate::core::{SkuSource, Storage};
use crate::utils::error::{EtlError, Result};

/// Trims each directly supplied SKU. Entries left empty by trimming are kept.
pub fn normalize_list(raw: &[String]) -> Vec<String> {
    raw.iter().map(|sku| sku.trim().to_string()).collect()
}

/// One SKU per line; blank lines are dropped.
pub fn parse_sku_lines(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub async fn resolve_skus<S: Storage>(source: &SkuSource, storage: &S) -> Result<Vec<String>> {
    match source {
        SkuSource::List(raw) => Ok(normalize_list(raw)),
        SkuSource::File(path) => {
            let path = path.to_string_lossy().into_owned();
            tracing::debug!("Reading SKU file: {}", path);

            let data = storage
                .read_file(&path)
                .await
                .map_err(|e| EtlError::InputError {
                    path: path.clone(),
                    message: e.cause_message(),
                })?;

            let contents = String::from_utf8(data).map_err(|e| EtlError::InputError {
                path: path.clone(),
                message: format!("file is not valid UTF-8 ({})", e.utf8_error()),
            })?;

            Ok(parse_sku_lines(&contents))
        }
    }
}
