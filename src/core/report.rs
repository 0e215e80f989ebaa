use crate::core::{ExportSummary, LookupReport, SkuRecord, Storage};
use crate::utils::error::{EtlError, Result};

pub const REPORT_HEADER: [&str; 3] = ["SKU", "Net Weight", "HSN Code"];

/// Renders records as CSV with the `SKU,Net Weight,HSN Code` header row.
pub fn render_csv<'a, I>(records: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a SkuRecord>,
{
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(REPORT_HEADER)?;
    for record in records {
        writer.write_record([&record.sku, &record.net_weight, &record.hsn_code])?;
    }

    writer
        .into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))
}

/// Writes the found SKUs of `report` to `path`. Nothing is written when no SKU
/// was found.
pub async fn write_report<S: Storage>(
    storage: &S,
    path: &str,
    report: &LookupReport,
) -> Result<ExportSummary> {
    let count = report.found_count();
    if count == 0 {
        tracing::info!("No SKUs found, skipping {}", path);
        return Ok(ExportSummary::NothingFound {
            missing: report.missing_count(),
        });
    }

    let data = render_csv(report.found()).map_err(|e| EtlError::OutputError {
        path: path.to_string(),
        message: e.cause_message(),
    })?;

    tracing::debug!("Writing {} rows ({} bytes) to {}", count, data.len(), path);
    storage
        .write_file(path, &data)
        .await
        .map_err(|e| EtlError::OutputError {
            path: path.to_string(),
            message: e.cause_message(),
        })?;

    Ok(ExportSummary::Exported {
        count,
        path: path.to_string(),
    })
}
