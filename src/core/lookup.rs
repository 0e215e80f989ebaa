use crate::core::{LookupOutcome, LookupReport, SkuGateway};
use std::io::Write;

/// Looks up each SKU in order, one query at a time.
///
/// A failed query is reported and treated like a missing SKU; it never aborts
/// the batch. Missing SKUs are reported on `out` as they are encountered and
/// query failures on `err`; the binary passes stdout and stderr.
pub async fn run_lookups<G, O, E>(
    gateway: &G,
    skus: &[String],
    out: &mut O,
    err: &mut E,
) -> LookupReport
where
    G: SkuGateway + ?Sized,
    O: Write + Send,
    E: Write + Send,
{
    let mut outcomes = Vec::with_capacity(skus.len());

    for sku in skus {
        let outcome = match gateway.lookup(sku).await {
            Ok(Some(record)) => {
                tracing::debug!("SKU {} found", sku);
                LookupOutcome::Found(record)
            }
            Ok(None) => {
                tracing::debug!("SKU {} has no matching row", sku);
                LookupOutcome::Missing {
                    sku: sku.clone(),
                    cause: None,
                }
            }
            Err(e) => {
                tracing::debug!(sku = %sku, "Lookup failed: {}", e.cause_message());
                // Console output is best effort.
                let _ = writeln!(err, "{}", e);
                LookupOutcome::Missing {
                    sku: sku.clone(),
                    cause: Some(e.cause_message()),
                }
            }
        };

        if let LookupOutcome::Missing { sku, .. } = &outcome {
            let _ = writeln!(out, "SKU {} not available", sku);
        }
        outcomes.push(outcome);
    }

    LookupReport { outcomes }
}
