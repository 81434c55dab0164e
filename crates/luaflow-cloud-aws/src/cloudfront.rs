//! Invalidation batch shaping and response flattening

use aws_sdk_cloudfront::types::{Invalidation as SdkInvalidation, InvalidationBatch, Paths};
use luaflow_cloud::{CloudError, Invalidation, Result};
use std::sync::atomic::{AtomicU64, Ordering};

const CALLER_REFERENCE_PREFIX: &str = "luaflow-cf";

static INVALIDATION_SEQ: AtomicU64 = AtomicU64::new(0);

/// Caller reference for one invalidation batch.
///
/// The API deduplicates batches by this token, so it must differ between
/// batches. A bare per-second timestamp collides under rapid repeated
/// calls; a process-wide monotonic counter keeps references within the
/// same second distinct.
pub fn caller_reference() -> String {
    let seq = INVALIDATION_SEQ.fetch_add(1, Ordering::Relaxed);
    format!(
        "{}-{}-{}",
        CALLER_REFERENCE_PREFIX,
        chrono::Utc::now().timestamp(),
        seq
    )
}

/// Copy the validated path list into an invalidation batch verbatim, with
/// an explicit item count equal to its length.
pub(crate) fn build_batch(paths: &[String], caller_reference: String) -> Result<InvalidationBatch> {
    let items = Paths::builder()
        .quantity(paths.len() as i32)
        .set_items(Some(paths.to_vec()))
        .build()
        .map_err(|e| CloudError::InvalidArgument(e.to_string()))?;

    InvalidationBatch::builder()
        .caller_reference(caller_reference)
        .paths(items)
        .build()
        .map_err(|e| CloudError::InvalidArgument(e.to_string()))
}

/// Flatten the create-invalidation response. A missing invalidation body
/// yields an empty record; the echoed path list is kept only when the
/// batch actually round-tripped with items.
pub(crate) fn flatten_invalidation(invalidation: Option<SdkInvalidation>) -> Invalidation {
    let Some(invalidation) = invalidation else {
        return Invalidation::default();
    };

    let paths = invalidation.invalidation_batch.paths.items;

    Invalidation {
        id: Some(invalidation.id),
        status: Some(invalidation.status),
        paths,
    }
}
