//! Slug-annotation record lookup.

use std::sync::Arc;

use lodestone_model::StoredRecord;
use lodestone_store::{ContentStore, RecordFilter};
use lodestone_types::SLUG_ATTR;
use tracing::warn;

use crate::error::EngineResult;

/// Finds the stored record a definition corresponds to.
pub struct RecordLocator {
    store: Arc<dyn ContentStore>,
}

impl RecordLocator {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// The record of `record_type` annotated with `slug`, whatever its
    /// lifecycle status. Trashed and draft records count; a definition must
    /// never be re-created just because its record sits in the trash.
    ///
    /// Two records sharing one annotation is an anomaly (usually a manual
    /// copy made in the admin interface). The first match wins and the rest
    /// are left alone.
    pub fn find(&self, record_type: &str, slug: &str) -> EngineResult<Option<StoredRecord>> {
        let filter = RecordFilter::attr_equals(SLUG_ATTR, slug);
        let ids = self.store.query(record_type, &filter, true)?;
        if ids.len() > 1 {
            warn!(
                record_type,
                slug,
                matches = ids.len(),
                "multiple records share one slug annotation"
            );
        }
        for id in ids {
            if let Some(record) = self.store.get(id)? {
                return Ok(Some(record));
            }
        }
        Ok(None)
    }
}
