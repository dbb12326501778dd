//! Garbage collection for withdrawn definitions.

use std::collections::BTreeSet;
use std::sync::Arc;

use lodestone_store::{ContentStore, RecordFilter};
use lodestone_types::{RecordId, SLUG_ATTR};
use tracing::{info, warn};

use crate::report::RunReport;

/// Deletes managed records whose slug is no longer declared.
///
/// Deletions run outside suppression scopes; the edit detector only
/// watches saves, and a deleted record has nothing left to flag.
pub struct Pruner {
    store: Arc<dyn ContentStore>,
}

impl Pruner {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// Sweeps one record type for managed records left behind by
    /// withdrawn definitions.
    ///
    /// Only records carrying the slug annotation are candidates; records
    /// the host created by hand are invisible here. A candidate survives
    /// if its slug is still declared or if it carries the edited flag.
    pub fn prune(
        &self,
        record_type: &str,
        declared_slugs: &BTreeSet<String>,
        processed: &BTreeSet<RecordId>,
        report: &mut RunReport,
    ) {
        let filter = RecordFilter::attr_exists(SLUG_ATTR);
        let ids = match self.store.query(record_type, &filter, true) {
            Ok(ids) => ids,
            Err(err) => {
                warn!(record_type, error = %err, "prune query failed, skipping sweep");
                report.failed += 1;
                return;
            }
        };

        for id in ids {
            if processed.contains(&id) {
                continue;
            }
            let record = match self.store.get(id) {
                Ok(Some(record)) => record,
                Ok(None) => continue,
                Err(err) => {
                    warn!(%id, error = %err, "failed to load prune candidate");
                    report.failed += 1;
                    continue;
                }
            };
            // A stale query can surface records the pass just touched; the
            // slug check keeps anything still declared safe regardless.
            if record
                .managed_slug()
                .is_some_and(|slug| declared_slugs.contains(slug))
            {
                continue;
            }
            if record.is_manually_edited() {
                info!(%id, record_type, "withdrawn record preserved due to manual edit");
                report.preserved += 1;
                continue;
            }
            match self.store.delete(id, true) {
                Ok(_) => {
                    info!(%id, record_type, "deleted withdrawn record");
                    report.deleted += 1;
                }
                Err(err) => {
                    warn!(%id, error = %err, "failed to delete withdrawn record");
                    report.failed += 1;
                }
            }
        }
    }
}
