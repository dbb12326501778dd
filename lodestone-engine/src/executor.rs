//! Store write paths for the three reconcile outcomes.

use std::sync::Arc;

use lodestone_model::{Definition, StoredRecord};
use lodestone_store::ContentStore;
use lodestone_types::{is_reserved_key, AttrValue, RecordId, EDITED_ATTR, SLUG_ATTR};
use tracing::{debug, info};

use crate::diff::differs;
use crate::error::EngineResult;
use crate::guard::SuppressionGuard;

/// Outcome of one smart update attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The record was rewritten to match its definition.
    Updated,
    /// The record had drifted but carries the edited flag; left alone.
    SkippedEdited,
    /// The record already matched; nothing written.
    Unchanged,
}

/// Performs the store writes, each inside a suppression scope so the edit
/// detector never mistakes them for human edits.
pub struct WriteExecutor {
    store: Arc<dyn ContentStore>,
    guard: SuppressionGuard,
    default_status: String,
}

impl WriteExecutor {
    pub fn new(
        store: Arc<dyn ContentStore>,
        guard: SuppressionGuard,
        default_status: impl Into<String>,
    ) -> Self {
        Self {
            store,
            guard,
            default_status: default_status.into(),
        }
    }

    /// Creates the record for a definition that has none.
    ///
    /// The slug annotation goes in with the insert itself, so a crash can
    /// never leave an unannotated record behind for the next pass to
    /// duplicate.
    pub fn create(&self, record_type: &str, definition: &Definition) -> EngineResult<RecordId> {
        let _scope = self.guard.suppress();
        let fields = definition.desired_fields(&self.default_status);
        let mut attrs = definition.attrs.clone();
        attrs.insert(
            SLUG_ATTR.to_string(),
            AttrValue::from(definition.slug.as_str()),
        );
        let id = self.store.insert(record_type, &fields, &attrs)?;
        info!(record_type, slug = %definition.slug, %id, "created record");
        Ok(id)
    }

    /// Brings a drifted record back in line, unless a human got there first.
    ///
    /// Applies declared attributes additively; stored attributes the
    /// definition does not mention survive. The edited flag is never
    /// touched here.
    pub fn smart_update(
        &self,
        record: &StoredRecord,
        definition: &Definition,
    ) -> EngineResult<WriteOutcome> {
        if record.is_manually_edited() {
            info!(slug = %definition.slug, id = %record.id, "skipping manually edited record");
            return Ok(WriteOutcome::SkippedEdited);
        }
        if !differs(record, definition, &self.default_status) {
            debug!(slug = %definition.slug, id = %record.id, "record already matches");
            return Ok(WriteOutcome::Unchanged);
        }

        let _scope = self.guard.suppress();
        self.store
            .update(record.id, &definition.desired_fields(&self.default_status))?;
        for (key, value) in &definition.attrs {
            self.store.set_attribute(record.id, key, value)?;
        }
        info!(slug = %definition.slug, id = %record.id, "updated record");
        Ok(WriteOutcome::Updated)
    }

    /// Rewrites a record to match its definition exactly.
    ///
    /// Stored attributes the definition no longer declares are deleted,
    /// except reserved bookkeeping keys; the edited flag is cleared, the
    /// one sanctioned reset. Runs unconditionally, drift or not.
    pub fn force_update(&self, record: &StoredRecord, definition: &Definition) -> EngineResult<()> {
        let _scope = self.guard.suppress();
        self.store
            .update(record.id, &definition.desired_fields(&self.default_status))?;

        for key in record.attrs.keys() {
            if !is_reserved_key(key) && !definition.attrs.contains_key(key) {
                self.store.delete_attribute(record.id, key)?;
            }
        }
        for (key, value) in &definition.attrs {
            self.store.set_attribute(record.id, key, value)?;
        }
        self.store.delete_attribute(record.id, EDITED_ATTR)?;
        info!(slug = %definition.slug, id = %record.id, "force-updated record");
        Ok(())
    }
}
