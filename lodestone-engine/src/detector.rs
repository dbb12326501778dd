//! Detection of human edits to managed records.

use std::sync::Arc;

use lodestone_model::{SaveEvent, SaveOrigin};
use lodestone_store::ContentStore;
use lodestone_types::{AttrValue, EDITED_ATTR};
use tracing::{debug, info, warn};

use crate::guard::SuppressionGuard;

/// Watches save events and marks managed records a human has touched.
///
/// The flag is sticky: once set, smart updates leave the record alone
/// until a force pass clears it. Because a wrong flag pins a record
/// forever while a missed one costs at most one overwrite, every gate
/// here errs toward not flagging.
pub struct EditDetector {
    store: Arc<dyn ContentStore>,
    guard: SuppressionGuard,
}

impl EditDetector {
    pub fn new(store: Arc<dyn ContentStore>, guard: SuppressionGuard) -> Self {
        Self { store, guard }
    }

    /// The suppression guard this detector consults.
    #[must_use]
    pub fn guard(&self) -> &SuppressionGuard {
        &self.guard
    }

    /// Inspects one save event, setting the edited flag when it looks
    /// like a deliberate human edit of a managed record.
    ///
    /// Returns whether the flag was written.
    pub fn observe(&self, event: &SaveEvent) -> bool {
        if self.guard.is_suppressed() {
            debug!(id = %event.id, "save during reconciliation, ignoring");
            return false;
        }
        match event.origin {
            SaveOrigin::AdminUi => {}
            origin => {
                debug!(id = %event.id, ?origin, "save origin not an admin edit, ignoring");
                return false;
            }
        }
        if !event.actor_can_edit {
            debug!(id = %event.id, "actor lacks edit rights, ignoring");
            return false;
        }
        let Some(slug) = event.record.managed_slug() else {
            return false;
        };
        if event.record.is_manually_edited() {
            return false;
        }

        match self
            .store
            .set_attribute(event.id, EDITED_ATTR, &AttrValue::from(true))
        {
            Ok(()) => {
                info!(
                    id = %event.id,
                    slug,
                    "record manually edited, protecting from smart updates"
                );
                true
            }
            Err(err) => {
                // Swallowed on purpose; the next save of the same record
                // retries the write.
                warn!(id = %event.id, error = %err, "failed to set edited flag");
                false
            }
        }
    }
}
