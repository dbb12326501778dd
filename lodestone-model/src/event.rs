use lodestone_types::RecordId;
use serde::{Deserialize, Serialize};

use crate::StoredRecord;

/// Where an administrative save came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveOrigin {
    /// A person pressed save in the admin interface.
    AdminUi,
    /// A programmatic write through the store's public API.
    Api,
    /// The admin interface's periodic background autosave.
    Autosave,
    /// A revision copy written alongside the real record.
    Revision,
    /// A bulk-edit action touching many records at once.
    BulkEdit,
    /// Store-internal bookkeeping writes.
    Internal,
}

/// A record save as reported by the host's save hook.
///
/// Hosts construct one of these per store mutation and hand it to the edit
/// detector, which decides whether the save counts as a human edit. The
/// engine never reports its own writes this way; when a host's store glue
/// does so anyway, the suppression guard keeps them from being counted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveEvent {
    /// The saved record's id, as the hook reports it.
    pub id: RecordId,
    /// The record after the save.
    pub record: StoredRecord,
    /// False for the initial insert, true for every later save.
    pub is_update: bool,
    pub origin: SaveOrigin,
    /// Whether the acting user holds edit rights on this record.
    pub actor_can_edit: bool,
}

impl SaveEvent {
    /// Creates a save event for `record`.
    #[must_use]
    pub fn new(
        record: StoredRecord,
        is_update: bool,
        origin: SaveOrigin,
        actor_can_edit: bool,
    ) -> Self {
        Self {
            id: record.id,
            record,
            is_update,
            origin,
            actor_can_edit,
        }
    }

    /// An admin-interface save of an existing record by a user with edit
    /// rights: the shape that qualifies as a manual edit.
    #[must_use]
    pub fn admin_edit(record: StoredRecord) -> Self {
        Self::new(record, true, SaveOrigin::AdminUi, true)
    }
}
