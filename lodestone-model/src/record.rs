use lodestone_types::{AttrMap, AttrValue, RecordId, ScalarValue, EDITED_ATTR, SLUG_ATTR};
use serde::{Deserialize, Serialize};

/// The core columns of a record, in the shape store writes take.
///
/// Unlike [`Definition`](crate::Definition), nothing here is optional; the
/// engine materializes defaults before anything reaches a store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFields {
    pub title: String,
    pub body: String,
    pub excerpt: String,
    pub status: String,
}

/// A record as the store holds it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: RecordId,
    pub record_type: String,
    pub fields: RecordFields,
    #[serde(default)]
    pub attrs: AttrMap,
}

impl StoredRecord {
    /// The slug annotation, present iff this record is engine-managed.
    #[must_use]
    pub fn managed_slug(&self) -> Option<&str> {
        self.attrs
            .get(SLUG_ATTR)
            .and_then(AttrValue::as_scalar)
            .and_then(ScalarValue::as_str)
    }

    /// Whether a human has touched this record since the engine last wrote it.
    #[must_use]
    pub fn is_manually_edited(&self) -> bool {
        self.attrs.get(EDITED_ATTR).is_some_and(AttrValue::is_truthy)
    }
}
