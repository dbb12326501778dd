//! Drift detection between a definition and its stored record.

use lodestone_model::{Definition, StoredRecord};

/// Whether `record` differs from what `definition` declares.
///
/// Core fields compare exactly against the definition's materialized
/// fields. Declared attributes compare loosely, so a store that hands back
/// `"3"` for a stored `3` does not look permanently drifted. Stored
/// attributes the definition never mentions are ignored; only Force-Update
/// removes those.
#[must_use]
pub fn differs(record: &StoredRecord, definition: &Definition, default_status: &str) -> bool {
    if record.fields != definition.desired_fields(default_status) {
        return true;
    }
    definition
        .attrs
        .iter()
        .any(|(key, want)| match record.attrs.get(key) {
            Some(stored) => !stored.loosely_eq(want),
            None => true,
        })
}
