//! Well-known attribute keys.
//!
//! The engine correlates records with declarations and tracks human edits
//! through out-of-band attributes on the record itself. These keys all carry
//! the reserved prefix, which marks an attribute as engine (or host)
//! bookkeeping: Force-Update never deletes reserved keys when replacing a
//! record's attribute set, and definitions may not declare them.

/// Prefix marking an attribute key as internal bookkeeping.
pub const RESERVED_ATTR_PREFIX: &str = "_";

/// Attribute binding a stored record to the `slug` of its definition.
/// Written once at creation, never changed afterwards.
pub const SLUG_ATTR: &str = "_lodestone_slug";

/// Attribute marking a record as manually edited through the store's
/// administrative interface. Set only by the edit detector, cleared only
/// by a Force-Update.
pub const EDITED_ATTR: &str = "_lodestone_edited";

/// Returns true if the key is reserved for internal bookkeeping.
#[must_use]
pub fn is_reserved_key(key: &str) -> bool {
    key.starts_with(RESERVED_ATTR_PREFIX)
}
