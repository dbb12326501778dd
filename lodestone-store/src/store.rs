//! The contract the engine reconciles against.

use lodestone_model::{RecordFields, StoredRecord};
use lodestone_types::{AttrMap, AttrValue, RecordId};

use crate::StoreResult;

/// Attribute predicates understood by [`ContentStore::query`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordFilter {
    /// Records whose attribute `key` loosely equals `value`.
    AttrEquals { key: String, value: AttrValue },
    /// Records that carry attribute `key` at all.
    AttrExists { key: String },
}

impl RecordFilter {
    /// Filter on `key` loosely equal to `value`.
    #[must_use]
    pub fn attr_equals(key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        Self::AttrEquals {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Filter on `key` being present.
    #[must_use]
    pub fn attr_exists(key: impl Into<String>) -> Self {
        Self::AttrExists { key: key.into() }
    }

    /// The attribute key this filter inspects.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::AttrEquals { key, .. } | Self::AttrExists { key } => key,
        }
    }

    /// Whether `attrs` satisfies this filter.
    ///
    /// Equality is the loose, store-flavored comparison; a record annotated
    /// with `"1"` matches a filter for `1`.
    #[must_use]
    pub fn matches(&self, attrs: &AttrMap) -> bool {
        match self {
            Self::AttrEquals { key, value } => attrs
                .get(key)
                .is_some_and(|stored| stored.loosely_eq(value)),
            Self::AttrExists { key } => attrs.contains_key(key),
        }
    }
}

/// The persistent record store the engine reconciles against.
///
/// Implementations wrap whatever the host application keeps content in.
/// The contract is deliberately narrow: core-field writes, per-attribute
/// reads and writes, deletion, and attribute-filtered queries. The store
/// serializes its own writes; the engine adds no locking of its own.
pub trait ContentStore: Send + Sync {
    /// Inserts a new record and returns its id.
    fn insert(
        &self,
        record_type: &str,
        fields: &RecordFields,
        attrs: &AttrMap,
    ) -> StoreResult<RecordId>;

    /// Rewrites the core fields of an existing record. Attributes are not
    /// touched.
    fn update(&self, id: RecordId, fields: &RecordFields) -> StoreResult<RecordId>;

    /// Fetches a record by id, in any lifecycle status.
    fn get(&self, id: RecordId) -> StoreResult<Option<StoredRecord>>;

    /// Sets (or overwrites) one attribute.
    fn set_attribute(&self, id: RecordId, key: &str, value: &AttrValue) -> StoreResult<()>;

    /// Reads one attribute; `None` when the key (or the record) is absent.
    fn get_attribute(&self, id: RecordId, key: &str) -> StoreResult<Option<AttrValue>>;

    /// Deletes one attribute. Deleting an absent key is a no-op.
    fn delete_attribute(&self, id: RecordId, key: &str) -> StoreResult<()>;

    /// Deletes a record: to the trash when `permanent` is false, outright
    /// when true. Returns whether a record was there to delete.
    fn delete(&self, id: RecordId, permanent: bool) -> StoreResult<bool>;

    /// Ids of `record_type` records matching `filter`, in insertion order.
    ///
    /// With `include_all_statuses` false only listed statuses are returned,
    /// the way a visitor-facing query would behave. The engine always passes
    /// true so trashed, hidden and draft records stay visible to it.
    fn query(
        &self,
        record_type: &str,
        filter: &RecordFilter,
        include_all_statuses: bool,
    ) -> StoreResult<Vec<RecordId>>;
}
