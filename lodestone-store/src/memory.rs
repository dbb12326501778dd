//! In-memory reference store.

use std::collections::BTreeMap;
use std::sync::Mutex;

use lodestone_model::{RecordFields, StoredRecord};
use lodestone_types::{AttrMap, AttrValue, RecordId};

use crate::{ContentStore, RecordFilter, StoreError, StoreResult, LISTED_STATUSES, TRASHED_STATUS};

#[derive(Default)]
struct Inner {
    records: BTreeMap<RecordId, StoredRecord>,
    /// Insertion order, so queries are deterministic.
    order: Vec<RecordId>,
}

/// A [`ContentStore`] over a map, for tests and embedded use.
///
/// Queries walk records in insertion order, which keeps "first match wins"
/// behavior stable across runs.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held, trashed included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ContentStore for MemoryStore {
    fn insert(
        &self,
        record_type: &str,
        fields: &RecordFields,
        attrs: &AttrMap,
    ) -> StoreResult<RecordId> {
        let mut inner = self.inner.lock().unwrap();
        let id = RecordId::new();
        inner.records.insert(
            id,
            StoredRecord {
                id,
                record_type: record_type.to_string(),
                fields: fields.clone(),
                attrs: attrs.clone(),
            },
        );
        inner.order.push(id);
        Ok(id)
    }

    fn update(&self, id: RecordId, fields: &RecordFields) -> StoreResult<RecordId> {
        let mut inner = self.inner.lock().unwrap();
        let record = inner.records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        record.fields = fields.clone();
        Ok(id)
    }

    fn get(&self, id: RecordId) -> StoreResult<Option<StoredRecord>> {
        Ok(self.inner.lock().unwrap().records.get(&id).cloned())
    }

    fn set_attribute(&self, id: RecordId, key: &str, value: &AttrValue) -> StoreResult<()> {
        let mut inner = self.inner.lock().unwrap();
        let record = inner.records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        record.attrs.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn get_attribute(&self, id: RecordId, key: &str) -> StoreResult<Option<AttrValue>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .records
            .get(&id)
            .and_then(|record| record.attrs.get(key).cloned()))
    }

    fn delete_attribute(&self, id: RecordId, key: &str) -> StoreResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(record) = inner.records.get_mut(&id) {
            record.attrs.remove(key);
        }
        Ok(())
    }

    fn delete(&self, id: RecordId, permanent: bool) -> StoreResult<bool> {
        let mut inner = self.inner.lock().unwrap();
        if permanent {
            let existed = inner.records.remove(&id).is_some();
            inner.order.retain(|held| *held != id);
            Ok(existed)
        } else {
            match inner.records.get_mut(&id) {
                Some(record) => {
                    record.fields.status = TRASHED_STATUS.to_string();
                    Ok(true)
                }
                None => Ok(false),
            }
        }
    }

    fn query(
        &self,
        record_type: &str,
        filter: &RecordFilter,
        include_all_statuses: bool,
    ) -> StoreResult<Vec<RecordId>> {
        let inner = self.inner.lock().unwrap();
        let mut ids = Vec::new();
        for id in &inner.order {
            let Some(record) = inner.records.get(id) else {
                continue;
            };
            if record.record_type != record_type {
                continue;
            }
            if !include_all_statuses && !LISTED_STATUSES.contains(&record.fields.status.as_str()) {
                continue;
            }
            if filter.matches(&record.attrs) {
                ids.push(*id);
            }
        }
        Ok(ids)
    }
}
