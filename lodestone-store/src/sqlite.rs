//! SQLite reference store.

use std::path::Path;
use std::sync::{Arc, Mutex};

use lodestone_model::{RecordFields, StoredRecord};
use lodestone_types::{AttrMap, AttrValue, RecordId};
use rusqlite::{params, Connection, OptionalExtension};

use crate::{ContentStore, RecordFilter, StoreError, StoreResult, LISTED_STATUSES, TRASHED_STATUS};

/// A [`ContentStore`] backed by a single SQLite file.
///
/// Attribute values live as JSON text in a side table, one row per key,
/// mirroring how the engine treats attributes: individually addressable,
/// no schema of their own.
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Opens (or creates) a store at the given path.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Opens an in-memory store (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS records (
                id TEXT PRIMARY KEY,
                record_type TEXT NOT NULL,
                title TEXT NOT NULL,
                body TEXT NOT NULL,
                excerpt TEXT NOT NULL,
                status TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS record_attrs (
                record_id TEXT NOT NULL,
                key TEXT NOT NULL,
                value TEXT NOT NULL,
                UNIQUE(record_id, key)
            );

            CREATE INDEX IF NOT EXISTS idx_record_attrs_key ON record_attrs(key, record_id);
            ",
        )?;
        Ok(())
    }

    fn record_exists(conn: &Connection, id: RecordId) -> StoreResult<bool> {
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM records WHERE id = ?1)",
            params![id.to_string()],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    fn load_attrs(conn: &Connection, id: RecordId) -> StoreResult<AttrMap> {
        let mut stmt = conn.prepare("SELECT key, value FROM record_attrs WHERE record_id = ?1")?;
        let rows = stmt.query_map(params![id.to_string()], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        let mut attrs = AttrMap::new();
        for row in rows {
            let (key, text) = row?;
            attrs.insert(key, serde_json::from_str(&text)?);
        }
        Ok(attrs)
    }
}

impl ContentStore for SqliteStore {
    fn insert(
        &self,
        record_type: &str,
        fields: &RecordFields,
        attrs: &AttrMap,
    ) -> StoreResult<RecordId> {
        let conn = self.conn.lock().unwrap();
        let id = RecordId::new();
        conn.execute(
            "INSERT INTO records (id, record_type, title, body, excerpt, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                id.to_string(),
                record_type,
                fields.title,
                fields.body,
                fields.excerpt,
                fields.status,
            ],
        )?;
        for (key, value) in attrs {
            conn.execute(
                "INSERT OR REPLACE INTO record_attrs (record_id, key, value) VALUES (?1, ?2, ?3)",
                params![id.to_string(), key, serde_json::to_string(value)?],
            )?;
        }
        Ok(id)
    }

    fn update(&self, id: RecordId, fields: &RecordFields) -> StoreResult<RecordId> {
        let conn = self.conn.lock().unwrap();
        let changed = conn.execute(
            "UPDATE records SET title = ?2, body = ?3, excerpt = ?4, status = ?5 WHERE id = ?1",
            params![
                id.to_string(),
                fields.title,
                fields.body,
                fields.excerpt,
                fields.status,
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(id)
    }

    fn get(&self, id: RecordId) -> StoreResult<Option<StoredRecord>> {
        let conn = self.conn.lock().unwrap();
        let row = conn
            .query_row(
                "SELECT record_type, title, body, excerpt, status FROM records WHERE id = ?1",
                params![id.to_string()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()?;
        let Some((record_type, title, body, excerpt, status)) = row else {
            return Ok(None);
        };
        let attrs = Self::load_attrs(&conn, id)?;
        Ok(Some(StoredRecord {
            id,
            record_type,
            fields: RecordFields {
                title,
                body,
                excerpt,
                status,
            },
            attrs,
        }))
    }

    fn set_attribute(&self, id: RecordId, key: &str, value: &AttrValue) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        if !Self::record_exists(&conn, id)? {
            return Err(StoreError::NotFound(id));
        }
        conn.execute(
            "INSERT OR REPLACE INTO record_attrs (record_id, key, value) VALUES (?1, ?2, ?3)",
            params![id.to_string(), key, serde_json::to_string(value)?],
        )?;
        Ok(())
    }

    fn get_attribute(&self, id: RecordId, key: &str) -> StoreResult<Option<AttrValue>> {
        let conn = self.conn.lock().unwrap();
        let text = conn
            .query_row(
                "SELECT value FROM record_attrs WHERE record_id = ?1 AND key = ?2",
                params![id.to_string(), key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        match text {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    fn delete_attribute(&self, id: RecordId, key: &str) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "DELETE FROM record_attrs WHERE record_id = ?1 AND key = ?2",
            params![id.to_string(), key],
        )?;
        Ok(())
    }

    fn delete(&self, id: RecordId, permanent: bool) -> StoreResult<bool> {
        let conn = self.conn.lock().unwrap();
        if permanent {
            conn.execute(
                "DELETE FROM record_attrs WHERE record_id = ?1",
                params![id.to_string()],
            )?;
            let removed =
                conn.execute("DELETE FROM records WHERE id = ?1", params![id.to_string()])?;
            Ok(removed > 0)
        } else {
            let changed = conn.execute(
                "UPDATE records SET status = ?2 WHERE id = ?1",
                params![id.to_string(), TRASHED_STATUS],
            )?;
            Ok(changed > 0)
        }
    }

    fn query(
        &self,
        record_type: &str,
        filter: &RecordFilter,
        include_all_statuses: bool,
    ) -> StoreResult<Vec<RecordId>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT r.id, r.status, a.value FROM records r
             JOIN record_attrs a ON a.record_id = r.id
             WHERE r.record_type = ?1 AND a.key = ?2
             ORDER BY r.rowid",
        )?;
        let rows = stmt.query_map(params![record_type, filter.key()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut ids = Vec::new();
        for row in rows {
            let (id_text, status, value_text) = row?;
            if !include_all_statuses && !LISTED_STATUSES.contains(&status.as_str()) {
                continue;
            }
            if let RecordFilter::AttrEquals { value, .. } = filter {
                let stored: AttrValue = serde_json::from_str(&value_text)?;
                if !stored.loosely_eq(value) {
                    continue;
                }
            }
            ids.push(RecordId::parse(&id_text)?);
        }
        Ok(ids)
    }
}
