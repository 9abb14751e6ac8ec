use crate::commands::db;
use crate::error::StorageError;
use rusqlite::Connection;
use std::collections::BTreeMap;

pub const CHILDREN_KEY: &str = "children";
pub const CHORES_KEY: &str = "chores";
pub const COMPLETED_CHORES_KEY: &str = "completedChores";
pub const SELECTED_CHILD_KEY: &str = "selectedChildId";

/// String-keyed storage holding one JSON document per key.
pub trait KeyValueStorage: Send {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;

    /// Applies several writes; a `None` value removes the key. Backends that
    /// can should make this all-or-nothing.
    fn write_batch(&mut self, writes: &[(&str, Option<String>)]) -> Result<(), StorageError> {
        for (key, value) in writes {
            match value {
                Some(value) => self.set_item(key, value)?,
                None => self.remove_item(key)?,
            }
        }
        Ok(())
    }
}

pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn open(data_dir: &str) -> Result<Self, StorageError> {
        Ok(Self::new(db::get_db_connection(data_dir)?))
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        Ok(Self::new(db::open_in_memory()?))
    }
}

impl KeyValueStorage for SqliteStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(db::load_kv(&self.conn, key)?)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        Ok(db::upsert_kv(&self.conn, key, value)?)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        Ok(db::delete_kv(&self.conn, key)?)
    }

    fn write_batch(&mut self, writes: &[(&str, Option<String>)]) -> Result<(), StorageError> {
        Ok(db::write_kv_batch(&self.conn, writes)?)
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Storage whose reads come from fixed entries and whose writes always fail.
#[cfg(test)]
pub(crate) struct ReadOnlyStorage {
    inner: MemoryStorage,
}

#[cfg(test)]
impl ReadOnlyStorage {
    pub(crate) fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            inner: MemoryStorage::with_entries(entries),
        }
    }
}

#[cfg(test)]
impl KeyValueStorage for ReadOnlyStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_item(key)
    }

    fn set_item(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable(format!("write to {key} refused")))
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable(format!("remove of {key} refused")))
    }
}
