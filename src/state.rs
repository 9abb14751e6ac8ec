use crate::auth::{verify_guardian_pin, GuardianPass};
use crate::commands::settings::{load_effective_settings, EffectiveSettings};
use crate::store::storage::{KeyValueStorage, SqliteStorage};
use crate::store::ChoreStore;
use std::sync::{Mutex, MutexGuard};

/// Shared application state: the single entity store plus the directory
/// holding the database and settings file.
pub struct AppState {
    pub data_dir: String,
    store: Mutex<ChoreStore>,
}

impl AppState {
    /// Opens (or creates) the SQLite-backed store and settings in `data_dir`.
    pub fn open(data_dir: &str) -> Result<Self, String> {
        let storage = SqliteStorage::open(data_dir)
            .map_err(|e| format!("INIT_FAILED: Could not open database: {e}"))?;
        load_effective_settings(data_dir)
            .map_err(|e| format!("INIT_FAILED: Could not initialize settings: {e}"))?;
        Ok(Self::with_storage(data_dir, Box::new(storage)))
    }

    pub fn with_storage(data_dir: &str, storage: Box<dyn KeyValueStorage>) -> Self {
        Self {
            data_dir: data_dir.to_string(),
            store: Mutex::new(ChoreStore::load(storage)),
        }
    }

    pub fn store(&self) -> Result<MutexGuard<'_, ChoreStore>, String> {
        self.store.lock().map_err(|_| "Store lock error".to_string())
    }

    pub fn settings(&self) -> Result<EffectiveSettings, String> {
        load_effective_settings(&self.data_dir)
    }

    /// Checks the guardian PIN against the saved settings.
    pub fn guardian(&self, pin: &str) -> Result<GuardianPass, String> {
        let settings = self.settings()?;
        verify_guardian_pin(&settings.guardian_pin, pin).map_err(|e| format!("AUTH: {e}"))
    }
}
