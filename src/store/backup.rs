//! JSON backup and full-replace restore.

use super::ChoreStore;
use crate::error::{BackupError, StoreError, StoreResult};
use crate::models::backup::{BackupDocument, BACKUP_FORMAT_VERSION};
use crate::models::child::Child;
use crate::models::chore::{Chore, UNKNOWN_CHORE_LABEL};
use crate::models::completed_chore::{now_timestamp, CompletedChore};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

impl ChoreStore {
    pub fn snapshot(&self) -> BackupDocument {
        BackupDocument {
            children: self.children.clone(),
            chores: self.chores.clone(),
            completed_chores: self.completed_chores.clone(),
            version: BACKUP_FORMAT_VERSION.to_string(),
            timestamp: now_timestamp(),
        }
    }

    /// Serializes the current state; nothing is mutated.
    pub fn export_snapshot(&self) -> StoreResult<String> {
        serde_json::to_string(&self.snapshot())
            .map_err(|source| StoreError::Serialize { key: "backup", source })
    }

    /// Replaces all three collections from a backup document. On any failure
    /// the current state is kept and `false` is returned.
    pub fn import_snapshot(&mut self, json_text: &str) -> bool {
        match self.restore_snapshot(json_text) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("event=import status=rejected error={e}");
                false
            }
        }
    }

    /// Like [`ChoreStore::import_snapshot`] but reports why a document was
    /// rejected. Memory is rolled back when the new snapshot cannot be saved.
    pub fn restore_snapshot(&mut self, json_text: &str) -> Result<(), BackupError> {
        let document = parse_backup(json_text)?;

        let previous = (
            std::mem::take(&mut self.children),
            std::mem::take(&mut self.chores),
            std::mem::take(&mut self.completed_chores),
            self.selected_child_id.clone(),
        );

        if let Err(e) = self.replace_all(
            document.children,
            document.chores,
            document.completed_chores,
        ) {
            (
                self.children,
                self.chores,
                self.completed_chores,
                self.selected_child_id,
            ) = previous;
            return Err(e.into());
        }

        log::info!(
            "event=import status=ok version={} children={} chores={} completed_chores={}",
            document.version,
            self.children.len(),
            self.chores.len(),
            self.completed_chores.len()
        );
        Ok(())
    }
}

/// Shape-checks a backup document: the three collections must be present and
/// be arrays of well-formed records.
pub fn parse_backup(json_text: &str) -> Result<BackupDocument, BackupError> {
    let value: Value = serde_json::from_str(json_text)?;
    let object = value.as_object().ok_or(BackupError::NotAnObject)?;

    let children: Vec<Child> = collection(object, "children")?;
    let chores: Vec<Chore> = collection(object, "chores")?;
    let mut completed_chores: Vec<CompletedChore> = collection(object, "completedChores")?;

    for entry in completed_chores.iter_mut().filter(|e| e.chore_name.is_empty()) {
        entry.chore_name = chores
            .iter()
            .find(|chore| chore.id == entry.chore_id)
            .map(|chore| chore.name.clone())
            .unwrap_or_else(|| UNKNOWN_CHORE_LABEL.to_string());
    }

    Ok(BackupDocument {
        children,
        chores,
        completed_chores,
        version: string_field(object, "version"),
        timestamp: string_field(object, "timestamp"),
    })
}

fn collection<T: DeserializeOwned>(
    object: &Map<String, Value>,
    key: &'static str,
) -> Result<Vec<T>, BackupError> {
    let items = object
        .get(key)
        .filter(|value| value.is_array())
        .ok_or(BackupError::MissingCollection(key))?;

    serde_json::from_value(items.clone()).map_err(|source| BackupError::InvalidRecord {
        collection: key,
        source,
    })
}

fn string_field(object: &Map<String, Value>, key: &str) -> String {
    object
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::storage::{
        ReadOnlyStorage, CHILDREN_KEY, COMPLETED_CHORES_KEY, SELECTED_CHILD_KEY,
    };

    #[test]
    fn export_then_import_restores_every_record() {
        let mut store = ChoreStore::in_memory();
        store.add_completed_chore("1", "2", 60).unwrap();
        store.add_completed_chore("2", "3", 50).unwrap();
        store.settle_child_points("1").unwrap();
        let exported = store.export_snapshot().unwrap();

        let mut restored = ChoreStore::in_memory();
        restored.reset_all_points().unwrap();
        assert!(restored.import_snapshot(&exported));

        assert_eq!(restored.children(), store.children());
        assert_eq!(restored.chores(), store.chores());
        assert_eq!(restored.completed_chores(), store.completed_chores());
    }

    #[test]
    fn export_carries_version_and_timestamp() {
        let store = ChoreStore::in_memory();
        let value: Value = serde_json::from_str(&store.export_snapshot().unwrap()).unwrap();
        assert_eq!(value["version"], "1.0");
        assert!(value["timestamp"].as_str().is_some_and(|t| !t.is_empty()));
        assert!(value["completedChores"].is_array());
    }

    #[test]
    fn missing_collections_are_rejected_without_touching_state() {
        let mut store = ChoreStore::in_memory();
        store.add_completed_chore("1", "1", 50).unwrap();
        let before = store.snapshot();

        assert!(!store.import_snapshot(r#"{"children": []}"#));
        assert!(!store.import_snapshot(r#"{"children": [], "chores": {}, "completedChores": []}"#));
        assert!(!store.import_snapshot("not json"));
        assert!(!store.import_snapshot("[]"));

        assert_eq!(store.children(), before.children.as_slice());
        assert_eq!(store.chores(), before.chores.as_slice());
        assert_eq!(store.completed_chores(), before.completed_chores.as_slice());
    }

    #[test]
    fn malformed_records_are_rejected() {
        let err = parse_backup(
            r#"{"children": [{"id": 1}], "chores": [], "completedChores": []}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            BackupError::InvalidRecord {
                collection: "children",
                ..
            }
        ));
    }

    #[test]
    fn alternate_ledger_shape_is_backfilled_with_chore_names() {
        let document = parse_backup(
            r#"{
                "children": [],
                "chores": [{"id": "c1", "name": "Sweep", "points": 30, "iconName": "broom"}],
                "completedChores": [
                    {"id": "e1", "childId": "k", "choreId": "c1", "points": 30, "completedAt": "2024-02-02T10:00:00Z", "settled": false},
                    {"id": "e2", "childId": "k", "choreId": "gone", "points": 10, "completedAt": "2024-02-02T11:00:00Z", "settled": true}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(document.completed_chores[0].chore_name, "Sweep");
        assert_eq!(document.completed_chores[1].chore_name, UNKNOWN_CHORE_LABEL);
        assert!(document.version.is_empty());
    }

    #[test]
    fn failed_save_rolls_the_import_back_including_the_selection() {
        let mut store = ChoreStore::load(Box::new(ReadOnlyStorage::with_entries([
            (
                CHILDREN_KEY,
                r##"[{"id":"1","name":"Aki","totalPoints":30,"color":"#fff","avatar":"cat"}]"##,
            ),
            (
                COMPLETED_CHORES_KEY,
                r#"[{"id":"e1","childId":"1","choreId":"1","choreName":"Wash the dishes","points":50,"timestamp":"2024-01-01T08:00:00Z","isSettled":false}]"#,
            ),
            (SELECTED_CHILD_KEY, r#""1""#),
        ])));
        let before = store.snapshot();
        assert_eq!(store.selected_child_id(), Some("1"));

        let err = store
            .restore_snapshot(r#"{"children": [], "chores": [], "completedChores": []}"#)
            .unwrap_err();
        assert!(matches!(err, BackupError::Store(StoreError::Storage(_))));

        assert_eq!(store.children(), before.children.as_slice());
        assert_eq!(store.chores(), before.chores.as_slice());
        assert_eq!(store.completed_chores(), before.completed_chores.as_slice());
        assert_eq!(store.selected_child_id(), Some("1"));
    }
}
