//! Entity store: children, chores and the completed-chore ledger.
//!
//! Every mutation updates memory first and then writes all three collections
//! back to storage in one batch. Reads never touch storage.

pub mod backup;
pub mod defaults;
pub mod storage;

use crate::error::{StoreError, StoreResult};
use crate::models::child::{Child, ChildPatch};
use crate::models::chore::{Chore, ChorePatch, NewChore};
use crate::models::completed_chore::CompletedChore;
use crate::models::icon::AvatarIcon;
use serde::de::DeserializeOwned;
use serde::Serialize;
use storage::{
    KeyValueStorage, MemoryStorage, CHILDREN_KEY, CHORES_KEY, COMPLETED_CHORES_KEY,
    SELECTED_CHILD_KEY,
};

pub struct ChoreStore {
    pub(crate) children: Vec<Child>,
    pub(crate) chores: Vec<Chore>,
    pub(crate) completed_chores: Vec<CompletedChore>,
    selected_child_id: Option<String>,
    storage: Box<dyn KeyValueStorage>,
}

impl ChoreStore {
    /// Rehydrates each collection independently. A missing or unreadable key
    /// falls back to the built-in dataset (children, chores) or an empty ledger.
    pub fn load(storage: Box<dyn KeyValueStorage>) -> Self {
        let children = load_collection(storage.as_ref(), CHILDREN_KEY, defaults::default_children);
        let chores = load_collection(storage.as_ref(), CHORES_KEY, defaults::default_chores);
        let completed_chores = load_collection(storage.as_ref(), COMPLETED_CHORES_KEY, Vec::new);
        let selected_child_id =
            load_collection::<Option<String>>(storage.as_ref(), SELECTED_CHILD_KEY, || None);

        log::info!(
            "event=store_load children={} chores={} completed_chores={}",
            children.len(),
            chores.len(),
            completed_chores.len()
        );

        Self {
            children,
            chores,
            completed_chores,
            selected_child_id,
            storage,
        }
    }

    /// Default dataset backed by throwaway memory storage.
    pub fn in_memory() -> Self {
        Self::load(Box::new(MemoryStorage::new()))
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    pub fn chores(&self) -> &[Chore] {
        &self.chores
    }

    pub fn completed_chores(&self) -> &[CompletedChore] {
        &self.completed_chores
    }

    pub fn child(&self, id: &str) -> Option<&Child> {
        self.children.iter().find(|child| child.id == id)
    }

    pub fn chore(&self, id: &str) -> Option<&Chore> {
        self.chores.iter().find(|chore| chore.id == id)
    }

    pub fn selected_child_id(&self) -> Option<&str> {
        self.selected_child_id.as_deref()
    }

    pub fn storage(&self) -> &dyn KeyValueStorage {
        self.storage.as_ref()
    }

    // ---- children ----

    pub fn add_child(&mut self, name: &str, color: &str, avatar: AvatarIcon) -> StoreResult<Child> {
        let name = required_name(name, "child name")?;
        let color = if color.trim().is_empty() {
            let palette = defaults::CHILD_COLORS;
            palette[self.children.len() % palette.len()].to_string()
        } else {
            color.trim().to_string()
        };

        let child = Child {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            total_points: 0,
            color,
            avatar,
        };
        self.children.push(child.clone());
        log::info!("event=child_add child_id={}", child.id);

        self.persist()?;
        Ok(child)
    }

    /// Returns `false` (and writes nothing) when no child has this id.
    pub fn update_child(&mut self, id: &str, patch: ChildPatch) -> StoreResult<bool> {
        let patch = ChildPatch {
            name: patch
                .name
                .map(|name| required_name(&name, "child name"))
                .transpose()?,
            ..patch
        };

        let Some(child) = self.children.iter_mut().find(|child| child.id == id) else {
            return Ok(false);
        };
        child.apply(patch);
        log::debug!("event=child_update child_id={id}");

        self.persist()?;
        Ok(true)
    }

    /// Removes the child and every ledger entry that belongs to it.
    pub fn delete_child(&mut self, id: &str) -> StoreResult<bool> {
        let before = self.children.len();
        self.children.retain(|child| child.id != id);
        if self.children.len() == before {
            return Ok(false);
        }

        let removed = remove_where(&mut self.completed_chores, |entry| entry.child_id == id);
        if self.selected_child_id.as_deref() == Some(id) {
            self.selected_child_id = None;
        }
        log::info!("event=child_delete child_id={id} cascaded_entries={removed}");

        self.persist()?;
        Ok(true)
    }

    /// Zeroes the child's total and drops its whole history.
    pub fn reset_child_points(&mut self, id: &str) -> StoreResult<bool> {
        let Some(child) = self.children.iter_mut().find(|child| child.id == id) else {
            return Ok(false);
        };
        child.total_points = 0;

        let removed = remove_where(&mut self.completed_chores, |entry| entry.child_id == id);
        log::info!("event=child_reset child_id={id} removed_entries={removed}");

        self.persist()?;
        Ok(true)
    }

    pub fn reset_all_points(&mut self) -> StoreResult<()> {
        for child in &mut self.children {
            child.total_points = 0;
        }
        let removed = self.completed_chores.len();
        self.completed_chores.clear();
        log::info!("event=reset_all removed_entries={removed}");

        self.persist()
    }

    pub fn set_selected_child(&mut self, id: Option<&str>) -> StoreResult<()> {
        self.selected_child_id = id.map(str::to_string);
        self.persist()
    }

    // ---- chores ----

    pub fn add_chore(&mut self, chore: NewChore) -> StoreResult<Chore> {
        let name = required_name(&chore.name, "chore name")?;
        let points = required_points(chore.points)?;

        let chore = Chore {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            points,
            icon_name: chore.icon_name,
        };
        self.chores.push(chore.clone());
        log::info!("event=chore_add chore_id={} points={}", chore.id, chore.points);

        self.persist()?;
        Ok(chore)
    }

    /// Ledger entries keep the name and points copied at completion time.
    pub fn update_chore(&mut self, id: &str, patch: ChorePatch) -> StoreResult<bool> {
        let patch = ChorePatch {
            name: patch
                .name
                .map(|name| required_name(&name, "chore name"))
                .transpose()?,
            points: patch.points.map(required_points).transpose()?,
            ..patch
        };

        let Some(chore) = self.chores.iter_mut().find(|chore| chore.id == id) else {
            return Ok(false);
        };
        chore.apply(patch);
        log::debug!("event=chore_update chore_id={id}");

        self.persist()?;
        Ok(true)
    }

    /// Removes the chore and every ledger entry that references it.
    pub fn delete_chore(&mut self, id: &str) -> StoreResult<bool> {
        let before = self.chores.len();
        self.chores.retain(|chore| chore.id != id);
        if self.chores.len() == before {
            return Ok(false);
        }

        let removed = remove_where(&mut self.completed_chores, |entry| entry.chore_id == id);
        log::info!("event=chore_delete chore_id={id} cascaded_entries={removed}");

        self.persist()?;
        Ok(true)
    }

    // ---- persistence ----

    /// Writes the three collections and the selected child as one batch, so
    /// storage holds either the old snapshot or the new one.
    pub fn persist(&mut self) -> StoreResult<()> {
        let writes = [
            (CHILDREN_KEY, Some(encode(CHILDREN_KEY, &self.children)?)),
            (CHORES_KEY, Some(encode(CHORES_KEY, &self.chores)?)),
            (
                COMPLETED_CHORES_KEY,
                Some(encode(COMPLETED_CHORES_KEY, &self.completed_chores)?),
            ),
            (
                SELECTED_CHILD_KEY,
                self.selected_child_id
                    .as_deref()
                    .map(|id| serde_json::Value::from(id).to_string()),
            ),
        ];

        if let Err(e) = self.storage.write_batch(&writes) {
            log::error!("event=store_persist status=error error={e}");
            return Err(e.into());
        }
        Ok(())
    }

    /// Swaps in whole collections (used by restore).
    pub(crate) fn replace_all(
        &mut self,
        children: Vec<Child>,
        chores: Vec<Chore>,
        completed_chores: Vec<CompletedChore>,
    ) -> StoreResult<()> {
        self.children = children;
        self.chores = chores;
        self.completed_chores = completed_chores;
        if let Some(selected) = self.selected_child_id.clone() {
            if self.child(&selected).is_none() {
                self.selected_child_id = None;
            }
        }
        self.persist()
    }
}

fn load_collection<T: DeserializeOwned>(
    storage: &dyn KeyValueStorage,
    key: &str,
    fallback: impl FnOnce() -> T,
) -> T {
    match storage.get_item(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("event=store_load key={key} status=malformed error={e}");
                fallback()
            }
        },
        Ok(None) => fallback(),
        Err(e) => {
            log::warn!("event=store_load key={key} status=unreadable error={e}");
            fallback()
        }
    }
}

fn encode<T: Serialize>(key: &'static str, value: &T) -> StoreResult<String> {
    serde_json::to_string(value).map_err(|source| StoreError::Serialize { key, source })
}

fn remove_where<T>(items: &mut Vec<T>, predicate: impl Fn(&T) -> bool) -> usize {
    let before = items.len();
    items.retain(|item| !predicate(item));
    before - items.len()
}

fn required_name(raw: &str, what: &str) -> StoreResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(StoreError::Validation(format!("{what} must not be empty")));
    }
    Ok(trimmed.to_string())
}

fn required_points(points: u32) -> StoreResult<u32> {
    if points == 0 {
        return Err(StoreError::Validation(
            "chore points must be greater than zero".to_string(),
        ));
    }
    Ok(points)
}
