//! Completed-chore ledger and points settlement.
//!
//! Points accrue to a child's `total_points` only when settled; completing or
//! deleting an entry never touches the total.

use crate::error::{StoreError, StoreResult};
use crate::models::completed_chore::{now_timestamp, CompletedChore};
use crate::store::ChoreStore;
use std::cmp::Ordering;

impl ChoreStore {
    /// Records one completion with the caller-supplied points value.
    ///
    /// Returns `Ok(None)` without touching state when the chore id does not
    /// resolve; stale chore references are tolerated.
    pub fn add_completed_chore(
        &mut self,
        child_id: &str,
        chore_id: &str,
        points: u32,
    ) -> StoreResult<Option<CompletedChore>> {
        let Some(chore) = self.chore(chore_id) else {
            log::warn!("event=complete status=skipped reason=unknown_chore chore_id={chore_id}");
            return Ok(None);
        };

        let entry = CompletedChore {
            id: uuid::Uuid::new_v4().to_string(),
            child_id: child_id.to_string(),
            chore_id: chore_id.to_string(),
            chore_name: chore.name.clone(),
            points,
            timestamp: now_timestamp(),
            is_settled: false,
        };
        self.completed_chores.push(entry.clone());
        log::info!(
            "event=complete entry_id={} child_id={child_id} chore_id={chore_id} points={points}",
            entry.id
        );

        self.persist()?;
        Ok(Some(entry))
    }

    /// Removes an entry whatever its settled state. Returns whether one existed.
    pub fn delete_completed_chore(&mut self, id: &str) -> StoreResult<bool> {
        let before = self.completed_chores.len();
        self.completed_chores.retain(|entry| entry.id != id);
        if self.completed_chores.len() == before {
            return Ok(false);
        }
        log::info!("event=complete_delete entry_id={id}");

        self.persist()?;
        Ok(true)
    }

    /// Folds every unsettled entry of `child_id` into the child's total and
    /// returns the amount moved. Zero means nothing changed, which includes an
    /// id with no matching child: orphaned entries are left as they are.
    ///
    /// Either both the entries and the total change, or neither does.
    pub fn settle_child_points(&mut self, child_id: &str) -> StoreResult<u64> {
        let Some(child_index) = self.children.iter().position(|child| child.id == child_id) else {
            let orphaned = self.unsettled_for(child_id).len();
            if orphaned > 0 {
                log::warn!(
                    "event=settle status=skipped reason=unknown_child child_id={child_id} entries={orphaned}"
                );
            }
            return Ok(0);
        };

        let amount = self.unsettled_points_for(child_id);
        if amount == 0 {
            return Ok(0);
        }

        let previous_total = self.children[child_index].total_points;
        let new_total = previous_total.checked_add(amount).ok_or_else(|| {
            StoreError::Validation(format!(
                "settling {amount} points would overflow the total of child {child_id}"
            ))
        })?;

        let flipped: Vec<usize> = self
            .completed_chores
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.child_id == child_id && !entry.is_settled)
            .map(|(index, _)| index)
            .collect();
        for &index in &flipped {
            self.completed_chores[index].is_settled = true;
        }
        self.children[child_index].total_points = new_total;

        if let Err(e) = self.persist() {
            for &index in &flipped {
                self.completed_chores[index].is_settled = false;
            }
            self.children[child_index].total_points = previous_total;
            return Err(e);
        }

        log::info!(
            "event=settle child_id={child_id} entries={} points={amount}",
            flipped.len()
        );
        Ok(amount)
    }

    /// Older name for [`ChoreStore::settle_child_points`].
    pub fn settle_points(&mut self, child_id: &str) -> StoreResult<u64> {
        self.settle_child_points(child_id)
    }

    pub fn unsettled_for(&self, child_id: &str) -> Vec<&CompletedChore> {
        self.completed_chores
            .iter()
            .filter(|entry| entry.child_id == child_id && !entry.is_settled)
            .collect()
    }

    pub fn settled_for(&self, child_id: &str) -> Vec<&CompletedChore> {
        self.completed_chores
            .iter()
            .filter(|entry| entry.child_id == child_id && entry.is_settled)
            .collect()
    }

    pub fn all_for(&self, child_id: &str) -> Vec<&CompletedChore> {
        self.completed_chores
            .iter()
            .filter(|entry| entry.child_id == child_id)
            .collect()
    }

    pub fn unsettled_points_for(&self, child_id: &str) -> u64 {
        sum_points(self.unsettled_for(child_id))
    }

    pub fn settled_points_for(&self, child_id: &str) -> u64 {
        sum_points(self.settled_for(child_id))
    }

    /// Whole ledger, newest first. Entries whose timestamp cannot be parsed
    /// come last, in their stored order.
    pub fn all_ordered_by_recency(&self) -> Vec<&CompletedChore> {
        order_by_recency(self.completed_chores.iter().collect())
    }
}

pub fn order_by_recency(mut entries: Vec<&CompletedChore>) -> Vec<&CompletedChore> {
    entries.sort_by(|a, b| match (a.completed_at(), b.completed_at()) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    entries
}

pub fn sum_points<'a>(entries: impl IntoIterator<Item = &'a CompletedChore>) -> u64 {
    entries.into_iter().map(|entry| u64::from(entry.points)).sum()
}
