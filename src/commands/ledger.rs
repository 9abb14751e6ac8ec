use super::{not_found, store_err, with_guardian};
use crate::analysis::calendar;
use crate::ledger::order_by_recency;
use crate::models::completed_chore::CompletedChore;
use crate::models::stats::DayGroup;
use crate::state::AppState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryFilter {
    pub child_id: Option<String>,
    pub settled: Option<bool>,
}

/// Records a completion. Unknown chores are ignored and yield `None`.
pub async fn complete_chore(
    state: &AppState,
    child_id: String,
    chore_id: String,
    points: u32,
) -> Result<Option<CompletedChore>, String> {
    let mut store = state.store()?;
    if store.child(&child_id).is_none() {
        return Err(not_found("child", &child_id));
    }
    store
        .add_completed_chore(&child_id, &chore_id, points)
        .map_err(store_err)
}

/// Undo for a mistaken tap. Settled entries are part of a child's banked
/// total and stay put.
pub async fn delete_completed_chore(state: &AppState, id: String) -> Result<(), String> {
    let mut store = state.store()?;
    let entry = store
        .completed_chores()
        .iter()
        .find(|entry| entry.id == id)
        .ok_or_else(|| not_found("completed chore", &id))?;
    if entry.is_settled {
        return Err(format!("INVALID: completed chore {id} is already settled"));
    }
    store.delete_completed_chore(&id).map_err(store_err)?;
    Ok(())
}

pub async fn settle_child(state: &AppState, pin: String, child_id: String) -> Result<u64, String> {
    with_guardian(state, &pin, |_pass, store| {
        if store.child(&child_id).is_none() {
            return Err(not_found("child", &child_id));
        }
        store.settle_child_points(&child_id).map_err(store_err)
    })
}

/// Settles every child and reports the points moved per child id.
pub async fn settle_all(state: &AppState, pin: String) -> Result<BTreeMap<String, u64>, String> {
    with_guardian(state, &pin, |_pass, store| {
        let child_ids: Vec<String> = store.children().iter().map(|c| c.id.clone()).collect();
        let mut results = BTreeMap::new();
        for child_id in child_ids {
            let moved = store.settle_child_points(&child_id).map_err(store_err)?;
            results.insert(child_id, moved);
        }
        log::info!(
            "event=settle_all children={} points={}",
            results.len(),
            results.values().sum::<u64>()
        );
        Ok(results)
    })
}

/// Ledger entries newest first, optionally narrowed to one child and/or
/// one settled state.
pub async fn list_history(
    state: &AppState,
    filter: HistoryFilter,
) -> Result<Vec<CompletedChore>, String> {
    let store = state.store()?;
    let selected: Vec<&CompletedChore> = store
        .completed_chores()
        .iter()
        .filter(|entry| {
            filter
                .child_id
                .as_deref()
                .map_or(true, |child_id| entry.child_id == child_id)
        })
        .filter(|entry| filter.settled.map_or(true, |settled| entry.is_settled == settled))
        .collect();

    Ok(order_by_recency(selected).into_iter().cloned().collect())
}

pub async fn history_by_day(state: &AppState) -> Result<Vec<DayGroup>, String> {
    let store = state.store()?;
    Ok(calendar::history_by_day(store.completed_chores()))
}
