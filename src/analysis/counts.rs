use crate::models::child::Child;
use crate::models::chore::Chore;
use crate::models::completed_chore::CompletedChore;
use std::collections::{BTreeMap, HashMap};

/// Completions per child, keyed by display name. Entries whose child no
/// longer exists are skipped.
pub fn completions_by_child(children: &[Child], ledger: &[CompletedChore]) -> BTreeMap<String, usize> {
    let names = child_names(children);
    let mut counts = BTreeMap::new();
    for entry in ledger {
        if let Some(name) = names.get(entry.child_id.as_str()) {
            *counts.entry(name.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

/// Completions per chore, named after the current chore list.
pub fn completions_by_chore(
    chores: &[Chore],
    ledger: &[CompletedChore],
    unknown_label: &str,
) -> BTreeMap<String, usize> {
    let names = chore_names(chores);
    let mut counts = BTreeMap::new();
    for entry in ledger {
        let name = names
            .get(entry.chore_id.as_str())
            .copied()
            .unwrap_or(unknown_label);
        *counts.entry(name.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Child name → chore name → completions.
pub fn completions_by_child_and_chore(
    children: &[Child],
    chores: &[Chore],
    ledger: &[CompletedChore],
    unknown_label: &str,
) -> BTreeMap<String, BTreeMap<String, usize>> {
    let child_names = child_names(children);
    let chore_names = chore_names(chores);
    let mut counts: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();

    for entry in ledger {
        let Some(child_name) = child_names.get(entry.child_id.as_str()) else {
            continue;
        };
        let chore_name = chore_names
            .get(entry.chore_id.as_str())
            .copied()
            .unwrap_or(unknown_label);
        *counts
            .entry(child_name.to_string())
            .or_default()
            .entry(chore_name.to_string())
            .or_insert(0) += 1;
    }
    counts
}

/// Sum of points over every entry of each child, settled or not.
pub fn points_by_child(children: &[Child], ledger: &[CompletedChore]) -> BTreeMap<String, u64> {
    let names = child_names(children);
    let mut totals = BTreeMap::new();
    for entry in ledger {
        if let Some(name) = names.get(entry.child_id.as_str()) {
            *totals.entry(name.to_string()).or_insert(0) += u64::from(entry.points);
        }
    }
    totals
}

fn child_names(children: &[Child]) -> HashMap<&str, &str> {
    children
        .iter()
        .map(|child| (child.id.as_str(), child.name.as_str()))
        .collect()
}

fn chore_names(chores: &[Chore]) -> HashMap<&str, &str> {
    chores
        .iter()
        .map(|chore| (chore.id.as_str(), chore.name.as_str()))
        .collect()
}
