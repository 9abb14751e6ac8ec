use crate::analysis::{self, progress};
use crate::models::stats::{ChildProgress, StatisticsReport};
use crate::state::AppState;

pub async fn get_statistics(state: &AppState) -> Result<StatisticsReport, String> {
    let settings = state.settings()?;
    let store = state.store()?;
    Ok(analysis::statistics(&store, &settings.unknown_chore_label))
}

pub async fn get_child_progress(state: &AppState) -> Result<Vec<ChildProgress>, String> {
    let settings = state.settings()?;
    let store = state.store()?;
    Ok(progress::child_progress(
        store.children(),
        store.completed_chores(),
        &settings.progress_rules,
    ))
}
