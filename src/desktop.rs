//! Tauri shell: command wrappers over [`crate::commands`] and the app builder.

use crate::commands::{backup, children, chores, ledger, settings, stats};
use crate::models::child::{Child, ChildPatch};
use crate::models::chore::{Chore, ChorePatch, NewChore};
use crate::models::completed_chore::CompletedChore;
use crate::models::icon::AvatarIcon;
use crate::models::stats::{ChildProgress, DayGroup, StatisticsReport};
use crate::state::AppState;
use std::collections::BTreeMap;
use tauri::{Manager, State};

#[tauri::command]
pub async fn list_children(state: State<'_, AppState>) -> Result<Vec<Child>, String> {
    children::list_children(&state).await
}

#[tauri::command]
pub async fn get_child(state: State<'_, AppState>, id: String) -> Result<Option<Child>, String> {
    children::get_child(&state, id).await
}

#[tauri::command]
pub async fn add_child(
    state: State<'_, AppState>,
    pin: String,
    name: String,
    color: String,
    avatar: AvatarIcon,
) -> Result<Child, String> {
    children::add_child(&state, pin, name, color, avatar).await
}

#[tauri::command]
pub async fn update_child(
    state: State<'_, AppState>,
    pin: String,
    id: String,
    patch: ChildPatch,
) -> Result<Child, String> {
    children::update_child(&state, pin, id, patch).await
}

#[tauri::command]
pub async fn delete_child(state: State<'_, AppState>, pin: String, id: String) -> Result<(), String> {
    children::delete_child(&state, pin, id).await
}

#[tauri::command]
pub async fn reset_child_points(
    state: State<'_, AppState>,
    pin: String,
    id: String,
) -> Result<(), String> {
    children::reset_child_points(&state, pin, id).await
}

#[tauri::command]
pub async fn reset_all_points(state: State<'_, AppState>, pin: String) -> Result<(), String> {
    children::reset_all_points(&state, pin).await
}

#[tauri::command]
pub async fn get_selected_child(state: State<'_, AppState>) -> Result<Option<Child>, String> {
    children::get_selected_child(&state).await
}

#[tauri::command]
pub async fn select_child(state: State<'_, AppState>, id: Option<String>) -> Result<(), String> {
    children::select_child(&state, id).await
}

#[tauri::command]
pub async fn list_chores(state: State<'_, AppState>) -> Result<Vec<Chore>, String> {
    chores::list_chores(&state).await
}

#[tauri::command]
pub async fn add_chore(
    state: State<'_, AppState>,
    pin: String,
    chore: NewChore,
) -> Result<Chore, String> {
    chores::add_chore(&state, pin, chore).await
}

#[tauri::command]
pub async fn update_chore(
    state: State<'_, AppState>,
    pin: String,
    id: String,
    patch: ChorePatch,
) -> Result<Chore, String> {
    chores::update_chore(&state, pin, id, patch).await
}

#[tauri::command]
pub async fn delete_chore(state: State<'_, AppState>, pin: String, id: String) -> Result<(), String> {
    chores::delete_chore(&state, pin, id).await
}

#[tauri::command]
pub async fn complete_chore(
    state: State<'_, AppState>,
    child_id: String,
    chore_id: String,
    points: u32,
) -> Result<Option<CompletedChore>, String> {
    ledger::complete_chore(&state, child_id, chore_id, points).await
}

#[tauri::command]
pub async fn delete_completed_chore(state: State<'_, AppState>, id: String) -> Result<(), String> {
    ledger::delete_completed_chore(&state, id).await
}

#[tauri::command]
pub async fn settle_child(
    state: State<'_, AppState>,
    pin: String,
    child_id: String,
) -> Result<u64, String> {
    ledger::settle_child(&state, pin, child_id).await
}

#[tauri::command]
pub async fn settle_all(
    state: State<'_, AppState>,
    pin: String,
) -> Result<BTreeMap<String, u64>, String> {
    ledger::settle_all(&state, pin).await
}

#[tauri::command]
pub async fn list_history(
    state: State<'_, AppState>,
    filter: Option<ledger::HistoryFilter>,
) -> Result<Vec<CompletedChore>, String> {
    ledger::list_history(&state, filter.unwrap_or_default()).await
}

#[tauri::command]
pub async fn history_by_day(state: State<'_, AppState>) -> Result<Vec<DayGroup>, String> {
    ledger::history_by_day(&state).await
}

#[tauri::command]
pub async fn get_statistics(state: State<'_, AppState>) -> Result<StatisticsReport, String> {
    stats::get_statistics(&state).await
}

#[tauri::command]
pub async fn get_child_progress(state: State<'_, AppState>) -> Result<Vec<ChildProgress>, String> {
    stats::get_child_progress(&state).await
}

#[tauri::command]
pub async fn export_data(state: State<'_, AppState>) -> Result<String, String> {
    backup::export_data(&state).await
}

#[tauri::command]
pub async fn export_data_to_file(state: State<'_, AppState>, path: String) -> Result<(), String> {
    backup::export_data_to_file(&state, path).await
}

#[tauri::command]
pub async fn import_data(state: State<'_, AppState>, pin: String, json: String) -> Result<(), String> {
    backup::import_data(&state, pin, json).await
}

#[tauri::command]
pub async fn import_data_from_file(
    state: State<'_, AppState>,
    pin: String,
    path: String,
) -> Result<(), String> {
    backup::import_data_from_file(&state, pin, path).await
}

#[tauri::command]
pub async fn get_settings(state: State<'_, AppState>) -> Result<serde_json::Value, String> {
    settings::get_settings(&state).await
}

#[tauri::command]
pub async fn save_settings(
    state: State<'_, AppState>,
    pin: String,
    update: serde_json::Value,
) -> Result<serde_json::Value, String> {
    settings::save_settings(&state, pin, update).await
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            let data_dir = app.path().app_data_dir()?;
            let state = AppState::open(&data_dir.to_string_lossy())?;
            log::info!("event=app_start data_dir={}", state.data_dir);
            app.manage(state);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            list_children,
            get_child,
            add_child,
            update_child,
            delete_child,
            reset_child_points,
            reset_all_points,
            get_selected_child,
            select_child,
            list_chores,
            add_chore,
            update_chore,
            delete_chore,
            complete_chore,
            delete_completed_chore,
            settle_child,
            settle_all,
            list_history,
            history_by_day,
            get_statistics,
            get_child_progress,
            export_data,
            export_data_to_file,
            import_data,
            import_data_from_file,
            get_settings,
            save_settings,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
