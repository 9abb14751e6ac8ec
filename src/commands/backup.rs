use super::store_err;
use crate::auth::GuardianPass;
use crate::state::AppState;

pub async fn export_data(state: &AppState) -> Result<String, String> {
    state.store()?.export_snapshot().map_err(store_err)
}

pub async fn export_data_to_file(state: &AppState, path: String) -> Result<(), String> {
    let json = export_data(state).await?;
    tokio::fs::write(&path, json)
        .await
        .map_err(|e| format!("EXPORT_FAILED: Could not write {path}: {e}"))?;
    log::info!("event=export status=ok path={path}");
    Ok(())
}

/// Replaces all data with the backup document. A rejected document leaves
/// everything as it was.
pub async fn import_data(state: &AppState, pin: String, json: String) -> Result<(), String> {
    let pass = state.guardian(&pin)?;
    restore(state, &pass, &json)
}

/// The PIN is checked before the file is read.
pub async fn import_data_from_file(state: &AppState, pin: String, path: String) -> Result<(), String> {
    let pass = state.guardian(&pin)?;
    let json = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| format!("IMPORT_FAILED: Could not read {path}: {e}"))?;
    restore(state, &pass, &json)
}

fn restore(state: &AppState, _pass: &GuardianPass, json: &str) -> Result<(), String> {
    state
        .store()?
        .restore_snapshot(json)
        .map_err(|e| format!("IMPORT_FAILED: {e}"))
}
