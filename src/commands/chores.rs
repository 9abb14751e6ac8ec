use super::{not_found, store_err, with_guardian};
use crate::models::chore::{Chore, ChorePatch, NewChore};
use crate::state::AppState;

pub async fn list_chores(state: &AppState) -> Result<Vec<Chore>, String> {
    Ok(state.store()?.chores().to_vec())
}

pub async fn add_chore(state: &AppState, pin: String, chore: NewChore) -> Result<Chore, String> {
    with_guardian(state, &pin, |_pass, store| {
        store.add_chore(chore).map_err(store_err)
    })
}

pub async fn update_chore(
    state: &AppState,
    pin: String,
    id: String,
    patch: ChorePatch,
) -> Result<Chore, String> {
    with_guardian(state, &pin, |_pass, store| {
        if !store.update_chore(&id, patch).map_err(store_err)? {
            return Err(not_found("chore", &id));
        }
        store.chore(&id).cloned().ok_or_else(|| not_found("chore", &id))
    })
}

pub async fn delete_chore(state: &AppState, pin: String, id: String) -> Result<(), String> {
    with_guardian(state, &pin, |_pass, store| {
        if store.delete_chore(&id).map_err(store_err)? {
            Ok(())
        } else {
            Err(not_found("chore", &id))
        }
    })
}
