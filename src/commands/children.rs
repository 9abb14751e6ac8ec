use super::{not_found, store_err, with_guardian};
use crate::models::child::{Child, ChildPatch};
use crate::models::icon::AvatarIcon;
use crate::state::AppState;

pub async fn list_children(state: &AppState) -> Result<Vec<Child>, String> {
    Ok(state.store()?.children().to_vec())
}

pub async fn get_child(state: &AppState, id: String) -> Result<Option<Child>, String> {
    Ok(state.store()?.child(&id).cloned())
}

pub async fn add_child(
    state: &AppState,
    pin: String,
    name: String,
    color: String,
    avatar: AvatarIcon,
) -> Result<Child, String> {
    with_guardian(state, &pin, |_pass, store| {
        store.add_child(&name, &color, avatar).map_err(store_err)
    })
}

pub async fn update_child(
    state: &AppState,
    pin: String,
    id: String,
    patch: ChildPatch,
) -> Result<Child, String> {
    with_guardian(state, &pin, |_pass, store| {
        if !store.update_child(&id, patch).map_err(store_err)? {
            return Err(not_found("child", &id));
        }
        store.child(&id).cloned().ok_or_else(|| not_found("child", &id))
    })
}

pub async fn delete_child(state: &AppState, pin: String, id: String) -> Result<(), String> {
    with_guardian(state, &pin, |_pass, store| {
        if store.delete_child(&id).map_err(store_err)? {
            Ok(())
        } else {
            Err(not_found("child", &id))
        }
    })
}

pub async fn reset_child_points(state: &AppState, pin: String, id: String) -> Result<(), String> {
    with_guardian(state, &pin, |_pass, store| {
        if store.reset_child_points(&id).map_err(store_err)? {
            Ok(())
        } else {
            Err(not_found("child", &id))
        }
    })
}

pub async fn reset_all_points(state: &AppState, pin: String) -> Result<(), String> {
    with_guardian(state, &pin, |_pass, store| {
        store.reset_all_points().map_err(store_err)
    })
}

pub async fn get_selected_child(state: &AppState) -> Result<Option<Child>, String> {
    let store = state.store()?;
    Ok(store
        .selected_child_id()
        .and_then(|id| store.child(id))
        .cloned())
}

/// Remembers the last child picked on the home screen; `None` clears it.
pub async fn select_child(state: &AppState, id: Option<String>) -> Result<(), String> {
    let mut store = state.store()?;
    if let Some(id) = id.as_deref() {
        if store.child(id).is_none() {
            return Err(not_found("child", id));
        }
    }
    store.set_selected_child(id.as_deref()).map_err(store_err)
}
