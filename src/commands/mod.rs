//! Operation layer called by the UI. Each function takes the shared
//! [`AppState`] and reports failures as prefixed strings.

pub mod backup;
pub mod children;
pub mod chores;
pub mod db;
pub mod ledger;
pub mod settings;
pub mod stats;

use crate::auth::GuardianPass;
use crate::error::StoreError;
use crate::state::AppState;
use crate::store::ChoreStore;

pub(crate) fn store_err(e: StoreError) -> String {
    format!("{}: {e}", e.code())
}

pub(crate) fn not_found(what: &str, id: &str) -> String {
    format!("NOT_FOUND: {what} {id} does not exist")
}

/// Runs a store operation on behalf of the guardian. The PIN is checked
/// before the store is locked.
pub(crate) fn with_guardian<T>(
    state: &AppState,
    pin: &str,
    op: impl FnOnce(&GuardianPass, &mut ChoreStore) -> Result<T, String>,
) -> Result<T, String> {
    let pass = state.guardian(pin)?;
    let mut store = state.store()?;
    op(&pass, &mut *store)
}
