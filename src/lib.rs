pub mod analysis;
pub mod auth;
pub mod commands;
pub mod error;
pub mod ledger;
pub mod models;
pub mod state;
pub mod store;

#[cfg(feature = "desktop")]
pub mod desktop;

#[cfg(feature = "desktop")]
pub use desktop::run;

pub use error::{BackupError, StorageError, StoreError, StoreResult};
pub use state::AppState;
pub use store::ChoreStore;
