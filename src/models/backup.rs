use super::child::Child;
use super::chore::Chore;
use super::completed_chore::CompletedChore;
use serde::{Deserialize, Serialize};

pub const BACKUP_FORMAT_VERSION: &str = "1.0";

/// Downloadable backup document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    pub children: Vec<Child>,
    pub chores: Vec<Chore>,
    pub completed_chores: Vec<CompletedChore>,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub timestamp: String,
}
