use super::icon::ChoreIcon;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chore {
    pub id: String,
    pub name: String,
    pub points: u32,
    pub icon_name: ChoreIcon,
}

/// A chore definition before the store assigns it an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChore {
    pub name: String,
    pub points: u32,
    #[serde(default)]
    pub icon_name: ChoreIcon,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChorePatch {
    pub name: Option<String>,
    pub points: Option<u32>,
    pub icon_name: Option<ChoreIcon>,
}

impl Chore {
    pub fn apply(&mut self, patch: ChorePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(points) = patch.points {
            self.points = points;
        }
        if let Some(icon_name) = patch.icon_name {
            self.icon_name = icon_name;
        }
    }
}

/// Display name used when a ledger entry's chore no longer exists.
pub const UNKNOWN_CHORE_LABEL: &str = "unknown";
