use super::icon::AvatarIcon;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    pub id: String,
    pub name: String,
    pub total_points: u64,
    pub color: String, // theme color token, e.g. "#4dabf7"
    pub avatar: AvatarIcon,
}

/// Editable fields of a child. Points are only ever changed by settlement
/// or an explicit reset, so they are not part of the patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub avatar: Option<AvatarIcon>,
}

impl Child {
    pub fn apply(&mut self, patch: ChildPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(avatar) = patch.avatar {
            self.avatar = avatar;
        }
    }
}
