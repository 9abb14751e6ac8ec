use crate::models::child::Child;
use crate::models::chore::Chore;
use crate::models::icon::{AvatarIcon, ChoreIcon};

/// Roster used on first launch or when stored children are unreadable.
pub fn default_children() -> Vec<Child> {
    vec![
        Child {
            id: "1".to_string(),
            name: "Child 1".to_string(),
            total_points: 0,
            color: "#4dabf7".to_string(),
            avatar: AvatarIcon::Smile,
        },
        Child {
            id: "2".to_string(),
            name: "Child 2".to_string(),
            total_points: 0,
            color: "#ff922b".to_string(),
            avatar: AvatarIcon::Heart,
        },
    ]
}

pub fn default_chores() -> Vec<Chore> {
    [
        ("1", "Wash the dishes", 50, ChoreIcon::Dish),
        ("2", "Clean up", 60, ChoreIcon::Broom),
        ("3", "Take out the trash", 50, ChoreIcon::Trash),
        ("4", "Do the laundry", 70, ChoreIcon::Shirt),
        ("5", "Tidy the room", 60, ChoreIcon::Box),
        ("6", "Help with cooking", 60, ChoreIcon::Dish),
        ("7", "Feed the goldfish", 20, ChoreIcon::Star),
        ("8", "Finish every bite", 80, ChoreIcon::Star),
        ("9", "Be kind", 100, ChoreIcon::Star),
    ]
    .into_iter()
    .map(|(id, name, points, icon_name)| Chore {
        id: id.to_string(),
        name: name.to_string(),
        points,
        icon_name,
    })
    .collect()
}

/// Palette offered when adding a child.
pub const CHILD_COLORS: &[&str] = &[
    "#4dabf7", "#ff922b", "#51cf66", "#ffd43b", "#ff6b6b", "#cc5de8",
];
