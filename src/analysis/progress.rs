use crate::ledger::sum_points;
use crate::models::child::Child;
use crate::models::completed_chore::CompletedChore;
use crate::models::stats::ChildProgress;

pub const LEVEL_TITLES: [&str; 7] = [
    "Beginner",
    "Rookie",
    "Challenger",
    "Expert",
    "Master",
    "Champion",
    "Legend",
];

/// Thresholds for levels and badges, normally read from settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressRules {
    pub points_per_level: u64,
    pub trophy_threshold: u64,
    pub medal_unsettled_count: usize,
}

impl Default for ProgressRules {
    fn default() -> Self {
        Self {
            points_per_level: 100,
            trophy_threshold: 500,
            medal_unsettled_count: 10,
        }
    }
}

/// Level starts at 1 and goes up every `points_per_level` settled points.
pub fn level_for(total_points: u64, rules: &ProgressRules) -> u64 {
    total_points / rules.points_per_level.max(1) + 1
}

pub fn title_for(level: u64) -> &'static str {
    let index = (level.max(1) - 1).min(LEVEL_TITLES.len() as u64 - 1);
    LEVEL_TITLES[index as usize]
}

pub fn child_progress(
    children: &[Child],
    ledger: &[CompletedChore],
    rules: &ProgressRules,
) -> Vec<ChildProgress> {
    children
        .iter()
        .map(|child| {
            let (settled, unsettled): (Vec<&CompletedChore>, Vec<&CompletedChore>) = ledger
                .iter()
                .filter(|entry| entry.child_id == child.id)
                .partition(|entry| entry.is_settled);

            let level = level_for(child.total_points, rules);
            let step = rules.points_per_level.max(1);

            ChildProgress {
                child_id: child.id.clone(),
                name: child.name.clone(),
                unsettled_points: sum_points(unsettled.iter().copied()),
                settled_points: sum_points(settled.iter().copied()),
                unsettled_count: unsettled.len(),
                total_points: child.total_points,
                level,
                level_progress: (child.total_points % step) * 100 / step,
                title: title_for(level).to_string(),
                has_trophy: child.total_points > rules.trophy_threshold,
                has_medal: unsettled.len() > rules.medal_unsettled_count,
            }
        })
        .collect()
}
