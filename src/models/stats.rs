use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Six fixed local-time ranges a completion can fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Morning,
    Forenoon,
    Afternoon,
    Evening,
    Night,
    LateNight,
}

impl TimeOfDay {
    pub const ALL: [TimeOfDay; 6] = [
        TimeOfDay::Morning,
        TimeOfDay::Forenoon,
        TimeOfDay::Afternoon,
        TimeOfDay::Evening,
        TimeOfDay::Night,
        TimeOfDay::LateNight,
    ];

    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=8 => TimeOfDay::Morning,
            9..=11 => TimeOfDay::Forenoon,
            12..=14 => TimeOfDay::Afternoon,
            15..=17 => TimeOfDay::Evening,
            18..=20 => TimeOfDay::Night,
            _ => TimeOfDay::LateNight,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "06:00-09:00",
            TimeOfDay::Forenoon => "09:00-12:00",
            TimeOfDay::Afternoon => "12:00-15:00",
            TimeOfDay::Evening => "15:00-18:00",
            TimeOfDay::Night => "18:00-21:00",
            TimeOfDay::LateNight => "21:00-06:00",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayCount {
    pub weekday: Weekday,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeOfDayCount {
    pub bucket: TimeOfDay,
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayGroup {
    pub date: NaiveDate,
    pub total_points: u64,
    pub entry_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildProgress {
    pub child_id: String,
    pub name: String,
    pub unsettled_points: u64,
    pub settled_points: u64,
    pub unsettled_count: usize,
    pub total_points: u64,
    pub level: u64,
    pub level_progress: u64, // percent of the way to the next level
    pub title: String,
    pub has_trophy: bool,
    pub has_medal: bool,
}

/// Everything the statistics screen shows, recomputed on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsReport {
    pub total_completions: usize,
    pub total_points: u64,
    pub completions_by_child: BTreeMap<String, usize>,
    pub completions_by_chore: BTreeMap<String, usize>,
    pub completions_by_child_and_chore: BTreeMap<String, BTreeMap<String, usize>>,
    pub points_by_child: BTreeMap<String, u64>,
    pub by_weekday: Vec<WeekdayCount>,
    pub by_time_of_day: Vec<TimeOfDayCount>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hours_map_onto_the_six_ranges() {
        assert_eq!(TimeOfDay::from_hour(6), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(8), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(9), TimeOfDay::Forenoon);
        assert_eq!(TimeOfDay::from_hour(14), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(17), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(20), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(21), TimeOfDay::LateNight);
        assert_eq!(TimeOfDay::from_hour(0), TimeOfDay::LateNight);
        assert_eq!(TimeOfDay::from_hour(5), TimeOfDay::LateNight);
    }
}
