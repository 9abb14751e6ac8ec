//! Read-side views recomputed from the ledger on every call.

pub mod calendar;
pub mod counts;
pub mod progress;

use crate::models::stats::StatisticsReport;
use crate::store::ChoreStore;
use chrono::{Local, TimeZone};

pub fn statistics(store: &ChoreStore, unknown_label: &str) -> StatisticsReport {
    statistics_in(store, unknown_label, &Local)
}

pub fn statistics_in<Tz: TimeZone>(
    store: &ChoreStore,
    unknown_label: &str,
    tz: &Tz,
) -> StatisticsReport {
    let ledger = store.completed_chores();
    let children = store.children();
    let chores = store.chores();

    StatisticsReport {
        total_completions: ledger.len(),
        total_points: crate::ledger::sum_points(ledger),
        completions_by_child: counts::completions_by_child(children, ledger),
        completions_by_chore: counts::completions_by_chore(chores, ledger, unknown_label),
        completions_by_child_and_chore: counts::completions_by_child_and_chore(
            children,
            chores,
            ledger,
            unknown_label,
        ),
        points_by_child: counts::points_by_child(children, ledger),
        by_weekday: calendar::weekday_counts_in(ledger, tz),
        by_time_of_day: calendar::time_of_day_counts_in(ledger, tz),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::completed_chore::CompletedChore;
    use chrono::Utc;

    #[test]
    fn report_counts_undated_entries_in_totals_only() {
        let mut store = ChoreStore::in_memory();
        store.completed_chores = vec![
            CompletedChore {
                id: "a".to_string(),
                child_id: "1".to_string(),
                chore_id: "1".to_string(),
                chore_name: "Wash the dishes".to_string(),
                points: 50,
                timestamp: "2024-03-09T10:00:00Z".to_string(),
                is_settled: false,
            },
            CompletedChore {
                id: "b".to_string(),
                child_id: "2".to_string(),
                chore_id: "1".to_string(),
                chore_name: "Wash the dishes".to_string(),
                points: 50,
                timestamp: "unknown".to_string(),
                is_settled: true,
            },
        ];

        let report = statistics_in(&store, "unknown", &Utc);
        assert_eq!(report.total_completions, 2);
        assert_eq!(report.total_points, 100);
        assert_eq!(report.completions_by_chore["Wash the dishes"], 2);
        assert_eq!(report.by_weekday.iter().map(|w| w.count).sum::<usize>(), 1);
        assert_eq!(report.by_time_of_day.iter().map(|b| b.count).sum::<usize>(), 1);
    }

    #[test]
    fn empty_store_report_is_zero_filled() {
        let report = statistics(&ChoreStore::in_memory(), "unknown");
        assert_eq!(report.total_completions, 0);
        assert!(report.completions_by_child.is_empty());
        assert_eq!(report.by_weekday.len(), 7);
        assert_eq!(report.by_time_of_day.len(), 6);
    }
}
