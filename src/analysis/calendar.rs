use crate::ledger::{order_by_recency, sum_points};
use crate::models::completed_chore::CompletedChore;
use crate::models::stats::{DayGroup, TimeOfDay, TimeOfDayCount, WeekdayCount};
use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Timelike, Weekday};
use std::collections::BTreeMap;

/// Sunday first, matching the calendar the app shows.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

pub fn weekday_counts(ledger: &[CompletedChore]) -> Vec<WeekdayCount> {
    weekday_counts_in(ledger, &Local)
}

/// Always seven buckets; entries without a parseable timestamp are skipped.
pub fn weekday_counts_in<Tz: TimeZone>(ledger: &[CompletedChore], tz: &Tz) -> Vec<WeekdayCount> {
    let mut counts = [0usize; 7];
    for at in local_times(ledger, tz) {
        counts[at.weekday().num_days_from_sunday() as usize] += 1;
    }

    WEEKDAYS
        .iter()
        .zip(counts)
        .map(|(weekday, count)| WeekdayCount {
            weekday: *weekday,
            count,
        })
        .collect()
}

pub fn time_of_day_counts(ledger: &[CompletedChore]) -> Vec<TimeOfDayCount> {
    time_of_day_counts_in(ledger, &Local)
}

/// Always six buckets; entries without a parseable timestamp are skipped.
pub fn time_of_day_counts_in<Tz: TimeZone>(
    ledger: &[CompletedChore],
    tz: &Tz,
) -> Vec<TimeOfDayCount> {
    let mut counts: BTreeMap<TimeOfDay, usize> = TimeOfDay::ALL.iter().map(|b| (*b, 0)).collect();
    for at in local_times(ledger, tz) {
        *counts.entry(TimeOfDay::from_hour(at.hour())).or_insert(0) += 1;
    }

    TimeOfDay::ALL
        .iter()
        .map(|bucket| TimeOfDayCount {
            bucket: *bucket,
            label: bucket.label().to_string(),
            count: counts.get(bucket).copied().unwrap_or(0),
        })
        .collect()
}

pub fn history_by_day(ledger: &[CompletedChore]) -> Vec<DayGroup> {
    history_by_day_in(ledger, &Local)
}

/// Groups entries by local calendar date, newest date first, entries inside a
/// group newest first. Entries without a parseable timestamp are left out.
pub fn history_by_day_in<Tz: TimeZone>(ledger: &[CompletedChore], tz: &Tz) -> Vec<DayGroup> {
    let mut groups: BTreeMap<NaiveDate, Vec<&CompletedChore>> = BTreeMap::new();
    for entry in ledger {
        let Some(at) = entry.completed_at() else {
            log::debug!("event=history_group status=skipped entry_id={}", entry.id);
            continue;
        };
        groups
            .entry(at.with_timezone(tz).date_naive())
            .or_default()
            .push(entry);
    }

    groups
        .into_iter()
        .rev()
        .map(|(date, entries)| {
            let ordered = order_by_recency(entries);
            DayGroup {
                date,
                total_points: sum_points(ordered.iter().copied()),
                entry_ids: ordered.iter().map(|entry| entry.id.clone()).collect(),
            }
        })
        .collect()
}

fn local_times<'a, Tz: TimeZone + 'a>(
    ledger: &'a [CompletedChore],
    tz: &'a Tz,
) -> impl Iterator<Item = DateTime<Tz>> + 'a {
    ledger
        .iter()
        .filter_map(|entry| entry.completed_at())
        .map(move |at| at.with_timezone(tz))
}
