use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One ledger entry: a child completed a chore once.
///
/// `chore_name` and `points` are copies taken at completion time so later
/// edits to the chore definition never rewrite history. Only `is_settled`
/// changes after creation, and only from `false` to `true`.
///
/// Older documents name the time `completedAt` and the flag `settled`. Either
/// spelling is read; when a record carries both, `timestamp` and `isSettled`
/// win.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "CompletedChoreRecord")]
pub struct CompletedChore {
    pub id: String,
    pub child_id: String,
    pub chore_id: String,
    pub chore_name: String,
    pub points: u32,
    pub timestamp: String,
    pub is_settled: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompletedChoreRecord {
    id: String,
    child_id: String,
    chore_id: String,
    #[serde(default)]
    chore_name: String,
    points: u32,
    timestamp: Option<String>,
    completed_at: Option<String>,
    is_settled: Option<bool>,
    settled: Option<bool>,
}

impl TryFrom<CompletedChoreRecord> for CompletedChore {
    type Error = String;

    fn try_from(record: CompletedChoreRecord) -> Result<Self, Self::Error> {
        let timestamp = record
            .timestamp
            .or(record.completed_at)
            .ok_or_else(|| "missing field `timestamp`".to_string())?;

        Ok(Self {
            id: record.id,
            child_id: record.child_id,
            chore_id: record.chore_id,
            chore_name: record.chore_name,
            points: record.points,
            timestamp,
            is_settled: record.is_settled.or(record.settled).unwrap_or(false),
        })
    }
}

impl CompletedChore {
    /// Parsed completion time, `None` when the stored string is not a date.
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }
}

pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.f]` (read as UTC) or a
/// bare date (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_iso_strings_written_by_browsers() {
        let parsed = parse_timestamp("2024-03-09T07:15:00.000Z").expect("valid timestamp");
        assert_eq!(parsed.hour(), 7);
        assert_eq!(parsed.day(), 9);
    }

    #[test]
    fn accepts_naive_and_date_only_forms() {
        assert!(parse_timestamp("2024-03-09T07:15:00").is_some());
        let midnight = parse_timestamp("2024-03-09").expect("date only");
        assert_eq!(midnight.hour(), 0);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("2024-13-45T99:00:00Z").is_none());
    }

    #[test]
    fn now_timestamp_round_trips() {
        assert!(parse_timestamp(&now_timestamp()).is_some());
    }

    #[test]
    fn alternate_ledger_field_names_are_accepted() {
        let entry: CompletedChore = serde_json::from_str(
            r#"{"id":"c1","childId":"1","choreId":"2","points":60,"completedAt":"2024-01-01T10:00:00Z","settled":true}"#,
        )
        .expect("alternate shape");
        assert!(entry.is_settled);
        assert_eq!(entry.timestamp, "2024-01-01T10:00:00Z");
        assert!(entry.chore_name.is_empty());
    }

    #[test]
    fn canonical_fields_win_when_both_spellings_are_present() {
        let entry: CompletedChore = serde_json::from_str(
            r#"{"id":"c1","childId":"1","choreId":"2","points":60,"timestamp":"2024-01-02T10:00:00Z","completedAt":"2023-05-05T10:00:00Z","isSettled":false,"settled":true}"#,
        )
        .expect("both spellings");
        assert_eq!(entry.timestamp, "2024-01-02T10:00:00Z");
        assert!(!entry.is_settled);
    }

    #[test]
    fn a_record_without_any_time_is_rejected() {
        let result = serde_json::from_str::<CompletedChore>(
            r#"{"id":"c1","childId":"1","choreId":"2","points":60}"#,
        );
        assert!(result.is_err());
    }
}
