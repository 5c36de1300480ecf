use crate::date;
use crate::error::Result;
use crate::task::Task;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Week buckets keyed by the canonical `YYYY-MM-DD` Monday key.
///
/// Key order carries no meaning; use [`sorted_week_keys`] for display order.
pub type WeeklySummary = HashMap<String, WeekBucket>;

/// Ordering of tasks inside each bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskOrder {
    /// Keep the relative order of the input.
    Input,
    /// Stable ascending sort on `dateTime` before grouping.
    #[default]
    Chronological,
}

impl std::str::FromStr for TaskOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "input" => Ok(TaskOrder::Input),
            "chronological" => Ok(TaskOrder::Chronological),
            other => Err(format!(
                "unknown order '{other}' (expected input or chronological)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekBucket {
    pub week_start: NaiveDate,
    pub open: usize,
    pub completed: usize,
    pub tasks: Vec<Task>,
}

impl WeekBucket {
    fn new(week_start: NaiveDate) -> Self {
        Self {
            week_start,
            open: 0,
            completed: 0,
            tasks: Vec::new(),
        }
    }

    fn push(&mut self, task: Task) {
        if task.is_completed() {
            self.completed += 1;
        } else {
            self.open += 1;
        }
        self.tasks.push(task);
    }

    /// Sunday closing the bucket. `None` only for a hand-built bucket whose
    /// week runs past the end of the calendar.
    pub fn week_end(&self) -> Option<NaiveDate> {
        date::week_end(self.week_start)
    }

    pub fn total(&self) -> usize {
        self.open + self.completed
    }

    pub fn key(&self) -> String {
        self.week_start.format(date::WEEK_KEY_FORMAT).to_string()
    }
}

/// Group `tasks` into Monday-start week buckets.
///
/// Every date and its week are resolved before any bucket is built, so an
/// unparseable `dateTime` fails the whole call with `DateParse` and nothing
/// is returned.
pub fn bucket_by_week(tasks: &[Task], order: TaskOrder) -> Result<WeeklySummary> {
    let mut dated = tasks
        .iter()
        .map(|t| -> Result<_> {
            let at = t.scheduled_at()?;
            let start = date::week_start(at.date()).ok_or_else(|| t.date_parse_error())?;
            Ok((at, start, t))
        })
        .collect::<Result<Vec<_>>>()?;

    if order == TaskOrder::Chronological {
        // sort_by_key is stable: equal timestamps keep input order.
        dated.sort_by_key(|(at, _, _)| *at);
    }

    let mut summary = WeeklySummary::new();
    for (_, start, task) in dated {
        let bucket = WeekBucket::new(start);
        summary
            .entry(bucket.key())
            .or_insert(bucket)
            .push(task.clone());
    }

    tracing::debug!(
        tasks = tasks.len(),
        weeks = summary.len(),
        "bucketed tasks by week"
    );
    Ok(summary)
}

/// Week keys newest first.
pub fn sorted_week_keys(summary: &WeeklySummary) -> Vec<String> {
    let mut keys: Vec<String> = summary.keys().cloned().collect();
    // YYYY-MM-DD sorts lexically in date order.
    keys.sort_unstable_by(|a, b| b.cmp(a));
    keys
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlannerError;
    use crate::types::TaskStatus;

    fn task(id: &str, at: &str, status: TaskStatus) -> Task {
        let mut t = Task::new(id, format!("task {id}"), at);
        t.status = status;
        t
    }

    #[test]
    fn wednesday_lands_in_monday_bucket() {
        let tasks = vec![task("a", "2024-06-12T10:00", TaskStatus::InProgress)];
        let summary = bucket_by_week(&tasks, TaskOrder::Input).unwrap();
        let bucket = &summary["2024-06-10"];
        assert_eq!(bucket.open, 1);
        assert_eq!(bucket.completed, 0);
        assert_eq!(bucket.week_end(), NaiveDate::from_ymd_opt(2024, 6, 16));
    }

    #[test]
    fn monday_midnight_is_inclusive() {
        let tasks = vec![task("a", "2024-06-10T00:00", TaskStatus::Open)];
        let summary = bucket_by_week(&tasks, TaskOrder::Input).unwrap();
        assert!(summary.contains_key("2024-06-10"));
        assert_eq!(summary.len(), 1);
    }

    #[test]
    fn counts_open_and_completed() {
        let tasks = vec![
            task("a", "2024-06-11T09:00", TaskStatus::Completed),
            task("b", "2024-06-13T09:00", TaskStatus::InProgress),
        ];
        let summary = bucket_by_week(&tasks, TaskOrder::Input).unwrap();
        let bucket = &summary["2024-06-10"];
        assert_eq!((bucket.open, bucket.completed), (1, 1));
        assert_eq!(bucket.total(), 2);
        assert_eq!(bucket.key(), "2024-06-10");
        let ids: Vec<&str> = bucket.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn unknown_status_counts_as_open() {
        let tasks = vec![task("a", "2024-06-11", TaskStatus::Other("paused".into()))];
        let summary = bucket_by_week(&tasks, TaskOrder::Input).unwrap();
        assert_eq!(summary["2024-06-10"].open, 1);
    }

    #[test]
    fn empty_input_gives_empty_summary() {
        let summary = bucket_by_week(&[], TaskOrder::Chronological).unwrap();
        assert!(summary.is_empty());
    }

    #[test]
    fn unparseable_date_fails_whole_call() {
        let tasks = vec![
            task("good", "2024-06-12T10:00", TaskStatus::Open),
            task("bad", "tomorrow-ish", TaskStatus::Open),
        ];
        let err = bucket_by_week(&tasks, TaskOrder::Input).unwrap_err();
        assert!(matches!(err, PlannerError::DateParse { ref id, .. } if id == "bad"));
    }

    #[test]
    fn calendar_edge_dates_fail_instead_of_panicking() {
        for at in ["-262143-01-01T00:00", "+262142-12-31T00:00"] {
            let tasks = vec![task("edge", at, TaskStatus::Open)];
            let err = bucket_by_week(&tasks, TaskOrder::Input).unwrap_err();
            assert!(matches!(err, PlannerError::DateParse { ref id, .. } if id == "edge"));
        }
    }

    #[test]
    fn week_end_of_last_calendar_week_is_none() {
        let bucket = WeekBucket::new(NaiveDate::MAX);
        assert_eq!(bucket.week_end(), None);
    }

    #[test]
    fn input_order_is_preserved() {
        let tasks = vec![
            task("late", "2024-06-14T18:00", TaskStatus::Open),
            task("early", "2024-06-10T08:00", TaskStatus::Open),
        ];
        let summary = bucket_by_week(&tasks, TaskOrder::Input).unwrap();
        let ids: Vec<&str> = summary["2024-06-10"]
            .tasks
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, ["late", "early"]);
    }

    #[test]
    fn chronological_order_is_stable_on_ties() {
        let tasks = vec![
            task("late", "2024-06-14T18:00", TaskStatus::Open),
            task("tie-1", "2024-06-11T08:00", TaskStatus::Open),
            task("tie-2", "2024-06-11T08:00", TaskStatus::Open),
        ];
        let summary = bucket_by_week(&tasks, TaskOrder::Chronological).unwrap();
        let ids: Vec<&str> = summary["2024-06-10"]
            .tasks
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, ["tie-1", "tie-2", "late"]);
    }

    #[test]
    fn keys_sort_newest_first() {
        let tasks = vec![
            task("a", "2024-05-01", TaskStatus::Open),
            task("b", "2024-06-20", TaskStatus::Open),
            task("c", "2023-12-31", TaskStatus::Open),
        ];
        let summary = bucket_by_week(&tasks, TaskOrder::Input).unwrap();
        assert_eq!(
            sorted_week_keys(&summary),
            ["2024-06-17", "2024-04-29", "2023-12-25"]
        );
    }

    #[test]
    fn bucket_serializes_week_start_as_date() {
        let tasks = vec![task("a", "2024-06-12", TaskStatus::Open)];
        let summary = bucket_by_week(&tasks, TaskOrder::Input).unwrap();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["2024-06-10"]["weekStart"], "2024-06-10");
        assert_eq!(json["2024-06-10"]["open"], 1);
    }
}
