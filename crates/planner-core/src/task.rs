use crate::date;
use crate::error::{PlannerError, Result};
use crate::types::{Priority, TaskStatus};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A scheduled task as held by storage.
///
/// `date_time` stays the raw stored string; callers resolve it with
/// [`Task::scheduled_at`] and get [`PlannerError::DateParse`] when it does
/// not name a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date_time: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

/// Body of a create request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date_time: String,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub priority: Option<Priority>,
}

/// Partial update. `None` leaves the field as it is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date_time: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub priority: Option<Priority>,
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        date_time: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            date_time: date_time.into(),
            status: TaskStatus::default(),
            priority: None,
        }
    }

    /// Build a validated task with a fresh id.
    pub fn from_new(new: NewTask) -> Result<Self> {
        let task = Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: new.title.trim().to_string(),
            description: new.description.filter(|d| !d.is_empty()),
            date_time: new.date_time.trim().to_string(),
            status: new.status.unwrap_or_default(),
            priority: new.priority,
        };
        task.validate()?;
        Ok(task)
    }

    /// Apply `patch`, leaving the task unchanged if the result is invalid.
    pub fn apply(&mut self, patch: TaskPatch) -> Result<()> {
        let mut next = self.clone();
        if let Some(title) = patch.title {
            next.title = title.trim().to_string();
        }
        if let Some(description) = patch.description {
            next.description = Some(description).filter(|d| !d.is_empty());
        }
        if let Some(date_time) = patch.date_time {
            next.date_time = date_time.trim().to_string();
        }
        if let Some(status) = patch.status {
            next.status = status;
        }
        if let Some(priority) = patch.priority {
            next.priority = Some(priority);
        }
        next.validate()?;
        *self = next;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(PlannerError::InvalidTask("title must not be empty".into()));
        }
        if date::parse_date_time(&self.date_time).is_none() {
            return Err(PlannerError::InvalidTask(format!(
                "dateTime '{}' is not a recognised date",
                self.date_time
            )));
        }
        Ok(())
    }

    pub fn scheduled_at(&self) -> Result<NaiveDateTime> {
        date::parse_date_time(&self.date_time).ok_or_else(|| self.date_parse_error())
    }

    pub(crate) fn date_parse_error(&self) -> PlannerError {
        PlannerError::DateParse {
            id: self.id.clone(),
            value: self.date_time.clone(),
        }
    }

    pub fn scheduled_date(&self) -> Result<NaiveDate> {
        self.scheduled_at().map(|dt| dt.date())
    }

    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }

    /// Case-insensitive substring match on title or description.
    /// `needle` must already be passed through [`fold_case`].
    pub(crate) fn matches_folded(&self, needle: &str) -> bool {
        fold_case(&self.title).contains(needle)
            || fold_case(self.description.as_deref().unwrap_or("")).contains(needle)
    }
}

/// Caseless form of `s` for substring search.
///
/// Round-tripping through upper case folds characters whose lower-case
/// mapping alone is not enough, so `ß`, `ẞ` and `SS` all become `ss`.
pub(crate) fn fold_case(s: &str) -> String {
    s.to_lowercase().to_uppercase().to_lowercase()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn new_task(title: &str, date_time: &str) -> NewTask {
        NewTask {
            title: title.into(),
            date_time: date_time.into(),
            ..Default::default()
        }
    }

    #[test]
    fn from_new_assigns_id_and_defaults() {
        let task = Task::from_new(new_task("  Buy milk ", "2024-06-12T10:00")).unwrap();
        assert!(!task.id.is_empty());
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.priority, None);
    }

    #[test]
    fn from_new_rejects_empty_title() {
        let err = Task::from_new(new_task("   ", "2024-06-12")).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidTask(_)));
    }

    #[test]
    fn from_new_rejects_bad_date() {
        let err = Task::from_new(new_task("Call mom", "someday")).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidTask(_)));
    }

    #[test]
    fn apply_updates_fields() {
        let mut task = Task::new("t1", "Draft", "2024-06-12");
        task.apply(TaskPatch {
            status: Some(TaskStatus::Completed),
            priority: Some(Priority::High),
            description: Some("notes".into()),
            ..Default::default()
        })
        .unwrap();
        assert!(task.is_completed());
        assert_eq!(task.priority, Some(Priority::High));
        assert_eq!(task.description.as_deref(), Some("notes"));
    }

    #[test]
    fn apply_is_atomic_on_failure() {
        let mut task = Task::new("t1", "Draft", "2024-06-12");
        let before = task.clone();
        let err = task
            .apply(TaskPatch {
                title: Some("Renamed".into()),
                date_time: Some("not a date".into()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, PlannerError::InvalidTask(_)));
        assert_eq!(task, before);
    }

    #[test]
    fn scheduled_at_reports_date_parse() {
        let task = Task::new("t9", "Broken", "31/31/2024");
        match task.scheduled_at().unwrap_err() {
            PlannerError::DateParse { id, value } => {
                assert_eq!(id, "t9");
                assert_eq!(value, "31/31/2024");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn json_uses_camel_case() {
        let task = Task::new("t1", "Plan", "2024-06-10T00:00");
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["dateTime"], "2024-06-10T00:00");
        assert_eq!(json["status"], "in-progress");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn missing_status_defaults_on_decode() {
        let task: Task =
            serde_json::from_str(r#"{"id":"a","title":"x","dateTime":"2024-06-10"}"#).unwrap();
        assert_eq!(task.status, TaskStatus::InProgress);
    }
}
