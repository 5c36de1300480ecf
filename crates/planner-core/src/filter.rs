use crate::date;
use crate::error::{PlannerError, Result};
use crate::task::{fold_case, Task};
use chrono::NaiveDate;

/// Tasks whose title or description contains `query`, ignoring case.
///
/// An absent or empty query returns every task. Matching is plain substring
/// containment over Unicode-folded text and the input order is kept.
pub fn filter_tasks(tasks: &[Task], query: Option<&str>) -> Vec<Task> {
    let Some(needle) = query.filter(|q| !q.is_empty()).map(fold_case) else {
        return tasks.to_vec();
    };
    tasks
        .iter()
        .filter(|t| t.matches_folded(&needle))
        .cloned()
        .collect()
}

/// Tasks scheduled in the week starting at `week`, then text-filtered.
///
/// `week` is normalised to its Monday; a week running off the calendar is
/// `InvalidWeekKey`. Fails with `DateParse` if any task date cannot be
/// resolved, so the scoped view never silently drops a task.
pub fn filter_week(tasks: &[Task], week: NaiveDate, query: Option<&str>) -> Result<Vec<Task>> {
    let (start, end) = date::week_window(week).ok_or_else(|| {
        PlannerError::InvalidWeekKey(week.format(date::WEEK_KEY_FORMAT).to_string())
    })?;
    let mut in_week = Vec::new();
    for task in tasks {
        let day = task.scheduled_date()?;
        if start <= day && day <= end {
            in_week.push(task.clone());
        }
    }
    Ok(filter_tasks(&in_week, query))
}
