use crate::cmd::task::print_tasks;
use crate::output::{print_json, print_table};
use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Subcommand;
use planner_core::config::Config;
use planner_core::store::TaskStore;
use planner_core::weekly::{bucket_by_week, sorted_week_keys, TaskOrder, WeeklySummary};
use planner_core::{date, filter_week, PlannerError};
use std::path::Path;

#[derive(Subcommand)]
pub enum WeekSubcommand {
    /// Open/done counts per week, newest week first
    Summary {
        /// Order of tasks within each week: input or chronological
        #[arg(long)]
        order: Option<TaskOrder>,
    },
    /// Tasks scheduled in one week
    Show {
        /// Any date inside the week (YYYY-MM-DD); defaults to the current week
        week: Option<String>,
        /// Only tasks whose title or description contains this text
        #[arg(long, short = 'q')]
        query: Option<String>,
    },
}

pub fn run(root: &Path, subcmd: WeekSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        WeekSubcommand::Summary { order } => summary(root, order, json),
        WeekSubcommand::Show { week, query } => show(root, week.as_deref(), query.as_deref(), json),
    }
}

fn summary(root: &Path, order: Option<TaskOrder>, json: bool) -> anyhow::Result<()> {
    let order = match order {
        Some(o) => o,
        None => Config::load(root).context("failed to load config")?.weekly.order,
    };
    let store = TaskStore::load(root).context("failed to load tasks")?;
    let summary = bucket_by_week(&store.tasks, order).context("cannot build weekly summary")?;

    if json {
        print_json(&summary)?;
        return Ok(());
    }

    if summary.is_empty() {
        println!("No tasks yet. Add one with `planner task add`.");
        return Ok(());
    }

    let today = Local::now().date_naive();
    print_table(&["WEEK", "RANGE", "OPEN", "DONE", ""], summary_rows(&summary, today));
    Ok(())
}

fn summary_rows(summary: &WeeklySummary, today: NaiveDate) -> Vec<Vec<String>> {
    let current = date::current_week_start(today);
    sorted_week_keys(summary)
        .into_iter()
        .filter_map(|key| summary.get(&key).map(|bucket| (key, bucket)))
        .map(|(key, bucket)| {
            vec![
                key,
                range_label(bucket.week_start, bucket.week_end()),
                bucket.open.to_string(),
                bucket.completed.to_string(),
                if Some(bucket.week_start) == current {
                    "this week".to_string()
                } else {
                    String::new()
                },
            ]
        })
        .collect()
}

/// `Jun 10 → Jun 16`; the end is left open for a week that runs off the calendar.
fn range_label(start: NaiveDate, end: Option<NaiveDate>) -> String {
    match end {
        Some(end) => format!("{} → {}", start.format("%b %-d"), end.format("%b %-d")),
        None => format!("{} →", start.format("%b %-d")),
    }
}

fn show(root: &Path, week: Option<&str>, query: Option<&str>, json: bool) -> anyhow::Result<()> {
    let start = match week {
        Some(raw) => {
            date::parse_week_key(raw).ok_or_else(|| PlannerError::InvalidWeekKey(raw.into()))?
        }
        None => {
            let today = Local::now().date_naive();
            date::current_week_start(today)
                .ok_or_else(|| PlannerError::InvalidWeekKey(today.to_string()))?
        }
    };
    let store = TaskStore::load(root).context("failed to load tasks")?;
    let query = query.map(str::trim).filter(|q| !q.is_empty());
    let tasks = filter_week(&store.list(None), start, query)?;

    if json {
        print_json(&tasks)?;
        return Ok(());
    }

    println!(
        "Week of {} ({})",
        start.format(date::WEEK_KEY_FORMAT),
        range_label(start, date::week_end(start))
    );
    if tasks.is_empty() {
        println!("No tasks in this week.");
        return Ok(());
    }
    print_tasks(&tasks);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner_core::{Task, TaskStatus};

    #[test]
    fn rows_are_newest_first_and_mark_current_week() {
        let mut done = Task::new("a", "Old", "2024-06-03T09:00");
        done.status = TaskStatus::Completed;
        let tasks = vec![done, Task::new("b", "New", "2024-06-12T09:00")];
        let summary = bucket_by_week(&tasks, TaskOrder::Input).unwrap();

        let today = NaiveDate::from_ymd_opt(2024, 6, 13).unwrap();
        let rows = summary_rows(&summary, today);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], "2024-06-10");
        assert_eq!(rows[0][1], "Jun 10 → Jun 16");
        assert_eq!(rows[0][4], "this week");
        assert_eq!(rows[1][0], "2024-06-03");
        assert_eq!(rows[1][2], "0");
        assert_eq!(rows[1][3], "1");
        assert_eq!(rows[1][4], "");
    }

    #[test]
    fn range_label_handles_last_calendar_week() {
        let start = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        assert_eq!(range_label(start, date::week_end(start)), "Jun 10 → Jun 16");
        assert_eq!(range_label(NaiveDate::MAX, date::week_end(NaiveDate::MAX)), "Dec 31 →");
    }
}
