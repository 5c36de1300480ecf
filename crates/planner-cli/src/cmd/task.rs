use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use planner_core::store::TaskStore;
use planner_core::{NewTask, Priority, Task, TaskPatch, TaskStatus};
use std::path::Path;

#[derive(Subcommand)]
pub enum TaskSubcommand {
    /// Add a task
    Add {
        #[arg(required = true)]
        title: Vec<String>,
        /// When the task is scheduled (e.g. 2024-06-12T10:00 or 2024-06-12)
        #[arg(long = "at")]
        date_time: String,
        #[arg(long)]
        description: Option<String>,
        /// low, medium or high
        #[arg(long)]
        priority: Option<Priority>,
        /// Initial status (default: in-progress)
        #[arg(long)]
        status: Option<String>,
    },
    /// List tasks, oldest first
    List {
        /// Only tasks whose title or description contains this text
        #[arg(long, short = 'q')]
        query: Option<String>,
    },
    /// Show full details for a single task
    Get { id: String },
    /// Edit task fields
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long = "at")]
        date_time: Option<String>,
        #[arg(long)]
        priority: Option<Priority>,
        #[arg(long)]
        status: Option<String>,
    },
    /// Mark a task completed
    Complete { id: String },
    /// Move a completed task back to in-progress
    Reopen { id: String },
    /// Delete a task
    Delete { id: String },
}

pub fn run(root: &Path, subcmd: TaskSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        TaskSubcommand::Add {
            title,
            date_time,
            description,
            priority,
            status,
        } => {
            let new = NewTask {
                title: title.join(" "),
                description,
                date_time,
                status: status.map(TaskStatus::from),
                priority,
            };
            add(root, new, json)
        }
        TaskSubcommand::List { query } => list(root, query.as_deref(), json),
        TaskSubcommand::Get { id } => get(root, &id, json),
        TaskSubcommand::Edit {
            id,
            title,
            description,
            date_time,
            priority,
            status,
        } => {
            let patch = TaskPatch {
                title,
                description,
                date_time,
                status: status.map(TaskStatus::from),
                priority,
            };
            update(root, &id, patch, "Updated", json)
        }
        TaskSubcommand::Complete { id } => {
            let patch = TaskPatch {
                status: Some(TaskStatus::Completed),
                ..Default::default()
            };
            update(root, &id, patch, "Completed", json)
        }
        TaskSubcommand::Reopen { id } => {
            let patch = TaskPatch {
                status: Some(TaskStatus::InProgress),
                ..Default::default()
            };
            update(root, &id, patch, "Reopened", json)
        }
        TaskSubcommand::Delete { id } => delete(root, &id, json),
    }
}

fn load(root: &Path) -> anyhow::Result<TaskStore> {
    TaskStore::load(root).context("failed to load tasks")
}

fn add(root: &Path, new: NewTask, json: bool) -> anyhow::Result<()> {
    let mut store = load(root)?;
    let task = store.create(new)?;
    store.save(root).context("failed to save tasks")?;

    if json {
        print_json(&task)?;
    } else {
        println!("Added task [{}]: {}", task.id, task.title);
    }
    Ok(())
}

fn update(
    root: &Path,
    id: &str,
    patch: TaskPatch,
    verb: &str,
    json: bool,
) -> anyhow::Result<()> {
    let mut store = load(root)?;
    let task = store.update(id, patch)?;
    store.save(root).context("failed to save tasks")?;

    if json {
        print_json(&task)?;
    } else {
        println!("{verb} task [{}]: {}", task.id, task.title);
    }
    Ok(())
}

fn delete(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let mut store = load(root)?;
    let task = store.delete(id)?;
    store.save(root).context("failed to save tasks")?;

    if json {
        print_json(&serde_json::json!({ "id": task.id, "deleted": true }))?;
    } else {
        println!("Deleted task [{}]: {}", task.id, task.title);
    }
    Ok(())
}

fn get(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let store = load(root)?;
    let task = store.get(id)?;

    if json {
        print_json(task)?;
        return Ok(());
    }

    println!("Task: {}", task.id);
    println!("Title:       {}", task.title);
    println!("When:        {}", task.date_time);
    println!("Status:      {}", task.status);
    println!(
        "Priority:    {}",
        task.priority
            .map(|p| p.to_string())
            .unwrap_or_else(|| "(none)".into())
    );
    if let Some(desc) = &task.description {
        println!("Description: {}", desc);
    }
    Ok(())
}

fn list(root: &Path, query: Option<&str>, json: bool) -> anyhow::Result<()> {
    let store = load(root)?;
    let tasks = store.list(query.map(str::trim));

    if json {
        print_json(&tasks)?;
        return Ok(());
    }

    if tasks.is_empty() {
        println!("No tasks.");
        return Ok(());
    }
    print_tasks(&tasks);
    Ok(())
}

pub fn search(root: &Path, query: &str, json: bool) -> anyhow::Result<()> {
    let store = load(root)?;
    let matches = store.list(Some(query.trim()));

    if json {
        print_json(&matches)?;
        return Ok(());
    }

    if matches.is_empty() {
        println!("No tasks match '{query}'.");
        return Ok(());
    }
    print_tasks(&matches);
    Ok(())
}

pub(crate) fn print_tasks(tasks: &[Task]) {
    let rows: Vec<Vec<String>> = tasks
        .iter()
        .map(|t| {
            vec![
                t.id.clone(),
                t.date_time.clone(),
                t.status.to_string(),
                t.priority.map(|p| p.to_string()).unwrap_or_default(),
                t.title.clone(),
            ]
        })
        .collect();
    print_table(&["ID", "WHEN", "STATUS", "PRIORITY", "TITLE"], rows);
}
