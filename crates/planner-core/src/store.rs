use crate::error::{PlannerError, Result};
use crate::filter::filter_tasks;
use crate::paths;
use crate::task::{NewTask, Task, TaskPatch};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The full task collection, persisted as a single YAML document.
///
/// Callers load, mutate and save; serializing concurrent writers is the
/// host's job.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskStore {
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl TaskStore {
    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    pub fn load(root: &Path) -> Result<Self> {
        if !paths::is_initialized(root) {
            return Err(PlannerError::NotInitialized);
        }
        let path = paths::tasks_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let store: TaskStore = serde_yaml::from_str(&data)?;
        Ok(store)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        crate::io::write_yaml(&paths::tasks_path(root), self)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Tasks matching `query`, oldest `dateTime` first.
    ///
    /// Tasks whose date cannot be parsed sort after all others in stored order.
    pub fn list(&self, query: Option<&str>) -> Vec<Task> {
        let mut found = filter_tasks(&self.tasks, query);
        found.sort_by_key(|t| (t.scheduled_at().is_err(), t.scheduled_at().ok()));
        found
    }

    pub fn get(&self, id: &str) -> Result<&Task> {
        self.tasks
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| PlannerError::TaskNotFound(id.to_string()))
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    pub fn create(&mut self, new: NewTask) -> Result<Task> {
        let task = Task::from_new(new)?;
        tracing::info!(id = %task.id, title = %task.title, "created task");
        self.tasks.push(task.clone());
        Ok(task)
    }

    pub fn update(&mut self, id: &str, patch: TaskPatch) -> Result<Task> {
        let task = self.find_mut(id)?;
        task.apply(patch)?;
        tracing::info!(id, status = %task.status, "updated task");
        Ok(task.clone())
    }

    pub fn delete(&mut self, id: &str) -> Result<Task> {
        let idx = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| PlannerError::TaskNotFound(id.to_string()))?;
        tracing::info!(id, "deleted task");
        Ok(self.tasks.remove(idx))
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| PlannerError::TaskNotFound(id.to_string()))
    }
}

/// Create `.planner/` with a default config and an empty task list.
///
/// Existing files are left alone. Returns each file, relative to `root`,
/// paired with whether this call created it.
pub fn init(root: &Path) -> Result<Vec<(&'static str, bool)>> {
    std::fs::create_dir_all(paths::planner_dir(root))?;
    let config = crate::config::Config::default();
    let config = crate::io::create_yaml(&paths::config_path(root), &config)?;
    let tasks = crate::io::create_yaml(&paths::tasks_path(root), &TaskStore::default())?;
    Ok(vec![(paths::CONFIG_FILE, config), (paths::TASKS_FILE, tasks)])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
