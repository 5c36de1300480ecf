use std::path::{Path, PathBuf};

pub const PLANNER_DIR: &str = ".planner";
pub const CONFIG_FILE: &str = ".planner/config.yaml";
pub const TASKS_FILE: &str = ".planner/tasks.yaml";

pub fn planner_dir(root: &Path) -> PathBuf {
    root.join(PLANNER_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn tasks_path(root: &Path) -> PathBuf {
    root.join(TASKS_FILE)
}

pub fn is_initialized(root: &Path) -> bool {
    planner_dir(root).is_dir()
}
