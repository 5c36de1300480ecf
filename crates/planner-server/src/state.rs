use planner_core::config::Config;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub root: PathBuf,
    pub config: Arc<Config>,
    /// Held across every load-mutate-save of the task file.
    pub write_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(root: PathBuf, config: Config) -> Self {
        Self {
            root,
            config: Arc::new(config),
            write_lock: Arc::new(Mutex::new(())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_stores_root_and_config() {
        let mut config = Config::default();
        config.server.port = 5555;
        let state = AppState::new(PathBuf::from("/tmp/test"), config);
        assert_eq!(state.root, PathBuf::from("/tmp/test"));
        assert_eq!(state.config.server.port, 5555);
    }
}
