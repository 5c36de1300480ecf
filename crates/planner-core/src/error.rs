use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("not initialized: run 'planner init'")]
    NotInitialized,

    #[error("task not found: {0}")]
    TaskNotFound(String),

    #[error("invalid task: {0}")]
    InvalidTask(String),

    /// A task's `dateTime` could not be resolved to a calendar date.
    #[error("task '{id}' has an unparseable dateTime: '{value}'")]
    DateParse { id: String, value: String },

    /// Reserved for structured queries. Plain substring queries never produce it.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("invalid week key '{0}': expected YYYY-MM-DD")]
    InvalidWeekKey(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
