pub mod config;
pub mod date;
pub mod error;
pub mod filter;
mod io;
pub mod paths;
pub mod store;
pub mod task;
pub mod types;
pub mod weekly;

pub use error::{PlannerError, Result};
pub use filter::{filter_tasks, filter_week};
pub use task::{NewTask, Task, TaskPatch};
pub use types::{Priority, TaskStatus};
pub use weekly::{bucket_by_week, sorted_week_keys, TaskOrder, WeekBucket, WeeklySummary};
