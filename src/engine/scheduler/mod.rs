mod query_stream_task;
mod scheduler;
mod task;

pub use query_stream_task::QueryStreamTask;
pub use scheduler::{Scheduler, TaskScheduler};
pub use task::{Task, TaskCompletion};
