pub mod model;

pub use model::{
    LoggingConfig, NodeConfig, QueryHookConfig, SchedulerConfig, Settings, load_settings_from,
};
