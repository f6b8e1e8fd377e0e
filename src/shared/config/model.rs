use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub node: NodeConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    pub query_hook: Option<QueryHookConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeConfig {
    pub node_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub stdout_level: String,
    pub file_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// Number of tasks that may wait in the queue before `add` is rejected.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    /// Upper bound on tasks executing at the same time.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
            max_concurrency: default_max_concurrency(),
        }
    }
}

fn default_queue_capacity() -> usize {
    1024
}

fn default_max_concurrency() -> usize {
    8
}

/// Enables the parameter-override search hook when present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryHookConfig {
    pub max_topk: Option<i64>,
    #[serde(default)]
    pub search_param_overrides: HashMap<String, serde_json::Value>,
}

pub fn load_settings_from(config_path: &str) -> Result<Settings, config::ConfigError> {
    let settings: Settings = config::Config::builder()
        .add_source(config::File::with_name(config_path))
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
