use serde_json::{Map, Value};
use std::collections::HashMap;

use super::query_hook::{HookError, QueryHook, QueryHookParams};
use crate::shared::config::QueryHookConfig;

/// Merges fixed index parameters into every search and caps `topk`.
#[derive(Debug, Clone, Default)]
pub struct ParamOverrideHook {
    max_topk: Option<i64>,
    overrides: Map<String, Value>,
}

impl ParamOverrideHook {
    pub fn new(max_topk: Option<i64>, overrides: HashMap<String, Value>) -> Self {
        Self {
            max_topk,
            overrides: overrides.into_iter().collect(),
        }
    }

    pub fn from_config(cfg: &QueryHookConfig) -> Self {
        Self::new(cfg.max_topk, cfg.search_param_overrides.clone())
    }
}

impl QueryHook for ParamOverrideHook {
    fn run(&self, params: &mut QueryHookParams) -> Result<(), HookError> {
        if let Some(max_topk) = self.max_topk {
            params.topk = params.topk.min(max_topk);
        }

        if self.overrides.is_empty() {
            return Ok(());
        }

        let mut search_params = if params.search_params.trim().is_empty() {
            Map::new()
        } else {
            match serde_json::from_str::<Value>(&params.search_params) {
                Ok(Value::Object(map)) => map,
                Ok(other) => {
                    return Err(HookError(format!(
                        "search params must be a JSON object, got {other}"
                    )));
                }
                Err(e) => return Err(HookError(format!("invalid search params: {e}"))),
            }
        };

        for (key, value) in &self.overrides {
            search_params.insert(key.clone(), value.clone());
        }
        params.search_params = Value::Object(search_params).to_string();
        Ok(())
    }
}
