use parking_lot::Mutex;

use crate::engine::hook::{HookError, QueryHook, QueryHookParams};

/// Hook that rewrites `topk` and `search_params`, or fails, and keeps the
/// params it was handed.
#[derive(Default)]
pub struct MockQueryHook {
    topk: Option<i64>,
    search_params: Option<String>,
    error: Option<String>,
    seen: Mutex<Vec<QueryHookParams>>,
}

impl MockQueryHook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn setting_topk(mut self, topk: i64) -> Self {
        self.topk = Some(topk);
        self
    }

    pub fn setting_search_params(mut self, search_params: &str) -> Self {
        self.search_params = Some(search_params.to_string());
        self
    }

    pub fn failing(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }

    pub fn seen(&self) -> Vec<QueryHookParams> {
        self.seen.lock().clone()
    }
}

impl QueryHook for MockQueryHook {
    fn run(&self, params: &mut QueryHookParams) -> Result<(), HookError> {
        self.seen.lock().push(params.clone());
        if let Some(reason) = &self.error {
            return Err(HookError(reason.clone()));
        }
        if let Some(topk) = self.topk {
            params.topk = topk;
        }
        if let Some(search_params) = &self.search_params {
            params.search_params = search_params.clone();
        }
        Ok(())
    }
}
