mod override_hook;
mod query_hook;

pub use override_hook::ParamOverrideHook;
pub use query_hook::{HookError, QueryHook, QueryHookParams};
