pub mod delegator;
pub mod errors;
pub mod hook;
pub mod plan;
pub mod scheduler;
pub mod segments;
pub mod types;

pub use errors::*;
