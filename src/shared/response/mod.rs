pub mod types;

pub use types::{KeyValuePair, Status, StatusCode};
