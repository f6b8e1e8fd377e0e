pub mod engine;
pub mod logging;
pub mod node;
pub mod shared;

pub use node::QueryNode;


#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
pub mod test_helpers;
