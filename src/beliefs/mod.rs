//! 信念层：谓词归一化与 BeliefStore 边界

pub mod predicate;
pub mod store;

pub use predicate::{strip_source, Predicate};
pub use store::{BeliefStore, InMemoryBeliefStore};
