pub mod persistence;
pub mod repositories;

pub use repositories::in_memory::{InMemoryBenchmarkRepository, InMemoryProblemRepository};
