pub mod benchmark;
pub mod errors;
pub mod problem;
pub mod progress;
pub mod repositories;
