pub mod benchmarking;
pub mod progress;
