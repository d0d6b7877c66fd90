mod tracker;

pub use tracker::{CompletionOutcome, ProgressTracker};
