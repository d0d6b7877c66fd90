mod comparator;
mod parser;
mod service;

pub use comparator::compare;
pub use parser::parse_bench_output;
pub use service::BenchmarkService;
