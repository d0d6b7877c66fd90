pub mod database;
pub mod repositories;
pub mod seed;

pub use database::Database;
