//! SQLite storage for company pricing, submitted quotes and filter reports.

pub mod factory;
pub mod repository;

pub use factory::SqliteRepositoryFactory;
pub use repository::SqliteRepository;
