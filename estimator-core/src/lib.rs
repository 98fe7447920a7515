pub mod calculations;
pub mod db;
pub mod models;
pub mod services;
pub mod session;
pub mod submission;
pub mod wizard;

pub use db::repository::{EstimatorRepository, RepositoryError};
pub use models::*;
pub use session::{EstimatorSession, SessionOptions, SessionStatus};
pub use submission::SubmissionError;
