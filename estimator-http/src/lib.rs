//! Client for the marketplace REST API.
//!
//! [`HttpClient`] implements the estimator's pricing source, quote gateway
//! and filter sink:
//!
//! | operation      | request                           |
//! |----------------|-----------------------------------|
//! | company rates  | `GET {base}/api/companies`        |
//! | submit quote   | `POST {base}/api/users/quote`     |
//! | filter report  | `POST {base}/api/user-filters/store` |

pub mod client;
pub mod config;
pub mod response;

pub use client::{ClientBuildError, HttpClient};
pub use config::ApiConfig;
pub use response::interpret_quote_response;
