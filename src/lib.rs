pub mod api;
pub mod config;
pub mod database;
pub mod error;
pub mod services;
pub mod types;

#[cfg(test)]
pub mod test_support;

pub use config::Config;
pub use database::Database;
pub use error::{ServiceError, ServiceResult};
pub use types::*;
