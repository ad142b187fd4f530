pub mod api_types;
pub mod models;

pub use api_types::*;
pub use models::*;
