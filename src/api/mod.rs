pub mod handlers;
pub mod routes;

use crate::services::QueryService;
use std::sync::Arc;

#[derive(Clone)]
pub struct ApiState {
    pub query: Arc<QueryService>,
}

impl ApiState {
    pub fn new(query: Arc<QueryService>) -> Self {
        Self { query }
    }
}

pub use routes::create_router;
