use std::sync::Arc;

use bobbin_core::TaskService;

/// State shared across routes.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TaskService>,
}

impl AppState {
    pub fn new(service: Arc<TaskService>) -> Self {
        Self { service }
    }
}
