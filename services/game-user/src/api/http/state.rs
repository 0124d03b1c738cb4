use std::sync::Arc;

use crate::application::UserService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<UserService>,
}

impl AppState {
    pub fn new(service: Arc<UserService>) -> Self {
        Self { service }
    }
}
