//! Shared application state for all routes.

use crate::config::DeploymentMode;
use crate::service::ResourceStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ResourceStore>,
    pub mode: DeploymentMode,
}

impl AppState {
    pub fn new(store: Arc<dyn ResourceStore>, mode: DeploymentMode) -> Self {
        AppState { store, mode }
    }
}
