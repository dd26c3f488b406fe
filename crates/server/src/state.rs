use std::sync::Arc;

use profit_api_config::AppConfig;
use profit_api_core::{ModelHandle, ProfitModel};

use crate::error::ApiError;

/// Shared, read-only request state. Built once and handed to Rocket via `manage`.
#[derive(Debug, Clone)]
pub struct AppState {
    model: ModelHandle,
}

impl AppState {
    /// Loads the configured artifact. A missing or broken artifact yields an
    /// unloaded handle instead of an error.
    pub fn bootstrap(config: &AppConfig) -> Self {
        Self::new(ModelHandle::load(&config.model.artifact))
    }

    pub fn new(model: ModelHandle) -> Self {
        Self { model }
    }

    pub fn handle(&self) -> &ModelHandle {
        &self.model
    }

    pub fn model(&self) -> Result<Arc<dyn ProfitModel>, ApiError> {
        self.model.model().cloned().ok_or(ApiError::ModelUnavailable)
    }
}
