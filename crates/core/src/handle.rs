use std::{fmt, path::Path, sync::Arc};

use tracing::{info, warn};

use crate::{artifact::load_model, model::ProfitModel};

/// The process-wide model, resolved once at startup.
///
/// A missing or broken artifact does not abort startup; the handle records why
/// it is unloaded and prediction requests short-circuit instead.
#[derive(Clone)]
pub enum ModelHandle {
    Loaded(Arc<dyn ProfitModel>),
    Unloaded { reason: String },
}

impl ModelHandle {
    pub fn load(path: &Path) -> Self {
        match load_model(path) {
            Ok(model) => {
                info!(
                    path = %path.display(),
                    kind = %model.kind(),
                    n_features = model.n_features(),
                    "Model loaded"
                );
                Self::Loaded(model)
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Model not loaded");
                Self::Unloaded {
                    reason: err.to_string(),
                }
            }
        }
    }

    pub fn loaded(model: impl ProfitModel + 'static) -> Self {
        Self::Loaded(Arc::new(model))
    }

    pub fn unloaded(reason: impl Into<String>) -> Self {
        Self::Unloaded {
            reason: reason.into(),
        }
    }

    pub fn model(&self) -> Option<&Arc<dyn ProfitModel>> {
        match self {
            ModelHandle::Loaded(model) => Some(model),
            ModelHandle::Unloaded { .. } => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, ModelHandle::Loaded(_))
    }
}

impl fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelHandle::Loaded(model) => f
                .debug_struct("Loaded")
                .field("kind", &model.kind())
                .field("n_features", &model.n_features())
                .finish(),
            ModelHandle::Unloaded { reason } => {
                f.debug_struct("Unloaded").field("reason", reason).finish()
            }
        }
    }
}
