//! On-disk model artifact.
//!
//! ```text
//! {
//!   "format_version": 1,
//!   "feature_names": ["worker_salary", "raw_material_cost", "targeted_materials_produced"],
//!   "model": { "type": "linear", "coefficients": [..], "intercept": .. }
//! }
//! ```

use std::{fs, io::ErrorKind, path::Path, sync::Arc};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{ArtifactError, Result},
    features::FEATURE_NAMES,
    linear::LinearRegressor,
    model::ProfitModel,
    tree::TreeEnsemble,
};

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelSpec {
    Linear(LinearRegressor),
    TreeEnsemble(TreeEnsemble),
}

impl ModelSpec {
    fn as_model(&self) -> &dyn ProfitModel {
        match self {
            ModelSpec::Linear(model) => model,
            ModelSpec::TreeEnsemble(model) => model,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    pub model: ModelSpec,
}

impl ModelArtifact {
    /// Wraps a model spec with the service's feature order.
    pub fn new(model: ModelSpec) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            feature_names: Some(FEATURE_NAMES.iter().map(|name| name.to_string()).collect()),
            model,
        }
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let artifact: Self = serde_json::from_slice(bytes)?;
        artifact.validate()?;
        Ok(artifact)
    }

    pub fn read(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => ArtifactError::NotFound {
                path: path.to_path_buf(),
            },
            _ => ArtifactError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
        debug!(path = %path.display(), bytes = bytes.len(), "read model artifact");
        Self::from_slice(&bytes)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let serialized = serde_json::to_vec_pretty(self)?;
        fs::write(path, serialized).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.format_version != FORMAT_VERSION {
            return Err(ArtifactError::UnsupportedVersion {
                found: self.format_version,
                expected: FORMAT_VERSION,
            });
        }

        match &self.model {
            ModelSpec::Linear(model) => model.validate(),
            ModelSpec::TreeEnsemble(model) => model.validate(),
        }
        .map_err(ArtifactError::Validation)?;

        if let Some(names) = &self.feature_names {
            let n_features = self.model.as_model().n_features();
            if names.len() != n_features {
                return Err(ArtifactError::Validation(format!(
                    "artifact lists {} feature names but the model uses {n_features} features",
                    names.len()
                )));
            }
            if names.len() == FEATURE_NAMES.len() && names.iter().ne(FEATURE_NAMES.iter()) {
                return Err(ArtifactError::Validation(format!(
                    "feature order {names:?} does not match expected {FEATURE_NAMES:?}"
                )));
            }
        }
        Ok(())
    }

    pub fn into_model(self) -> Arc<dyn ProfitModel> {
        match self.model {
            ModelSpec::Linear(model) => Arc::new(model),
            ModelSpec::TreeEnsemble(model) => Arc::new(model),
        }
    }
}

/// Reads, validates and instantiates the model stored at `path`.
pub fn load_model(path: &Path) -> Result<Arc<dyn ProfitModel>> {
    ModelArtifact::read(path).map(ModelArtifact::into_model)
}
