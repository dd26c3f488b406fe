use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{error::PredictError, features::FeatureVector};

/// Family of regressor backing a loaded artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    Linear,
    TreeEnsemble,
}

impl ModelKind {
    pub const fn display_name(self) -> &'static str {
        match self {
            ModelKind::Linear => "LinearRegression",
            ModelKind::TreeEnsemble => "TreeEnsembleRegressor",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A trained regressor mapping feature rows to scalar predictions.
///
/// Implementations are immutable once constructed and are shared across
/// request handlers without locking.
pub trait ProfitModel: Send + Sync + fmt::Debug {
    fn kind(&self) -> ModelKind;

    /// Number of columns every row passed to [`ProfitModel::predict`] must have.
    fn n_features(&self) -> usize;

    /// Scores a batch of rows, returning one prediction per row.
    fn predict(&self, batch: &[&[f64]]) -> Result<Vec<f64>, PredictError>;

    /// Scores a single feature vector as a batch of one.
    fn predict_one(&self, features: &FeatureVector) -> Result<f64, PredictError> {
        let model = self.kind().display_name();
        let predictions = self.predict(&[features.as_slice()])?;
        let value = match predictions.as_slice() {
            [value] => *value,
            other => {
                return Err(PredictError::OutputLength {
                    model,
                    expected: 1,
                    found: other.len(),
                });
            }
        };
        if !value.is_finite() {
            return Err(PredictError::NonFinite { model, value });
        }
        Ok(value)
    }
}

pub(crate) fn check_width(
    kind: ModelKind,
    expected: usize,
    row: &[f64],
) -> Result<(), PredictError> {
    if row.len() != expected {
        return Err(PredictError::FeatureCountMismatch {
            model: kind.display_name(),
            expected,
            found: row.len(),
        });
    }
    Ok(())
}
