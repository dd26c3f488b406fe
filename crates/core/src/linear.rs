//! Ordinary least-squares style linear regressor.

use serde::{Deserialize, Serialize};

use crate::{
    error::PredictError,
    model::{ModelKind, ProfitModel, check_width},
};

/// `intercept + Σ coefficients[i] × x[i]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressor {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearRegressor {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.coefficients.is_empty() {
            return Err("linear model has no coefficients".to_string());
        }
        if let Some(idx) = self.coefficients.iter().position(|c| !c.is_finite()) {
            return Err(format!("coefficient {idx} is not finite"));
        }
        if !self.intercept.is_finite() {
            return Err("intercept is not finite".to_string());
        }
        Ok(())
    }
}

impl ProfitModel for LinearRegressor {
    fn kind(&self) -> ModelKind {
        ModelKind::Linear
    }

    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, batch: &[&[f64]]) -> Result<Vec<f64>, PredictError> {
        batch
            .iter()
            .map(|row| {
                check_width(self.kind(), self.n_features(), row)?;
                Ok(self.intercept
                    + self
                        .coefficients
                        .iter()
                        .zip(row.iter())
                        .map(|(coef, x)| coef * x)
                        .sum::<f64>())
            })
            .collect()
    }
}
