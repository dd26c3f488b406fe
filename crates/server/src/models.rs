use profit_api_core::FeatureVector;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

pub const WELCOME_MESSAGE: &str = "Welcome to the Profit Prediction API!";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeResponse {
    pub message: String,
}

impl Default for WelcomeResponse {
    fn default() -> Self {
        Self {
            message: WELCOME_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub predicted_profit: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// A validated prediction request with every field coerced to `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub worker_salary: f64,
    pub raw_material_cost: f64,
    pub targeted_materials_produced: f64,
}

impl PredictionRequest {
    /// Parses a raw request body: JSON syntax, then key presence, then numeric coercion.
    pub fn parse(body: &str) -> Result<Self, ApiError> {
        let value: Value =
            serde_json::from_str(body).map_err(|err| ApiError::MalformedBody(err.to_string()))?;
        RequestFields::extract(&value)?.coerce()
    }

    pub fn features(&self) -> FeatureVector {
        FeatureVector::new(
            self.worker_salary,
            self.raw_material_cost,
            self.targeted_materials_produced,
        )
    }
}

/// The three required keys, present but not yet type checked.
#[derive(Debug, Clone, Copy)]
pub struct RequestFields<'a> {
    pub worker_salary: &'a Value,
    pub raw_material_cost: &'a Value,
    pub targeted_materials_produced: &'a Value,
}

impl<'a> RequestFields<'a> {
    /// Non-object bodies carry none of the keys and are reported as missing fields.
    pub fn extract(body: &'a Value) -> Result<Self, ApiError> {
        let object = body.as_object().ok_or(ApiError::MissingFields)?;
        let field = |key: &str| object.get(key).ok_or(ApiError::MissingFields);
        Ok(Self {
            worker_salary: field("worker_salary")?,
            raw_material_cost: field("raw_material_cost")?,
            targeted_materials_produced: field("targeted_materials_produced")?,
        })
    }

    pub fn coerce(&self) -> Result<PredictionRequest, ApiError> {
        Ok(PredictionRequest {
            worker_salary: coerce_number(self.worker_salary)?,
            raw_material_cost: coerce_number(self.raw_material_cost)?,
            targeted_materials_produced: coerce_number(self.targeted_materials_produced)?,
        })
    }
}

/// Accepts JSON numbers, booleans (`1.0` / `0.0`) and strings holding a float
/// literal. Anything that does not end up as a finite `f64` is a type error.
fn coerce_number(value: &Value) -> Result<f64, ApiError> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    };
    number
        .filter(|number| number.is_finite())
        .ok_or(ApiError::InvalidType)
}
