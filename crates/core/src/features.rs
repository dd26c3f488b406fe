use serde::{Deserialize, Serialize};

/// Column order the model was trained on.
pub const FEATURE_NAMES: [&str; 3] = [
    "worker_salary",
    "raw_material_cost",
    "targeted_materials_produced",
];

/// Number of inputs the service passes to the model.
pub const FEATURE_COUNT: usize = FEATURE_NAMES.len();

/// One row of model input in [`FEATURE_NAMES`] order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(worker_salary: f64, raw_material_cost: f64, targeted_materials_produced: f64) -> Self {
        Self([worker_salary, raw_material_cost, targeted_materials_produced])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}
