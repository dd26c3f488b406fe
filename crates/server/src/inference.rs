use std::sync::Arc;

use profit_api_core::{FeatureVector, ProfitModel};
use rocket::tokio;
use tracing::{debug, error};

use crate::error::ApiError;

/// Scores one feature vector on the blocking pool so model compute never
/// stalls the async workers.
pub async fn predict_async(
    model: Arc<dyn ProfitModel>,
    features: FeatureVector,
) -> Result<f64, ApiError> {
    let join_result = tokio::task::spawn_blocking(move || model.predict_one(&features)).await;

    match join_result {
        Ok(Ok(value)) => {
            debug!(?features, predicted_profit = value, "prediction complete");
            Ok(value)
        }
        Ok(Err(err)) => {
            error!(error = %err, ?features, "prediction failed");
            Err(ApiError::Inference(err.to_string()))
        }
        Err(err) => {
            error!(error = %err, "prediction task aborted");
            Err(ApiError::Inference(format!("prediction task failed: {err}")))
        }
    }
}
