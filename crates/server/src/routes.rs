use rocket::{
    Catcher, Request, Route, State,
    data::{Capped, Limits},
    http::Status,
    serde::json::Json,
};
use tracing::debug;

use crate::{
    error::ApiError,
    inference::predict_async,
    models::{ErrorResponse, PredictionRequest, PredictionResponse, WelcomeResponse},
    state::AppState,
};

pub fn routes() -> Vec<Route> {
    routes![index, predict]
}

pub fn catchers() -> Vec<Catcher> {
    catchers![default_catcher]
}

#[get("/")]
fn index() -> Json<WelcomeResponse> {
    Json(WelcomeResponse::default())
}

// The body is taken as raw text so content type and JSON errors are ours to report.
#[post("/predict", data = "<body>")]
async fn predict(
    state: &State<AppState>,
    limits: &Limits,
    body: Result<Capped<String>, std::io::Error>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let model = state.model()?;
    let body = body.map_err(|err| ApiError::MalformedBody(err.to_string()))?;
    if !body.is_complete() {
        let limit = limits.get("string").unwrap_or(Limits::STRING);
        return Err(ApiError::PayloadTooLarge {
            limit: limit.to_string(),
        });
    }
    let body = body.into_inner();
    let request = PredictionRequest::parse(&body)
        .inspect_err(|err| debug!(error = %err, "rejected prediction request"))?;
    let predicted_profit = predict_async(model, request.features()).await?;
    Ok(Json(PredictionResponse { predicted_profit }))
}

#[catch(default)]
fn default_catcher(status: Status, req: &Request<'_>) -> (Status, Json<ErrorResponse>) {
    let error = match status.code {
        404 => format!("Resource not found: {}", req.uri().path()),
        _ => status.reason_lossy().to_string(),
    };
    (status, Json(ErrorResponse { error }))
}
