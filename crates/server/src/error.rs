use rocket::{
    Request,
    http::Status,
    response::{self, Responder},
    serde::json::Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Every failure a request can end in. Each maps to one status and one
/// `{"error": ...}` body.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Model not loaded. Please check the server logs.")]
    ModelUnavailable,
    #[error("Malformed JSON body: {0}")]
    MalformedBody(String),
    #[error("Request body exceeds the {limit} limit.")]
    PayloadTooLarge { limit: String },
    #[error(
        "Invalid input data. Please provide worker_salary, raw_material_cost, and targeted_materials_produced."
    )]
    MissingFields,
    #[error("Invalid data type. Please ensure all inputs are numbers.")]
    InvalidType,
    #[error("{0}")]
    Inference(String),
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::MalformedBody(_) | ApiError::MissingFields | ApiError::InvalidType => {
                Status::BadRequest
            }
            ApiError::PayloadTooLarge { .. } => Status::PayloadTooLarge,
            ApiError::ModelUnavailable | ApiError::Inference(_) => Status::InternalServerError,
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).respond_to(req)
    }
}
