use crate::sentiment::{Sentiment, SentimentClassifier};
use crate::storage::ReviewStore;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ReviewStore>,
    pub classifier: Arc<SentimentClassifier>,
}

/// Request to post a new review
#[derive(Debug, Deserialize)]
pub struct PostReviewRequest {
    pub text: String,
}

/// Query parameters for listing reviews
#[derive(Debug, Deserialize)]
pub struct ListReviewsQuery {
    pub sentiment: Option<Sentiment>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub total_reviews: u64,
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Application error type
#[derive(Debug)]
#[allow(dead_code)]
pub enum AppError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}
