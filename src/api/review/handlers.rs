use crate::api::models::*;
use crate::storage::{ReviewToSave, SavedReview};
use axum::{
    Json,
    extract::{Query, State},
};
use tracing::info;

pub async fn add_review_handler(
    State(state): State<AppState>,
    Json(request): Json<PostReviewRequest>,
) -> Result<Json<SavedReview>, AppError> {
    // Classify
    let sentiment = state.classifier.classify(&request.text);

    info!(%sentiment, "Classified review");

    // Stamp & persist
    let review = ReviewToSave::new(request.text, sentiment);
    let saved = state
        .store
        .save(review)
        .await
        .map_err(|e| AppError::Internal(format!("Error adding review record to db: {}", e)))?;

    info!(review_id = saved.id, "Review added");

    Ok(Json(saved))
}

pub async fn list_reviews_handler(
    State(state): State<AppState>,
    Query(query): Query<ListReviewsQuery>,
) -> Result<Json<Vec<SavedReview>>, AppError> {
    let reviews = state
        .store
        .list(query.sentiment)
        .await
        .map_err(|e| AppError::Internal(format!("Error reading review records from db: {}", e)))?;

    info!(found = reviews.len(), "Listed reviews");

    Ok(Json(reviews))
}
