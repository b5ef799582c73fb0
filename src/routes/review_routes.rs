use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::{
    dto::review_dto::{CreateReviewPayload, ReviewResponse},
    error::Result,
    middleware::auth::AuthUser,
    AppState,
};

#[axum::debug_handler]
pub async fn create_review(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateReviewPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let review = state.review_service.create(user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(ReviewResponse::from(review))))
}

#[axum::debug_handler]
pub async fn list_reviews(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse> {
    let reviews = state.review_service.list_by_reviewer(user.id).await?;
    let items: Vec<ReviewResponse> = reviews.into_iter().map(Into::into).collect();
    Ok(Json(items))
}
