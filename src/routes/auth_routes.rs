use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::user_dto::{AuthResponse, LoginPayload, RegisterPayload, UserResponse},
    error::Result,
    AppState,
};

#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state.user_service.register(payload).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let (token, user) = state.user_service.login(payload).await?;
    Ok(Json(AuthResponse {
        token,
        user: UserResponse::from(user),
    }))
}
