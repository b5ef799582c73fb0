use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::user_dto::{
        CertificationResponse, ClientProfileResponse, CreateCertificationPayload,
        CreateEducationPayload, CreatePortfolioPayload, EducationResponse, PortfolioResponse,
        SkillResponse, UpdateClientProfilePayload, UpdateUserPayload, UpdateVendorProfilePayload,
        UserResponse, VendorDetailResponse, VendorSummaryResponse,
    },
    error::Result,
    middleware::auth::AuthUser,
    AppState,
};

#[axum::debug_handler]
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse> {
    let profile = state.user_service.get_by_id(user.id).await?;
    Ok(Json(UserResponse::from(profile)))
}

#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<UpdateUserPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let profile = state.user_service.update_profile(user.id, payload).await?;
    Ok(Json(UserResponse::from(profile)))
}

#[axum::debug_handler]
pub async fn get_client_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse> {
    let profile = state.profile_service.get_client_profile(user.id).await?;
    Ok(Json(ClientProfileResponse::from(profile)))
}

#[axum::debug_handler]
pub async fn update_client_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<UpdateClientProfilePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let profile = state
        .profile_service
        .update_client_profile(user.id, payload)
        .await?;
    Ok(Json(ClientProfileResponse::from(profile)))
}

#[axum::debug_handler]
pub async fn list_vendors(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let vendors = state.profile_service.list_vendors().await?;
    let items: Vec<VendorSummaryResponse> = vendors.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[axum::debug_handler]
pub async fn get_vendor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let detail = state.profile_service.get_vendor_detail(id).await?;
    Ok(Json(VendorDetailResponse::from(detail)))
}

#[axum::debug_handler]
pub async fn update_vendor_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<UpdateVendorProfilePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    state
        .profile_service
        .update_vendor_profile(user.id, payload)
        .await?;
    let detail = state.profile_service.get_vendor_detail(user.id).await?;
    Ok(Json(VendorDetailResponse::from(detail)))
}

#[axum::debug_handler]
pub async fn add_portfolio(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreatePortfolioPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let portfolio = state.profile_service.add_portfolio(user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(PortfolioResponse::from(portfolio))))
}

#[axum::debug_handler]
pub async fn delete_portfolio(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.profile_service.delete_portfolio(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn add_certification(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateCertificationPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let certification = state
        .profile_service
        .add_certification(user.id, payload)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(CertificationResponse::from(certification)),
    ))
}

#[axum::debug_handler]
pub async fn delete_certification(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.profile_service.delete_certification(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn add_education(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateEducationPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let education = state.profile_service.add_education(user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(EducationResponse::from(education))))
}

#[axum::debug_handler]
pub async fn delete_education(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.profile_service.delete_education(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn list_skills(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let skills = state.profile_service.list_skills().await?;
    let items: Vec<SkillResponse> = skills.into_iter().map(Into::into).collect();
    Ok(Json(items))
}
