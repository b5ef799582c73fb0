use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::project_dto::{
        ActivityListQuery, ActivityResponse, CreateActivityPayload, DeliverPayload,
        ProjectResponse, RequestRevisionPayload, UpdateDeadlinePayload, UpdatePricePayload,
    },
    error::Result,
    middleware::auth::AuthUser,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/projects",
    responses(
        (status = 200, description = "Projects the caller participates in", body = Json<Vec<ProjectResponse>>)
    )
)]
#[axum::debug_handler]
pub async fn list_projects(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse> {
    let projects = state.project_service.list_for(user.id).await?;
    let items: Vec<ProjectResponse> = projects.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project detail", body = Json<ProjectResponse>),
        (status = 404, description = "Project not found")
    )
)]
#[axum::debug_handler]
pub async fn get_project(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let project = state.project_service.get_for_participant(user.id, id).await?;
    Ok(Json(ProjectResponse::from(project)))
}

#[utoipa::path(
    post,
    path = "/api/projects/{id}/deliver",
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    request_body = DeliverPayload,
    responses(
        (status = 201, description = "Delivery recorded", body = Json<ActivityResponse>),
        (status = 400, description = "Project is not active"),
        (status = 403, description = "Only the project vendor may deliver"),
        (status = 404, description = "Project not found")
    )
)]
#[axum::debug_handler]
pub async fn deliver(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    payload: Option<Json<DeliverPayload>>,
) -> Result<impl IntoResponse> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    let activity = state.project_service.deliver(user.id, id, payload).await?;
    Ok((StatusCode::CREATED, Json(ActivityResponse::from(activity))))
}

#[utoipa::path(
    post,
    path = "/api/projects/{id}/request_revision",
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    request_body = RequestRevisionPayload,
    responses(
        (status = 201, description = "Revision requested", body = Json<ActivityResponse>),
        (status = 400, description = "Project is not in progress"),
        (status = 403, description = "Only the project client may request revisions"),
        (status = 404, description = "Project not found")
    )
)]
#[axum::debug_handler]
pub async fn request_revision(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    payload: Option<Json<RequestRevisionPayload>>,
) -> Result<impl IntoResponse> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    let activity = state
        .project_service
        .request_revision(user.id, id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(ActivityResponse::from(activity))))
}

#[utoipa::path(
    post,
    path = "/api/projects/{id}/complete",
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project completed", body = Json<ProjectResponse>),
        (status = 400, description = "Project is not active"),
        (status = 403, description = "Only the project client may complete"),
        (status = 404, description = "Project not found")
    )
)]
#[axum::debug_handler]
pub async fn complete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let project = state.project_service.complete(user.id, id).await?;
    Ok(Json(ProjectResponse::from(project)))
}

#[utoipa::path(
    post,
    path = "/api/projects/{id}/update_price",
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    request_body = UpdatePricePayload,
    responses(
        (status = 200, description = "Price updated", body = Json<ProjectResponse>),
        (status = 400, description = "Missing or invalid new_price"),
        (status = 404, description = "Project not found")
    )
)]
#[axum::debug_handler]
pub async fn update_price(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePricePayload>,
) -> Result<impl IntoResponse> {
    let project = state.project_service.update_price(user.id, id, payload).await?;
    Ok(Json(ProjectResponse::from(project)))
}

#[utoipa::path(
    post,
    path = "/api/projects/{id}/update_deadline",
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    request_body = UpdateDeadlinePayload,
    responses(
        (status = 200, description = "Deadline updated", body = Json<ProjectResponse>),
        (status = 400, description = "Missing or invalid new_deadline"),
        (status = 404, description = "Project not found")
    )
)]
#[axum::debug_handler]
pub async fn update_deadline(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDeadlinePayload>,
) -> Result<impl IntoResponse> {
    let project = state
        .project_service
        .update_deadline(user.id, id, payload)
        .await?;
    Ok(Json(ProjectResponse::from(project)))
}

#[axum::debug_handler]
pub async fn list_activities(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Query(query): Query<ActivityListQuery>,
) -> Result<impl IntoResponse> {
    let activities = state.activity_service.list(user.id, id, query).await?;
    let items: Vec<ActivityResponse> = activities.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[axum::debug_handler]
pub async fn create_activity(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateActivityPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let activity = state.activity_service.create(user.id, id, payload).await?;
    Ok((StatusCode::CREATED, Json(ActivityResponse::from(activity))))
}
