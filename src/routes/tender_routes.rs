use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::project_dto::ProjectResponse,
    dto::tender_dto::{
        AcceptBidPayload, BidResponse, CommentResponse, CreateCommentPayload,
        CreateTenderPayload, PlaceBidPayload, TagResponse, TenderDetailResponse,
        TenderListQuery, TenderResponse,
    },
    error::Result,
    middleware::auth::AuthUser,
    permissions,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/tenders",
    request_body = CreateTenderPayload,
    responses(
        (status = 201, description = "Tender created successfully", body = Json<TenderResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Client capability required")
    )
)]
#[axum::debug_handler]
pub async fn create_tender(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateTenderPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    permissions::require_client(&user)?;
    let tender = state.tender_service.create(user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(TenderResponse::from(tender))))
}

#[utoipa::path(
    get,
    path = "/api/tenders",
    params(
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("tag" = Option<String>, Query, description = "Filter by tag name"),
        ("category" = Option<Uuid>, Query, description = "Filter by category")
    ),
    responses(
        (status = 200, description = "List of tenders", body = Json<Vec<TenderResponse>>)
    )
)]
#[axum::debug_handler]
pub async fn list_tenders(
    State(state): State<AppState>,
    Query(query): Query<TenderListQuery>,
) -> Result<impl IntoResponse> {
    let tenders = state.tender_service.list(query).await?;
    let items: Vec<TenderResponse> = tenders.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/api/tenders/{id}",
    params(
        ("id" = Uuid, Path, description = "Tender ID")
    ),
    responses(
        (status = 200, description = "Tender with bids and comments", body = Json<TenderDetailResponse>),
        (status = 404, description = "Tender not found")
    )
)]
#[axum::debug_handler]
pub async fn get_tender(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let detail = state.tender_service.get_detail(id).await?;
    Ok(Json(TenderDetailResponse::from(detail)))
}

#[axum::debug_handler]
pub async fn add_comment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateCommentPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let comment = state
        .tender_service
        .add_comment(id, user.id, payload.content)
        .await?;
    Ok((StatusCode::CREATED, Json(CommentResponse::from(comment))))
}

#[utoipa::path(
    post,
    path = "/api/tenders/{id}/place_bid",
    params(
        ("id" = Uuid, Path, description = "Tender ID")
    ),
    request_body = PlaceBidPayload,
    responses(
        (status = 201, description = "Bid placed successfully", body = Json<BidResponse>),
        (status = 400, description = "Tender is not open"),
        (status = 403, description = "Vendor capability required or own tender"),
        (status = 409, description = "Bid already placed")
    )
)]
#[axum::debug_handler]
pub async fn place_bid(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PlaceBidPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    permissions::require_vendor(&user)?;
    let bid = state.bid_service.place_bid(user.id, id, payload).await?;
    Ok((StatusCode::CREATED, Json(BidResponse::from(bid))))
}

#[utoipa::path(
    post,
    path = "/api/tenders/{id}/accept_bid",
    params(
        ("id" = Uuid, Path, description = "Tender ID")
    ),
    request_body = AcceptBidPayload,
    responses(
        (status = 201, description = "Bid accepted, project created", body = Json<ProjectResponse>),
        (status = 400, description = "Tender is not open"),
        (status = 403, description = "Only the tender owner may accept bids"),
        (status = 404, description = "Tender or bid not found")
    )
)]
#[axum::debug_handler]
pub async fn accept_bid(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AcceptBidPayload>,
) -> Result<impl IntoResponse> {
    let project = state
        .bid_service
        .accept_bid(user.id, id, payload.bid_id)
        .await?;
    Ok((StatusCode::CREATED, Json(ProjectResponse::from(project))))
}

#[axum::debug_handler]
pub async fn list_bids(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse> {
    let bids = state.bid_service.list_for(&user).await?;
    let items: Vec<BidResponse> = bids.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[axum::debug_handler]
pub async fn list_tags(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let tags = state.tender_service.list_tags().await?;
    let items: Vec<TagResponse> = tags.into_iter().map(Into::into).collect();
    Ok(Json(items))
}
