use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::bid::{Bid, BidStatus};
use crate::models::tender::{Comment, Tag, Tender, TenderStatus};
use crate::services::tender_service::TenderDetail;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTenderPayload {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub attachment: Option<String>,
    pub min_budget: Decimal,
    pub max_budget: Decimal,
    #[validate(range(min = 1))]
    pub max_duration: i32,
    pub deadline: NaiveDate,
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TenderListQuery {
    pub status: Option<TenderStatus>,
    pub tag: Option<String>,
    pub category: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenderResponse {
    pub id: Uuid,
    pub client_id: Uuid,
    pub title: String,
    pub description: String,
    pub attachment: Option<String>,
    pub min_budget: Decimal,
    pub max_budget: Decimal,
    pub max_duration: i32,
    pub deadline: NaiveDate,
    pub status: TenderStatus,
    pub category_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenderDetailResponse {
    #[serde(flatten)]
    pub tender: TenderResponse,
    pub tags: Vec<TagResponse>,
    pub bids: Vec<BidResponse>,
    pub comments: Vec<CommentResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagResponse {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCommentPayload {
    #[validate(length(min = 1))]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub tender_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PlaceBidPayload {
    pub amount: Decimal,
    #[validate(range(min = 1))]
    pub delivery_time: i32,
    #[validate(length(min = 1))]
    pub proposal: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptBidPayload {
    pub bid_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BidResponse {
    pub id: Uuid,
    pub tender_id: Uuid,
    pub vendor_id: Uuid,
    pub amount: Decimal,
    pub delivery_time: i32,
    pub proposal: String,
    pub status: BidStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Tender> for TenderResponse {
    fn from(value: Tender) -> Self {
        Self {
            id: value.id,
            client_id: value.client_id,
            title: value.title,
            description: value.description,
            attachment: value.attachment,
            min_budget: value.min_budget,
            max_budget: value.max_budget,
            max_duration: value.max_duration,
            deadline: value.deadline,
            status: value.status,
            category_id: value.category_id,
            created_at: value.created_at,
        }
    }
}

impl From<Tag> for TagResponse {
    fn from(value: Tag) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

impl From<Comment> for CommentResponse {
    fn from(value: Comment) -> Self {
        Self {
            id: value.id,
            tender_id: value.tender_id,
            author_id: value.author_id,
            content: value.content,
            created_at: value.created_at,
        }
    }
}

impl From<Bid> for BidResponse {
    fn from(value: Bid) -> Self {
        Self {
            id: value.id,
            tender_id: value.tender_id,
            vendor_id: value.vendor_id,
            amount: value.amount,
            delivery_time: value.delivery_time,
            proposal: value.proposal,
            status: value.status,
            created_at: value.created_at,
        }
    }
}

impl From<TenderDetail> for TenderDetailResponse {
    fn from(value: TenderDetail) -> Self {
        Self {
            tender: value.tender.into(),
            tags: value.tags.into_iter().map(Into::into).collect(),
            bids: value.bids.into_iter().map(Into::into).collect(),
            comments: value.comments.into_iter().map(Into::into).collect(),
        }
    }
}
