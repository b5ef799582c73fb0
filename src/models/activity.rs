use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "activity_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Comment,
    Attachment,
    PriceChange,
    DeadlineChange,
    Delivery,
    RevisionRequest,
    ProjectCompletion,
}

impl ActivityKind {
    /// Kinds only ever written by their lifecycle action, never through
    /// the generic activity endpoint.
    pub fn is_lifecycle_reserved(&self) -> bool {
        !matches!(self, ActivityKind::Comment | ActivityKind::Attachment)
    }

    pub fn default_description(&self) -> &'static str {
        match self {
            ActivityKind::Comment => "Comment",
            ActivityKind::Attachment => "Attachment added",
            ActivityKind::PriceChange => "Price updated",
            ActivityKind::DeadlineChange => "Deadline updated",
            ActivityKind::Delivery => "Project delivered",
            ActivityKind::RevisionRequest => "Revision requested",
            ActivityKind::ProjectCompletion => "Project completed",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Activity {
    pub id: i64,
    pub project_id: Uuid,
    pub actor_id: Uuid,
    pub kind: ActivityKind,
    pub description: String,
    pub attachment: Option<String>,
    pub old_price: Option<Decimal>,
    pub new_price: Option<Decimal>,
    pub old_deadline: Option<NaiveDate>,
    pub new_deadline: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}
