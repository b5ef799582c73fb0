use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "tender_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TenderStatus {
    Open,
    InProgress,
    Completed,
    Cancelled,
}

impl TenderStatus {
    pub fn accepts_bids(&self) -> bool {
        matches!(self, TenderStatus::Open)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tender {
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

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub tender_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_open_tenders_accept_bids() {
        assert!(TenderStatus::Open.accepts_bids());
        assert!(!TenderStatus::InProgress.accepts_bids());
        assert!(!TenderStatus::Completed.accepts_bids());
        assert!(!TenderStatus::Cancelled.accepts_bids());
    }

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&TenderStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
    }
}
