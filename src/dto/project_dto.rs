use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::activity::{Activity, ActivityKind};
use crate::models::project::{Project, ProjectStatus};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectResponse {
    pub id: Uuid,
    pub tender_id: Uuid,
    pub client_id: Uuid,
    pub vendor_id: Uuid,
    pub agreed_amount: Decimal,
    pub start_date: NaiveDate,
    pub deadline: NaiveDate,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DeliverPayload {
    pub description: Option<String>,
    pub attachment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RequestRevisionPayload {
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct UpdatePricePayload {
    pub new_price: Option<Decimal>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct UpdateDeadlinePayload {
    pub new_deadline: Option<NaiveDate>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateActivityPayload {
    pub kind: ActivityKind,
    #[validate(length(min = 1))]
    pub description: String,
    pub attachment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ActivityListQuery {
    pub order: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityResponse {
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

impl From<Project> for ProjectResponse {
    fn from(value: Project) -> Self {
        Self {
            id: value.id,
            tender_id: value.tender_id,
            client_id: value.client_id,
            vendor_id: value.vendor_id,
            agreed_amount: value.agreed_amount,
            start_date: value.start_date,
            deadline: value.deadline,
            status: value.status,
            created_at: value.created_at,
        }
    }
}

impl From<Activity> for ActivityResponse {
    fn from(value: Activity) -> Self {
        Self {
            id: value.id,
            project_id: value.project_id,
            actor_id: value.actor_id,
            kind: value.kind,
            description: value.description,
            attachment: value.attachment,
            old_price: value.old_price,
            new_price: value.new_price,
            old_deadline: value.old_deadline,
            new_deadline: value.new_deadline,
            created_at: value.created_at,
        }
    }
}
