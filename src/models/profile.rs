use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClientProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company_name: String,
    pub contact_number: String,
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VendorProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub hourly_rate: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Portfolio {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub title: String,
    pub description: String,
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Certification {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub name: String,
    pub authority: String,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Education {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub institution: String,
    pub degree: String,
    pub graduation_year: Option<i32>,
}
