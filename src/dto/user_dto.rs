use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::review_dto::ReviewResponse;
use crate::models::profile::{Certification, ClientProfile, Education, Portfolio, Skill};
use crate::models::user::{Capability, User};
use crate::services::profile_service::{VendorDetail, VendorSummary};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterPayload {
    #[validate(length(min = 3, max = 32))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub password_confirmation: String,
    pub user_type: Capability,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginPayload {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub bio: String,
    pub location: String,
    pub language: String,
    pub profile_picture: Option<String>,
    pub capabilities: Vec<Capability>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateUserPayload {
    pub bio: Option<String>,
    pub location: Option<String>,
    pub language: Option<String>,
    pub profile_picture: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientProfileResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company_name: String,
    pub contact_number: String,
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateClientProfilePayload {
    pub company_name: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateVendorProfilePayload {
    pub hourly_rate: Option<Decimal>,
    pub skill_ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillResponse {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePortfolioPayload {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCertificationPayload {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub authority: String,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificationResponse {
    pub id: Uuid,
    pub name: String,
    pub authority: String,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateEducationPayload {
    #[validate(length(min = 1))]
    pub institution: String,
    #[validate(length(min = 1))]
    pub degree: String,
    pub graduation_year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationResponse {
    pub id: Uuid,
    pub institution: String,
    pub degree: String,
    pub graduation_year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorSummaryResponse {
    pub id: Uuid,
    pub username: String,
    pub location: String,
    pub hourly_rate: Option<Decimal>,
    pub average_rating: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorDetailResponse {
    pub id: Uuid,
    pub username: String,
    pub bio: String,
    pub location: String,
    pub language: String,
    pub profile_picture: Option<String>,
    pub hourly_rate: Option<Decimal>,
    pub skills: Vec<SkillResponse>,
    pub portfolios: Vec<PortfolioResponse>,
    pub certifications: Vec<CertificationResponse>,
    pub education: Vec<EducationResponse>,
    pub reviews: Vec<ReviewResponse>,
    pub average_rating: Option<f64>,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            username: value.username,
            email: value.email,
            bio: value.bio,
            location: value.location,
            language: value.language,
            profile_picture: value.profile_picture,
            capabilities: value.capabilities,
            created_at: value.created_at,
        }
    }
}

impl From<ClientProfile> for ClientProfileResponse {
    fn from(value: ClientProfile) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            company_name: value.company_name,
            contact_number: value.contact_number,
            address: value.address,
        }
    }
}

impl From<Skill> for SkillResponse {
    fn from(value: Skill) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

impl From<Portfolio> for PortfolioResponse {
    fn from(value: Portfolio) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            url: value.url,
            created_at: value.created_at,
        }
    }
}

impl From<Certification> for CertificationResponse {
    fn from(value: Certification) -> Self {
        Self {
            id: value.id,
            name: value.name,
            authority: value.authority,
            year: value.year,
        }
    }
}

impl From<Education> for EducationResponse {
    fn from(value: Education) -> Self {
        Self {
            id: value.id,
            institution: value.institution,
            degree: value.degree,
            graduation_year: value.graduation_year,
        }
    }
}

impl From<VendorSummary> for VendorSummaryResponse {
    fn from(value: VendorSummary) -> Self {
        Self {
            id: value.id,
            username: value.username,
            location: value.location,
            hourly_rate: value.hourly_rate,
            average_rating: value.average_rating,
        }
    }
}

impl From<VendorDetail> for VendorDetailResponse {
    fn from(value: VendorDetail) -> Self {
        Self {
            id: value.user.id,
            username: value.user.username,
            bio: value.user.bio,
            location: value.user.location,
            language: value.user.language,
            profile_picture: value.user.profile_picture,
            hourly_rate: value.profile.hourly_rate,
            skills: value.skills.into_iter().map(Into::into).collect(),
            portfolios: value.portfolios.into_iter().map(Into::into).collect(),
            certifications: value.certifications.into_iter().map(Into::into).collect(),
            education: value.education.into_iter().map(Into::into).collect(),
            reviews: value.reviews.into_iter().map(Into::into).collect(),
            average_rating: value.average_rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_rejects_mismatched_confirmation() {
        let payload = RegisterPayload {
            username: "marina".to_string(),
            email: "marina@example.com".to_string(),
            password: "long-enough-password".to_string(),
            password_confirmation: "something-else".to_string(),
            user_type: Capability::Client,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn register_rejects_short_password() {
        let payload = RegisterPayload {
            username: "marina".to_string(),
            email: "marina@example.com".to_string(),
            password: "short".to_string(),
            password_confirmation: "short".to_string(),
            user_type: Capability::Client,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn register_accepts_valid_payload() {
        let payload = RegisterPayload {
            username: "marina".to_string(),
            email: "marina@example.com".to_string(),
            password: "long-enough-password".to_string(),
            password_confirmation: "long-enough-password".to_string(),
            user_type: Capability::Vendor,
        };
        assert!(payload.validate().is_ok());
    }
}
