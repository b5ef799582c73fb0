use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::review::Review;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReviewPayload {
    pub project_id: Uuid,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
    #[validate(length(min = 1))]
    pub comment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub project_id: Uuid,
    pub reviewer_id: Uuid,
    pub reviewee_id: Uuid,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(value: Review) -> Self {
        Self {
            id: value.id,
            project_id: value.project_id,
            reviewer_id: value.reviewer_id,
            reviewee_id: value.reviewee_id,
            rating: value.rating,
            comment: value.comment,
            created_at: value.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_outside_range_is_rejected() {
        let base = CreateReviewPayload {
            project_id: Uuid::new_v4(),
            rating: 3,
            comment: "Solid work, delivered on time".to_string(),
        };
        assert!(base.validate().is_ok());

        let low = CreateReviewPayload { rating: 0, ..base.clone() };
        assert!(low.validate().is_err());

        let high = CreateReviewPayload { rating: 6, ..base };
        assert!(high.validate().is_err());
    }
}
