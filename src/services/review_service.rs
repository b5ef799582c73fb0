use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::review_dto::CreateReviewPayload;
use crate::error::{Error, Result};
use crate::models::project::{Project, ProjectStatus};
use crate::models::review::Review;
use crate::services::project_service::PROJECT_COLUMNS;

const REVIEW_COLUMNS: &str =
    "id, project_id, reviewer_id, reviewee_id, rating, comment, created_at";

#[derive(Clone)]
pub struct ReviewService {
    pool: PgPool,
}

impl ReviewService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, reviewer_id: Uuid, payload: CreateReviewPayload) -> Result<Review> {
        let query = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1");
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(payload.project_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Project not found".to_string()))?;

        // the reviewee is always the other party; a non-participant cannot
        // see the project at all
        let reviewee_id = project
            .counterparty_of(reviewer_id)
            .ok_or_else(|| Error::NotFound("Project not found".to_string()))?;

        if project.status != ProjectStatus::Completed {
            return Err(Error::InvalidState(
                "Only completed projects can be reviewed".to_string(),
            ));
        }

        let already = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM reviews WHERE project_id = $1 AND reviewer_id = $2)",
        )
        .bind(project.id)
        .bind(reviewer_id)
        .fetch_one(&self.pool)
        .await?;
        if already {
            return Err(Error::Conflict(
                "You have already reviewed this project".to_string(),
            ));
        }

        let insert = format!(
            "INSERT INTO reviews (project_id, reviewer_id, reviewee_id, rating, comment) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {REVIEW_COLUMNS}"
        );
        let review = sqlx::query_as::<_, Review>(&insert)
            .bind(project.id)
            .bind(reviewer_id)
            .bind(reviewee_id)
            .bind(payload.rating)
            .bind(&payload.comment)
            .fetch_one(&self.pool)
            .await?;

        tracing::info!(review_id = %review.id, project_id = %project.id, "review created");
        Ok(review)
    }

    pub async fn list_by_reviewer(&self, reviewer_id: Uuid) -> Result<Vec<Review>> {
        let query = format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE reviewer_id = $1 \
             ORDER BY created_at DESC"
        );
        let reviews = sqlx::query_as::<_, Review>(&query)
            .bind(reviewer_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(reviews)
    }
}
