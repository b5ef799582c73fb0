use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::tender_dto::{CreateTenderPayload, TenderListQuery};
use crate::error::{Error, Result};
use crate::models::bid::Bid;
use crate::models::tender::{Comment, Tag, Tender};

pub const TENDER_COLUMNS: &str = "id, client_id, title, description, attachment, min_budget, \
                                  max_budget, max_duration, deadline, status, category_id, \
                                  created_at";
pub const BID_COLUMNS: &str =
    "id, tender_id, vendor_id, amount, delivery_time, proposal, status, created_at";
const COMMENT_COLUMNS: &str = "id, tender_id, author_id, content, created_at";

#[derive(Clone)]
pub struct TenderService {
    pool: PgPool,
}

pub struct TenderDetail {
    pub tender: Tender,
    pub tags: Vec<Tag>,
    pub bids: Vec<Bid>,
    pub comments: Vec<Comment>,
}

fn check_budget_range(min_budget: Decimal, max_budget: Decimal) -> Result<()> {
    if min_budget < Decimal::ZERO || max_budget < Decimal::ZERO {
        return Err(Error::Validation(
            "Budgets must not be negative".to_string(),
        ));
    }
    if min_budget > max_budget {
        return Err(Error::Validation(
            "min_budget must not exceed max_budget".to_string(),
        ));
    }
    Ok(())
}

fn check_deadline(deadline: NaiveDate) -> Result<()> {
    if deadline <= Utc::now().date_naive() {
        return Err(Error::Validation(
            "deadline must be in the future".to_string(),
        ));
    }
    Ok(())
}

impl TenderService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, client_id: Uuid, payload: CreateTenderPayload) -> Result<Tender> {
        check_budget_range(payload.min_budget, payload.max_budget)?;
        check_deadline(payload.deadline)?;

        if let Some(category_id) = payload.category_id {
            let known = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)",
            )
            .bind(category_id)
            .fetch_one(&self.pool)
            .await?;
            if !known {
                return Err(Error::Validation("Unknown category id".to_string()));
            }
        }

        let mut tx = self.pool.begin().await?;

        let insert = format!(
            "INSERT INTO tenders (client_id, title, description, attachment, min_budget, \
                                  max_budget, max_duration, deadline, category_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {TENDER_COLUMNS}"
        );
        let tender = sqlx::query_as::<_, Tender>(&insert)
            .bind(client_id)
            .bind(&payload.title)
            .bind(&payload.description)
            .bind(&payload.attachment)
            .bind(payload.min_budget)
            .bind(payload.max_budget)
            .bind(payload.max_duration)
            .bind(payload.deadline)
            .bind(payload.category_id)
            .fetch_one(&mut *tx)
            .await?;

        for name in &payload.tags {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            let tag_id = sqlx::query_scalar::<_, Uuid>(
                "INSERT INTO tags (name) VALUES ($1) \
                 ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name RETURNING id",
            )
            .bind(name)
            .fetch_one(&mut *tx)
            .await?;
            sqlx::query(
                "INSERT INTO tender_tags (tender_id, tag_id) VALUES ($1, $2) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(tender.id)
            .bind(tag_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!(tender_id = %tender.id, client_id = %client_id, "tender created");
        Ok(tender)
    }

    pub async fn list(&self, query: TenderListQuery) -> Result<Vec<Tender>> {
        let sql = format!(
            "SELECT {TENDER_COLUMNS} FROM tenders t \
             WHERE ($1::tender_status IS NULL OR t.status = $1) \
               AND ($2::uuid IS NULL OR t.category_id = $2) \
               AND ($3::text IS NULL OR EXISTS ( \
                     SELECT 1 FROM tender_tags tt \
                     JOIN tags tg ON tg.id = tt.tag_id \
                     WHERE tt.tender_id = t.id AND tg.name = $3)) \
             ORDER BY t.created_at DESC"
        );
        let tenders = sqlx::query_as::<_, Tender>(&sql)
            .bind(query.status)
            .bind(query.category)
            .bind(query.tag)
            .fetch_all(&self.pool)
            .await?;
        Ok(tenders)
    }

    pub async fn list_tags(&self) -> Result<Vec<Tag>> {
        let tags = sqlx::query_as::<_, Tag>("SELECT id, name FROM tags ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(tags)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Tender> {
        let query = format!("SELECT {TENDER_COLUMNS} FROM tenders WHERE id = $1");
        sqlx::query_as::<_, Tender>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Tender not found".to_string()))
    }

    pub async fn get_detail(&self, id: Uuid) -> Result<TenderDetail> {
        let tender = self.get_by_id(id).await?;

        let tags = sqlx::query_as::<_, Tag>(
            "SELECT tg.id, tg.name FROM tags tg \
             JOIN tender_tags tt ON tt.tag_id = tg.id \
             WHERE tt.tender_id = $1 ORDER BY tg.name",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let bids_query =
            format!("SELECT {BID_COLUMNS} FROM bids WHERE tender_id = $1 ORDER BY created_at");
        let bids = sqlx::query_as::<_, Bid>(&bids_query)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;

        let comments_query = format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE tender_id = $1 ORDER BY created_at"
        );
        let comments = sqlx::query_as::<_, Comment>(&comments_query)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;

        Ok(TenderDetail {
            tender,
            tags,
            bids,
            comments,
        })
    }

    pub async fn add_comment(
        &self,
        tender_id: Uuid,
        author_id: Uuid,
        content: String,
    ) -> Result<Comment> {
        self.get_by_id(tender_id).await?;

        let insert = format!(
            "INSERT INTO comments (tender_id, author_id, content) \
             VALUES ($1, $2, $3) RETURNING {COMMENT_COLUMNS}"
        );
        let comment = sqlx::query_as::<_, Comment>(&insert)
            .bind(tender_id)
            .bind(author_id)
            .bind(content)
            .fetch_one(&self.pool)
            .await?;
        Ok(comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn budget_range_must_be_ordered() {
        assert!(check_budget_range(Decimal::new(100, 0), Decimal::new(500, 0)).is_ok());
        assert!(check_budget_range(Decimal::new(500, 0), Decimal::new(500, 0)).is_ok());

        let err = check_budget_range(Decimal::new(600, 0), Decimal::new(500, 0)).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn budgets_must_not_be_negative() {
        let err = check_budget_range(Decimal::new(-1, 0), Decimal::new(500, 0)).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn deadline_must_be_in_the_future() {
        let today = Utc::now().date_naive();
        assert!(check_deadline(today + Duration::days(1)).is_ok());
        assert!(check_deadline(today).is_err());
        assert!(check_deadline(today - Duration::days(1)).is_err());
    }
}
