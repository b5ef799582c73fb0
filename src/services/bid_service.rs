use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::tender_dto::PlaceBidPayload;
use crate::error::{Error, Result};
use crate::middleware::auth::AuthUser;
use crate::models::bid::Bid;
use crate::models::project::Project;
use crate::models::tender::Tender;
use crate::models::user::Capability;
use crate::permissions;
use crate::services::project_service::PROJECT_COLUMNS;
use crate::services::tender_service::{BID_COLUMNS, TENDER_COLUMNS};

#[derive(Clone)]
pub struct BidService {
    pool: PgPool,
}

fn check_amount(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(Error::Validation("amount must be positive".to_string()));
    }
    Ok(())
}

impl BidService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn place_bid(
        &self,
        vendor_id: Uuid,
        tender_id: Uuid,
        payload: PlaceBidPayload,
    ) -> Result<Bid> {
        check_amount(payload.amount)?;

        let mut tx = self.pool.begin().await?;

        // share-lock the tender so the open check serializes with a racing
        // acceptance's FOR UPDATE; concurrent bids do not block each other
        let tender_query = format!("SELECT {TENDER_COLUMNS} FROM tenders WHERE id = $1 FOR SHARE");
        let tender = sqlx::query_as::<_, Tender>(&tender_query)
            .bind(tender_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| Error::NotFound("Tender not found".to_string()))?;

        permissions::require_not_tender_owner(vendor_id, &tender)?;

        if !tender.status.accepts_bids() {
            return Err(Error::InvalidState(
                "Tender is not open for bids".to_string(),
            ));
        }

        let duplicate = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM bids WHERE tender_id = $1 AND vendor_id = $2)",
        )
        .bind(tender_id)
        .bind(vendor_id)
        .fetch_one(&mut *tx)
        .await?;
        if duplicate {
            return Err(Error::Conflict(
                "You have already placed a bid on this tender".to_string(),
            ));
        }

        // the unique constraint on (tender_id, vendor_id) backstops the
        // pre-check under concurrent submissions
        let insert = format!(
            "INSERT INTO bids (tender_id, vendor_id, amount, delivery_time, proposal) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {BID_COLUMNS}"
        );
        let bid = sqlx::query_as::<_, Bid>(&insert)
            .bind(tender_id)
            .bind(vendor_id)
            .bind(payload.amount)
            .bind(payload.delivery_time)
            .bind(&payload.proposal)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(bid_id = %bid.id, tender_id = %tender_id, "bid placed");
        Ok(bid)
    }

    pub async fn list_for(&self, user: &AuthUser) -> Result<Vec<Bid>> {
        let is_vendor = user.has_capability(Capability::Vendor);
        let is_client = user.has_capability(Capability::Client);

        let sql = format!(
            "SELECT {BID_COLUMNS} FROM bids b \
             WHERE ($1 AND b.vendor_id = $3) \
                OR ($2 AND EXISTS ( \
                      SELECT 1 FROM tenders t \
                      WHERE t.id = b.tender_id AND t.client_id = $3)) \
             ORDER BY b.created_at DESC"
        );
        let bids = sqlx::query_as::<_, Bid>(&sql)
            .bind(is_vendor)
            .bind(is_client)
            .bind(user.id)
            .fetch_all(&self.pool)
            .await?;
        Ok(bids)
    }

    pub async fn accept_bid(
        &self,
        client_id: Uuid,
        tender_id: Uuid,
        bid_id: Uuid,
    ) -> Result<Project> {
        let mut tx = self.pool.begin().await?;

        // lock the tender row so concurrent acceptances serialize; the loser
        // re-reads a non-open status below
        let lock_query = format!("SELECT {TENDER_COLUMNS} FROM tenders WHERE id = $1 FOR UPDATE");
        let tender = sqlx::query_as::<_, Tender>(&lock_query)
            .bind(tender_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| Error::NotFound("Tender not found".to_string()))?;

        permissions::require_tender_owner(client_id, &tender)?;

        if !tender.status.accepts_bids() {
            return Err(Error::InvalidState("Tender is not open".to_string()));
        }

        let bid_query = format!("SELECT {BID_COLUMNS} FROM bids WHERE id = $1 AND tender_id = $2");
        let bid = sqlx::query_as::<_, Bid>(&bid_query)
            .bind(bid_id)
            .bind(tender_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| Error::NotFound("Bid not found for this tender".to_string()))?;

        sqlx::query("UPDATE bids SET status = 'accepted' WHERE id = $1")
            .bind(bid.id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "UPDATE bids SET status = 'rejected' \
             WHERE tender_id = $1 AND id <> $2 AND status = 'pending'",
        )
        .bind(tender_id)
        .bind(bid.id)
        .execute(&mut *tx)
        .await?;

        let project_insert = format!(
            "INSERT INTO projects (tender_id, client_id, vendor_id, agreed_amount, deadline) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {PROJECT_COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&project_insert)
            .bind(tender_id)
            .bind(tender.client_id)
            .bind(bid.vendor_id)
            .bind(bid.amount)
            .bind(tender.deadline)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("UPDATE tenders SET status = 'in_progress' WHERE id = $1")
            .bind(tender_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            project_id = %project.id,
            tender_id = %tender_id,
            bid_id = %bid.id,
            "bid accepted"
        );
        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bid_amount_must_be_positive() {
        assert!(check_amount(Decimal::new(1, 2)).is_ok());

        let err = check_amount(Decimal::ZERO).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(check_amount(Decimal::new(-500, 2)).is_err());
    }
}
