use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::project_dto::{ActivityListQuery, CreateActivityPayload};
use crate::error::{Error, Result};
use crate::models::activity::{Activity, ActivityKind};

pub const ACTIVITY_COLUMNS: &str = "id, project_id, actor_id, kind, description, attachment, \
                                    old_price, new_price, old_deadline, new_deadline, created_at";

pub struct NewActivity {
    pub project_id: Uuid,
    pub actor_id: Uuid,
    pub kind: ActivityKind,
    pub description: String,
    pub attachment: Option<String>,
    pub old_price: Option<Decimal>,
    pub new_price: Option<Decimal>,
    pub old_deadline: Option<NaiveDate>,
    pub new_deadline: Option<NaiveDate>,
}

impl NewActivity {
    pub fn new(project_id: Uuid, actor_id: Uuid, kind: ActivityKind, description: String) -> Self {
        Self {
            project_id,
            actor_id,
            kind,
            description,
            attachment: None,
            old_price: None,
            new_price: None,
            old_deadline: None,
            new_deadline: None,
        }
    }
}

pub async fn insert_activity(conn: &mut PgConnection, entry: NewActivity) -> Result<Activity> {
    let insert = format!(
        "INSERT INTO activities (project_id, actor_id, kind, description, attachment, \
                                 old_price, new_price, old_deadline, new_deadline) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {ACTIVITY_COLUMNS}"
    );
    let activity = sqlx::query_as::<_, Activity>(&insert)
        .bind(entry.project_id)
        .bind(entry.actor_id)
        .bind(entry.kind)
        .bind(entry.description)
        .bind(entry.attachment)
        .bind(entry.old_price)
        .bind(entry.new_price)
        .bind(entry.old_deadline)
        .bind(entry.new_deadline)
        .fetch_one(&mut *conn)
        .await?;
    Ok(activity)
}

#[derive(Clone)]
pub struct ActivityService {
    pool: PgPool,
}

impl ActivityService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        actor_id: Uuid,
        project_id: Uuid,
        query: ActivityListQuery,
    ) -> Result<Vec<Activity>> {
        self.visible_project(actor_id, project_id).await?;

        // bigserial id breaks equal-timestamp ties so the order always
        // matches insertion order
        let direction = if query.order.as_deref() == Some("desc") {
            "DESC"
        } else {
            "ASC"
        };
        let sql = format!(
            "SELECT {ACTIVITY_COLUMNS} FROM activities WHERE project_id = $1 \
             ORDER BY created_at {direction}, id {direction}"
        );
        let activities = sqlx::query_as::<_, Activity>(&sql)
            .bind(project_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(activities)
    }

    pub async fn create(
        &self,
        actor_id: Uuid,
        project_id: Uuid,
        payload: CreateActivityPayload,
    ) -> Result<Activity> {
        self.visible_project(actor_id, project_id).await?;

        if payload.kind.is_lifecycle_reserved() {
            return Err(Error::Validation(
                "This activity kind is reserved for lifecycle actions".to_string(),
            ));
        }

        let mut conn = self.pool.acquire().await?;
        let mut entry = NewActivity::new(project_id, actor_id, payload.kind, payload.description);
        entry.attachment = payload.attachment;
        insert_activity(&mut conn, entry).await
    }

    async fn visible_project(&self, actor_id: Uuid, project_id: Uuid) -> Result<()> {
        let visible = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM projects \
             WHERE id = $1 AND (client_id = $2 OR vendor_id = $2))",
        )
        .bind(project_id)
        .bind(actor_id)
        .fetch_one(&self.pool)
        .await?;
        if !visible {
            return Err(Error::NotFound("Project not found".to_string()));
        }
        Ok(())
    }
}
