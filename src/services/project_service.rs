use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::project_dto::{
    DeliverPayload, RequestRevisionPayload, UpdateDeadlinePayload, UpdatePricePayload,
};
use crate::error::{Error, Result};
use crate::models::activity::{Activity, ActivityKind};
use crate::models::project::{LifecycleAction, Project, ProjectStatus};
use crate::permissions;
use crate::services::activity_service::{insert_activity, NewActivity};

pub const PROJECT_COLUMNS: &str = "id, tender_id, client_id, vendor_id, agreed_amount, \
                                   start_date, deadline, status, created_at";

#[derive(Clone)]
pub struct ProjectService {
    pool: PgPool,
}

fn ensure_transition(action: LifecycleAction, current: ProjectStatus) -> Result<ProjectStatus> {
    action.next_status(current).ok_or_else(|| {
        if current.is_terminal() {
            Error::InvalidState("Project is no longer active".to_string())
        } else {
            Error::InvalidState(
                "Project status does not permit this action".to_string(),
            )
        }
    })
}

// a missing project and one the actor may not see are indistinguishable
async fn lock_project(conn: &mut PgConnection, project_id: Uuid, actor_id: Uuid) -> Result<Project> {
    let query = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1 FOR UPDATE");
    let project = sqlx::query_as::<_, Project>(&query)
        .bind(project_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| Error::NotFound("Project not found".to_string()))?;
    if !project.is_participant(actor_id) {
        return Err(Error::NotFound("Project not found".to_string()));
    }
    Ok(project)
}

async fn update_status(
    conn: &mut PgConnection,
    project_id: Uuid,
    status: ProjectStatus,
) -> Result<Project> {
    let update = format!(
        "UPDATE projects SET status = $2 WHERE id = $1 RETURNING {PROJECT_COLUMNS}"
    );
    let project = sqlx::query_as::<_, Project>(&update)
        .bind(project_id)
        .bind(status)
        .fetch_one(&mut *conn)
        .await?;
    Ok(project)
}

impl ProjectService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for(&self, user_id: Uuid) -> Result<Vec<Project>> {
        let query = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects \
             WHERE client_id = $1 OR vendor_id = $1 ORDER BY created_at DESC"
        );
        let projects = sqlx::query_as::<_, Project>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(projects)
    }

    pub async fn get_for_participant(&self, user_id: Uuid, project_id: Uuid) -> Result<Project> {
        let query = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1");
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(project_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Project not found".to_string()))?;
        if !project.is_participant(user_id) {
            return Err(Error::NotFound("Project not found".to_string()));
        }
        Ok(project)
    }

    pub async fn deliver(
        &self,
        vendor_id: Uuid,
        project_id: Uuid,
        payload: DeliverPayload,
    ) -> Result<Activity> {
        let mut tx = self.pool.begin().await?;

        let project = lock_project(&mut tx, project_id, vendor_id).await?;
        permissions::require_project_vendor(vendor_id, &project)?;
        let next = ensure_transition(LifecycleAction::Deliver, project.status)?;

        if next != project.status {
            update_status(&mut tx, project.id, next).await?;
        }

        let description = payload
            .description
            .unwrap_or_else(|| ActivityKind::Delivery.default_description().to_string());
        let mut entry = NewActivity::new(project.id, vendor_id, ActivityKind::Delivery, description);
        entry.attachment = payload.attachment;
        let activity = insert_activity(&mut tx, entry).await?;

        tx.commit().await?;

        tracing::info!(project_id = %project.id, "delivery recorded");
        Ok(activity)
    }

    pub async fn request_revision(
        &self,
        client_id: Uuid,
        project_id: Uuid,
        payload: RequestRevisionPayload,
    ) -> Result<Activity> {
        let mut tx = self.pool.begin().await?;

        let project = lock_project(&mut tx, project_id, client_id).await?;
        permissions::require_project_client(client_id, &project)?;
        let next = ensure_transition(LifecycleAction::RequestRevision, project.status)?;

        update_status(&mut tx, project.id, next).await?;

        let description = payload
            .description
            .unwrap_or_else(|| ActivityKind::RevisionRequest.default_description().to_string());
        let entry = NewActivity::new(
            project.id,
            client_id,
            ActivityKind::RevisionRequest,
            description,
        );
        let activity = insert_activity(&mut tx, entry).await?;

        tx.commit().await?;

        tracing::info!(project_id = %project.id, "revision requested");
        Ok(activity)
    }

    pub async fn complete(&self, client_id: Uuid, project_id: Uuid) -> Result<Project> {
        let mut tx = self.pool.begin().await?;

        let project = lock_project(&mut tx, project_id, client_id).await?;
        permissions::require_project_client(client_id, &project)?;
        let next = ensure_transition(LifecycleAction::Complete, project.status)?;

        let updated = update_status(&mut tx, project.id, next).await?;

        sqlx::query("UPDATE tenders SET status = 'completed' WHERE id = $1")
            .bind(project.tender_id)
            .execute(&mut *tx)
            .await?;

        let entry = NewActivity::new(
            project.id,
            client_id,
            ActivityKind::ProjectCompletion,
            ActivityKind::ProjectCompletion.default_description().to_string(),
        );
        insert_activity(&mut tx, entry).await?;

        tx.commit().await?;

        tracing::info!(project_id = %project.id, "project completed");
        Ok(updated)
    }

    pub async fn update_price(
        &self,
        actor_id: Uuid,
        project_id: Uuid,
        payload: UpdatePricePayload,
    ) -> Result<Project> {
        let new_price = payload
            .new_price
            .ok_or_else(|| Error::Validation("new_price is required".to_string()))?;
        if new_price <= Decimal::ZERO {
            return Err(Error::Validation("new_price must be positive".to_string()));
        }

        let mut tx = self.pool.begin().await?;

        let project = lock_project(&mut tx, project_id, actor_id).await?;
        permissions::require_project_participant(actor_id, &project)?;
        ensure_transition(LifecycleAction::UpdatePrice, project.status)?;

        let update = format!(
            "UPDATE projects SET agreed_amount = $2 WHERE id = $1 RETURNING {PROJECT_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Project>(&update)
            .bind(project.id)
            .bind(new_price)
            .fetch_one(&mut *tx)
            .await?;

        let description = payload.description.unwrap_or_else(|| {
            format!(
                "Price updated from {} to {}",
                project.agreed_amount, new_price
            )
        });
        let mut entry = NewActivity::new(
            project.id,
            actor_id,
            ActivityKind::PriceChange,
            description,
        );
        entry.old_price = Some(project.agreed_amount);
        entry.new_price = Some(new_price);
        insert_activity(&mut tx, entry).await?;

        tx.commit().await?;

        tracing::info!(project_id = %project.id, "price updated");
        Ok(updated)
    }

    pub async fn update_deadline(
        &self,
        actor_id: Uuid,
        project_id: Uuid,
        payload: UpdateDeadlinePayload,
    ) -> Result<Project> {
        let new_deadline = payload
            .new_deadline
            .ok_or_else(|| Error::Validation("new_deadline is required".to_string()))?;

        let mut tx = self.pool.begin().await?;

        let project = lock_project(&mut tx, project_id, actor_id).await?;
        permissions::require_project_participant(actor_id, &project)?;
        ensure_transition(LifecycleAction::UpdateDeadline, project.status)?;

        let update = format!(
            "UPDATE projects SET deadline = $2 WHERE id = $1 RETURNING {PROJECT_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Project>(&update)
            .bind(project.id)
            .bind(new_deadline)
            .fetch_one(&mut *tx)
            .await?;

        let description = payload.description.unwrap_or_else(|| {
            format!(
                "Deadline updated from {} to {}",
                project.deadline, new_deadline
            )
        });
        let mut entry = NewActivity::new(
            project.id,
            actor_id,
            ActivityKind::DeadlineChange,
            description,
        );
        entry.old_deadline = Some(project.deadline);
        entry.new_deadline = Some(new_deadline);
        insert_activity(&mut tx, entry).await?;

        tx.commit().await?;

        tracing::info!(project_id = %project.id, "deadline updated");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states_report_inactive() {
        let err = ensure_transition(LifecycleAction::Deliver, ProjectStatus::Completed)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidState(_)));
        assert!(err.to_string().contains("no longer active"));

        let err = ensure_transition(LifecycleAction::Complete, ProjectStatus::Cancelled)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidState(_)));
    }

    #[test]
    fn double_revision_request_is_invalid_state() {
        let err =
            ensure_transition(LifecycleAction::RequestRevision, ProjectStatus::RevisionRequested)
                .unwrap_err();
        assert!(matches!(err, Error::InvalidState(_)));
        assert!(!err.to_string().contains("no longer active"));
    }

    #[test]
    fn active_transitions_pass_through() {
        assert_eq!(
            ensure_transition(LifecycleAction::Deliver, ProjectStatus::RevisionRequested).unwrap(),
            ProjectStatus::InProgress
        );
        assert_eq!(
            ensure_transition(LifecycleAction::Complete, ProjectStatus::InProgress).unwrap(),
            ProjectStatus::Completed
        );
        assert_eq!(
            ensure_transition(LifecycleAction::UpdatePrice, ProjectStatus::InProgress).unwrap(),
            ProjectStatus::InProgress
        );
    }
}
