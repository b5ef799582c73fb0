use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    InProgress,
    RevisionRequested,
    Completed,
    Cancelled,
}

impl ProjectStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, ProjectStatus::InProgress | ProjectStatus::RevisionRequested)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    Deliver,
    RequestRevision,
    Complete,
    UpdatePrice,
    UpdateDeadline,
}

impl LifecycleAction {
    /// Status the project holds after the action, or None when the action
    /// is not allowed from `current`.
    pub fn next_status(&self, current: ProjectStatus) -> Option<ProjectStatus> {
        if current.is_terminal() {
            return None;
        }
        match self {
            LifecycleAction::Deliver => Some(ProjectStatus::InProgress),
            LifecycleAction::RequestRevision => match current {
                ProjectStatus::InProgress => Some(ProjectStatus::RevisionRequested),
                _ => None,
            },
            LifecycleAction::Complete => Some(ProjectStatus::Completed),
            LifecycleAction::UpdatePrice | LifecycleAction::UpdateDeadline => Some(current),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
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

impl Project {
    pub fn is_participant(&self, user_id: Uuid) -> bool {
        self.client_id == user_id || self.vendor_id == user_id
    }

    pub fn counterparty_of(&self, user_id: Uuid) -> Option<Uuid> {
        if user_id == self.client_id {
            Some(self.vendor_id)
        } else if user_id == self.vendor_id {
            Some(self.client_id)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states_admit_no_action() {
        let actions = [
            LifecycleAction::Deliver,
            LifecycleAction::RequestRevision,
            LifecycleAction::Complete,
            LifecycleAction::UpdatePrice,
            LifecycleAction::UpdateDeadline,
        ];
        for action in actions {
            assert_eq!(action.next_status(ProjectStatus::Completed), None);
            assert_eq!(action.next_status(ProjectStatus::Cancelled), None);
        }
    }

    #[test]
    fn revision_can_only_be_requested_once() {
        assert_eq!(
            LifecycleAction::RequestRevision.next_status(ProjectStatus::InProgress),
            Some(ProjectStatus::RevisionRequested)
        );
        assert_eq!(
            LifecycleAction::RequestRevision.next_status(ProjectStatus::RevisionRequested),
            None
        );
    }

    #[test]
    fn delivery_clears_a_revision_request() {
        assert_eq!(
            LifecycleAction::Deliver.next_status(ProjectStatus::RevisionRequested),
            Some(ProjectStatus::InProgress)
        );
        assert_eq!(
            LifecycleAction::Deliver.next_status(ProjectStatus::InProgress),
            Some(ProjectStatus::InProgress)
        );
    }

    #[test]
    fn completion_is_reachable_from_both_active_states() {
        assert_eq!(
            LifecycleAction::Complete.next_status(ProjectStatus::InProgress),
            Some(ProjectStatus::Completed)
        );
        assert_eq!(
            LifecycleAction::Complete.next_status(ProjectStatus::RevisionRequested),
            Some(ProjectStatus::Completed)
        );
    }

    #[test]
    fn renegotiation_leaves_status_unchanged() {
        for current in [ProjectStatus::InProgress, ProjectStatus::RevisionRequested] {
            assert_eq!(LifecycleAction::UpdatePrice.next_status(current), Some(current));
            assert_eq!(LifecycleAction::UpdateDeadline.next_status(current), Some(current));
        }
    }

    #[test]
    fn counterparty_is_the_other_participant() {
        let client = Uuid::new_v4();
        let vendor = Uuid::new_v4();
        let project = Project {
            id: Uuid::new_v4(),
            tender_id: Uuid::new_v4(),
            client_id: client,
            vendor_id: vendor,
            agreed_amount: Decimal::new(50000, 2),
            start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            deadline: NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
            status: ProjectStatus::InProgress,
            created_at: Utc::now(),
        };
        assert_eq!(project.counterparty_of(client), Some(vendor));
        assert_eq!(project.counterparty_of(vendor), Some(client));
        assert_eq!(project.counterparty_of(Uuid::new_v4()), None);
        assert!(project.is_participant(client));
        assert!(!project.is_participant(Uuid::new_v4()));
    }
}
