use uuid::Uuid;

use crate::error::{Error, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Capability, Project, Tender};

pub fn require_client(user: &AuthUser) -> Result<()> {
    if user.has_capability(Capability::Client) {
        Ok(())
    } else {
        Err(Error::Forbidden("Client capability required".to_string()))
    }
}

pub fn require_vendor(user: &AuthUser) -> Result<()> {
    if user.has_capability(Capability::Vendor) {
        Ok(())
    } else {
        Err(Error::Forbidden("Vendor capability required".to_string()))
    }
}

pub fn require_tender_owner(user_id: Uuid, tender: &Tender) -> Result<()> {
    if tender.client_id == user_id {
        Ok(())
    } else {
        Err(Error::Forbidden(
            "Only the tender owner may perform this action".to_string(),
        ))
    }
}

pub fn require_not_tender_owner(user_id: Uuid, tender: &Tender) -> Result<()> {
    if tender.client_id == user_id {
        Err(Error::Forbidden(
            "You cannot bid on your own tender".to_string(),
        ))
    } else {
        Ok(())
    }
}

pub fn require_project_participant(user_id: Uuid, project: &Project) -> Result<()> {
    if project.is_participant(user_id) {
        Ok(())
    } else {
        Err(Error::Forbidden(
            "You are not a participant in this project".to_string(),
        ))
    }
}

pub fn require_project_client(user_id: Uuid, project: &Project) -> Result<()> {
    if project.client_id == user_id {
        Ok(())
    } else {
        Err(Error::Forbidden(
            "Only the project client may perform this action".to_string(),
        ))
    }
}

pub fn require_project_vendor(user_id: Uuid, project: &Project) -> Result<()> {
    if project.vendor_id == user_id {
        Ok(())
    } else {
        Err(Error::Forbidden(
            "Only the project vendor may perform this action".to_string(),
        ))
    }
}
