use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "capability", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Client,
    Vendor,
}

impl sqlx::postgres::PgHasArrayType for Capability {
    fn array_type_info() -> sqlx::postgres::PgTypeInfo {
        sqlx::postgres::PgTypeInfo::with_name("_capability")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub bio: String,
    pub location: String,
    pub language: String,
    pub profile_picture: Option<String>,
    pub capabilities: Vec<Capability>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    pub fn is_client(&self) -> bool {
        self.has_capability(Capability::Client)
    }

    pub fn is_vendor(&self) -> bool {
        self.has_capability(Capability::Vendor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with(capabilities: Vec<Capability>) -> User {
        User {
            id: Uuid::new_v4(),
            username: "sam".to_string(),
            email: "sam@example.com".to_string(),
            password_hash: String::new(),
            bio: String::new(),
            location: String::new(),
            language: String::new(),
            profile_picture: None,
            capabilities,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn capabilities_are_independent() {
        let both = user_with(vec![Capability::Client, Capability::Vendor]);
        assert!(both.is_client());
        assert!(both.is_vendor());

        let client_only = user_with(vec![Capability::Client]);
        assert!(client_only.is_client());
        assert!(!client_only.is_vendor());

        let neither = user_with(vec![]);
        assert!(!neither.is_client());
        assert!(!neither.is_vendor());
    }

    #[test]
    fn capability_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&Capability::Vendor).unwrap(),
            "\"vendor\""
        );
    }
}
