use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::Capability;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub capabilities: Vec<Capability>,
    pub exp: i64,
    pub iat: i64,
}

pub fn issue_token(
    user_id: Uuid,
    capabilities: &[Capability],
    secret: &str,
    ttl_hours: i64,
) -> Result<String> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        capabilities: capabilities.to_vec(),
        exp: now + ttl_hours * 3600,
        iat: now,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| Error::Internal("Failed to sign token".to_string()))
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| Error::Unauthorized("Invalid or expired token".to_string()))?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-long-enough-for-hmac";

    #[test]
    fn issue_and_decode_roundtrip() {
        let user_id = Uuid::new_v4();
        let token = issue_token(user_id, &[Capability::Client, Capability::Vendor], SECRET, 24)
            .unwrap();
        let claims = decode_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.capabilities, vec![Capability::Client, Capability::Vendor]);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue_token(Uuid::new_v4(), &[Capability::Vendor], SECRET, 24).unwrap();
        let err = decode_token(&token, "a-different-secret").unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            capabilities: vec![],
            exp: now - 300,
            iat: now - 600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert!(decode_token(&token, SECRET).is_err());
    }
}
