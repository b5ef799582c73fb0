use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::error::Error;
use crate::models::user::Capability;
use crate::utils::token;

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub capabilities: Vec<Capability>,
}

impl AuthUser {
    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}

pub async fn require_bearer_auth(mut req: Request, next: Next) -> Response {
    let Some(auth_header) = req.headers().get(axum::http::header::AUTHORIZATION) else {
        return Error::Unauthorized("Missing authorization header".to_string()).into_response();
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return Error::Unauthorized("Malformed authorization header".to_string()).into_response();
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return Error::Unauthorized("Unsupported authorization scheme".to_string())
            .into_response();
    };

    let config = crate::config::get_config();
    match token::decode_token(token, &config.jwt_secret) {
        Ok(claims) => {
            req.extensions_mut().insert(AuthUser {
                id: claims.sub,
                capabilities: claims.capabilities,
            });
            next.run(req).await
        }
        Err(err) => err.into_response(),
    }
}
