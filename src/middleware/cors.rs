use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

use crate::config::get_config;

pub fn cors_layer() -> CorsLayer {
    let config = get_config();
    if let Some(origin) = config.allowed_origin.as_deref() {
        match origin.parse::<HeaderValue>() {
            Ok(value) => {
                return CorsLayer::new()
                    .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
                    .allow_headers(Any)
                    .allow_origin(value);
            }
            Err(_) => {
                tracing::warn!(origin, "invalid ALLOWED_ORIGIN, falling back to permissive CORS");
            }
        }
    }
    CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(Any)
}
