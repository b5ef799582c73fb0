use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use marketplace_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    middleware, routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    let base_routes = Router::new().route("/health", get(routes::health::health));

    let api_limiter = middleware::rate_limit::RateLimiter::new(config.api_rps);

    let auth_api = Router::new()
        .route("/api/auth/register", post(routes::auth_routes::register))
        .route("/api/auth/login", post(routes::auth_routes::login))
        .layer(axum::middleware::from_fn_with_state(
            api_limiter.clone(),
            middleware::rate_limit::rps_middleware,
        ));

    let marketplace_api = Router::new()
        .route(
            "/api/users/profile",
            get(routes::profile_routes::get_profile).patch(routes::profile_routes::update_profile),
        )
        .route(
            "/api/users/client-profile",
            get(routes::profile_routes::get_client_profile)
                .patch(routes::profile_routes::update_client_profile),
        )
        .route("/api/users/vendors", get(routes::profile_routes::list_vendors))
        .route(
            "/api/users/vendors/me",
            axum::routing::patch(routes::profile_routes::update_vendor_profile),
        )
        .route(
            "/api/users/vendors/:id",
            get(routes::profile_routes::get_vendor),
        )
        .route(
            "/api/users/vendors/me/portfolios",
            post(routes::profile_routes::add_portfolio),
        )
        .route(
            "/api/users/vendors/me/portfolios/:id",
            axum::routing::delete(routes::profile_routes::delete_portfolio),
        )
        .route(
            "/api/users/vendors/me/certifications",
            post(routes::profile_routes::add_certification),
        )
        .route(
            "/api/users/vendors/me/certifications/:id",
            axum::routing::delete(routes::profile_routes::delete_certification),
        )
        .route(
            "/api/users/vendors/me/education",
            post(routes::profile_routes::add_education),
        )
        .route(
            "/api/users/vendors/me/education/:id",
            axum::routing::delete(routes::profile_routes::delete_education),
        )
        .route("/api/skills", get(routes::profile_routes::list_skills))
        .route("/api/tags", get(routes::tender_routes::list_tags))
        .route(
            "/api/tenders",
            get(routes::tender_routes::list_tenders).post(routes::tender_routes::create_tender),
        )
        .route("/api/tenders/:id", get(routes::tender_routes::get_tender))
        .route(
            "/api/tenders/:id/comments",
            post(routes::tender_routes::add_comment),
        )
        .route(
            "/api/tenders/:id/place_bid",
            post(routes::tender_routes::place_bid),
        )
        .route(
            "/api/tenders/:id/accept_bid",
            post(routes::tender_routes::accept_bid),
        )
        .route("/api/bids", get(routes::tender_routes::list_bids))
        .route("/api/projects", get(routes::project_routes::list_projects))
        .route(
            "/api/projects/:id",
            get(routes::project_routes::get_project),
        )
        .route(
            "/api/projects/:id/deliver",
            post(routes::project_routes::deliver),
        )
        .route(
            "/api/projects/:id/request_revision",
            post(routes::project_routes::request_revision),
        )
        .route(
            "/api/projects/:id/complete",
            post(routes::project_routes::complete),
        )
        .route(
            "/api/projects/:id/update_price",
            post(routes::project_routes::update_price),
        )
        .route(
            "/api/projects/:id/update_deadline",
            post(routes::project_routes::update_deadline),
        )
        .route(
            "/api/projects/:id/activities",
            get(routes::project_routes::list_activities)
                .post(routes::project_routes::create_activity),
        )
        .route(
            "/api/reviews",
            get(routes::review_routes::list_reviews).post(routes::review_routes::create_review),
        )
        .route_layer(axum::middleware::from_fn(
            middleware::auth::require_bearer_auth,
        ))
        .layer(axum::middleware::from_fn_with_state(
            api_limiter,
            middleware::rate_limit::rps_middleware,
        ));

    let app = base_routes
        .merge(auth_api)
        .merge(marketplace_api)
        .with_state(app_state)
        .layer(middleware::cors::cors_layer())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(1024 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
