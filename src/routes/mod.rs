pub mod auth_routes;
pub mod health;
pub mod profile_routes;
pub mod project_routes;
pub mod review_routes;
pub mod tender_routes;
