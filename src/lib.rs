pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod permissions;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    activity_service::ActivityService, bid_service::BidService, profile_service::ProfileService,
    project_service::ProjectService, review_service::ReviewService, tender_service::TenderService,
    user_service::UserService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub user_service: UserService,
    pub profile_service: ProfileService,
    pub tender_service: TenderService,
    pub bid_service: BidService,
    pub project_service: ProjectService,
    pub activity_service: ActivityService,
    pub review_service: ReviewService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let user_service = UserService::new(pool.clone());
        let profile_service = ProfileService::new(pool.clone());
        let tender_service = TenderService::new(pool.clone());
        let bid_service = BidService::new(pool.clone());
        let project_service = ProjectService::new(pool.clone());
        let activity_service = ActivityService::new(pool.clone());
        let review_service = ReviewService::new(pool.clone());

        Self {
            pool,
            user_service,
            profile_service,
            tender_service,
            bid_service,
            project_service,
            activity_service,
            review_service,
        }
    }
}
