pub mod activity_service;
pub mod bid_service;
pub mod profile_service;
pub mod project_service;
pub mod review_service;
pub mod tender_service;
pub mod user_service;
