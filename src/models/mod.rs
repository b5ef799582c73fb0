pub mod activity;
pub mod bid;
pub mod profile;
pub mod project;
pub mod review;
pub mod tender;
pub mod user;

pub use activity::{Activity, ActivityKind};
pub use bid::{Bid, BidStatus};
pub use profile::{Certification, ClientProfile, Education, Portfolio, Skill, VendorProfile};
pub use project::{LifecycleAction, Project, ProjectStatus};
pub use review::Review;
pub use tender::{Category, Comment, Tag, Tender, TenderStatus};
pub use user::{Capability, User};
