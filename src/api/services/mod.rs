pub mod dashboard;
pub mod health;
pub mod public;
pub mod tracking;

pub use dashboard::{DASHBOARD_PREFIX, dashboard_v1_routes};
pub use health::{HealthService, health_routes};
pub use public::{PublicService, public_routes};
pub use tracking::{TrackingService, tracking_routes};
