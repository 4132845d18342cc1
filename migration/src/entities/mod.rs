pub mod analytics_event;
pub mod link;
pub mod profile;

pub use analytics_event::Entity as AnalyticsEventEntity;
pub use link::Entity as LinkEntity;
pub use profile::Entity as ProfileEntity;
