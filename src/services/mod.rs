//! Business logic shared by the HTTP handlers and the CLI

mod analytics_service;
mod link_service;
mod order_view;
mod profile_service;

pub use analytics_service::{AnalyticsService, AnalyticsSummary, DailyCount, TopLink};
pub use link_service::{CreateLinkRequest, LinkService, UpdateLinkRequest};
pub use order_view::LinkOrderView;
pub use profile_service::{ProfileService, PublicPage, SaveProfileRequest};
