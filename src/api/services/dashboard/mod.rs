//! Owner dashboard API (`/api/v1`)
//!
//! Every route must be wrapped in `OwnerAuth`; handlers read the owner via `OwnerId`.

mod analytics;
mod error_code;
mod helpers;
mod links;
mod profile;
mod routes;
mod types;

use actix_web::web;

pub use error_code::ErrorCode;
pub use helpers::{api_result, error_from_linkbio, error_response, json_response, success_response};
pub use types::*;

pub const DASHBOARD_PREFIX: &str = "/api/v1";

/// `/api/v1` 下的路由（鉴权中间件由调用方包裹）
pub fn dashboard_v1_routes() -> actix_web::Scope {
    web::scope("")
        .service(routes::profile_routes())
        .service(routes::links_routes())
        .service(routes::analytics_routes())
}
