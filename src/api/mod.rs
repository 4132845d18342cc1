//! HTTP surface: dashboard API, public page, tracking and health

pub mod jwt;
pub mod middleware;
pub mod services;

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, web};

use middleware::OwnerAuth;
use services::dashboard::{ErrorCode, error_response};
use services::{
    DASHBOARD_PREFIX, dashboard_v1_routes, health_routes, public_routes, tracking_routes,
};

/// 请求体 JSON 解析失败时返回统一格式的 400
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = error_response(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, &err.to_string());
    InternalError::from_response(err, response).into()
}

/// 注册全部路由
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(health_routes())
        .service(public_routes())
        .service(tracking_routes())
        .service(
            web::scope(DASHBOARD_PREFIX)
                .wrap(OwnerAuth)
                .service(dashboard_v1_routes()),
        );
}
