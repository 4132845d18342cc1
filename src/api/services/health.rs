use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, trace};

use crate::storage::SeaOrmStorage;

pub struct HealthService;

impl HealthService {
    /// 存储连通性检查
    pub async fn health_check(storage: web::Data<Arc<SeaOrmStorage>>) -> impl Responder {
        trace!("Received health check request");

        match storage.ping().await {
            Ok(()) => HttpResponse::Ok().json(json!({
                "status": "healthy",
                "backend": storage.backend_name(),
            })),
            Err(e) => {
                error!("Health check failed: {}", e);
                HttpResponse::ServiceUnavailable().json(json!({
                    "status": "unhealthy",
                    "backend": storage.backend_name(),
                    "error": e.message(),
                }))
            }
        }
    }
}

/// Health 路由配置
pub fn health_routes() -> actix_web::Scope {
    web::scope("/health")
        .route("", web::get().to(HealthService::health_check))
        .route("", web::head().to(HealthService::health_check))
}
