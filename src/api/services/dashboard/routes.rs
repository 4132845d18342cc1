//! Dashboard API 路由配置

use actix_web::web;

use super::analytics::get_summary;
use super::links::{
    create_link, delete_link, list_links, reorder_links, set_link_active, update_link,
};
use super::profile::{get_profile, save_profile};

/// 主页资料路由 `/profile`
pub fn profile_routes() -> actix_web::Scope {
    web::scope("/profile")
        .route("", web::get().to(get_profile))
        .route("", web::put().to(save_profile))
}

/// 链接管理路由 `/links`
///
/// 包含：
/// - GET /links - 获取全部链接
/// - POST /links - 创建链接
/// - PUT /links/order - 重排
/// - PATCH /links/{id} - 更新链接
/// - DELETE /links/{id} - 删除链接
/// - PUT /links/{id}/active - 显示/隐藏
pub fn links_routes() -> actix_web::Scope {
    web::scope("/links")
        .route("", web::get().to(list_links))
        .route("", web::post().to(create_link))
        // must be before /{id}
        .route("/order", web::put().to(reorder_links))
        .route("/{id}/active", web::put().to(set_link_active))
        .route("/{id}", web::patch().to(update_link))
        .route("/{id}", web::delete().to(delete_link))
}

/// 统计路由 `/analytics`
pub fn analytics_routes() -> actix_web::Scope {
    web::scope("/analytics").route("/summary", web::get().to(get_summary))
}
