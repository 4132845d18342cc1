//! Dashboard API 链接管理

use actix_web::{HttpResponse, Result as ActixResult, web};
use tracing::{info, trace};

use crate::api::middleware::OwnerId;
use crate::services::LinkService;
use crate::storage::Link;

use super::helpers::link_result;
use super::types::{CreateLinkBody, LinkResponse, ReorderBody, SetActiveBody, UpdateLinkBody};

fn to_responses(links: Vec<Link>) -> Vec<LinkResponse> {
    links.into_iter().map(LinkResponse::from).collect()
}

/// GET /links
pub async fn list_links(
    owner: OwnerId,
    service: web::Data<LinkService>,
) -> ActixResult<HttpResponse> {
    trace!("Dashboard API: list links for owner {}", owner.as_str());
    let result = service.list(owner.as_str()).await.map(to_responses);
    Ok(link_result(result))
}

/// POST /links
pub async fn create_link(
    owner: OwnerId,
    body: web::Json<CreateLinkBody>,
    service: web::Data<LinkService>,
) -> ActixResult<HttpResponse> {
    let result = service
        .create(owner.as_str(), body.into_inner().into())
        .await
        .map(LinkResponse::from);
    Ok(link_result(result))
}

/// PATCH /links/{id}
pub async fn update_link(
    owner: OwnerId,
    path: web::Path<String>,
    body: web::Json<UpdateLinkBody>,
    service: web::Data<LinkService>,
) -> ActixResult<HttpResponse> {
    let link_id = path.into_inner();
    let result = service
        .update(owner.as_str(), &link_id, body.into_inner().into())
        .await
        .map(LinkResponse::from);
    Ok(link_result(result))
}

/// DELETE /links/{id}
pub async fn delete_link(
    owner: OwnerId,
    path: web::Path<String>,
    service: web::Data<LinkService>,
) -> ActixResult<HttpResponse> {
    let link_id = path.into_inner();
    let result = service
        .delete(owner.as_str(), &link_id)
        .await
        .map(|_| serde_json::json!({ "id": link_id }));
    Ok(link_result(result))
}

/// PUT /links/{id}/active
pub async fn set_link_active(
    owner: OwnerId,
    path: web::Path<String>,
    body: web::Json<SetActiveBody>,
    service: web::Data<LinkService>,
) -> ActixResult<HttpResponse> {
    let link_id = path.into_inner();
    let active = body.active;
    let result = service
        .set_active(owner.as_str(), &link_id, active)
        .await
        .map(|_| serde_json::json!({ "id": link_id, "is_active": active }));
    Ok(link_result(result))
}

/// PUT /links/order
pub async fn reorder_links(
    owner: OwnerId,
    body: web::Json<ReorderBody>,
    service: web::Data<LinkService>,
) -> ActixResult<HttpResponse> {
    let ids = body.into_inner().ids;
    info!(
        "Dashboard API: reorder {} links for owner {}",
        ids.len(),
        owner.as_str()
    );
    let result = service
        .reorder(owner.as_str(), &ids)
        .await
        .map(to_responses);
    Ok(link_result(result))
}
