//! Dashboard API 主页资料

use actix_web::{HttpResponse, Responder, Result as ActixResult, web};
use tracing::trace;

use crate::api::middleware::OwnerId;
use crate::services::ProfileService;

use super::helpers::api_result;
use super::types::SaveProfileBody;

/// GET /profile
pub async fn get_profile(
    owner: OwnerId,
    service: web::Data<ProfileService>,
) -> ActixResult<impl Responder> {
    trace!("Dashboard API: get profile for owner {}", owner.as_str());
    Ok(api_result(service.get(owner.as_str()).await))
}

/// PUT /profile
pub async fn save_profile(
    owner: OwnerId,
    body: web::Json<SaveProfileBody>,
    service: web::Data<ProfileService>,
) -> ActixResult<HttpResponse> {
    let result = service.save(owner.as_str(), body.into_inner().into()).await;
    Ok(api_result(result))
}
