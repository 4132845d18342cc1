//! 公开主页 `/api/public/{handle}`

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Result as ActixResult, web};
use tracing::trace;

use crate::errors::LinkbioError;
use crate::services::ProfileService;

use super::dashboard::{
    ErrorCode, PublicLinkResponse, PublicPageResponse, PublicProfileResponse, error_from_linkbio,
    error_response, success_response,
};

pub struct PublicService;

impl PublicService {
    pub async fn get_page(
        path: web::Path<String>,
        service: web::Data<ProfileService>,
    ) -> ActixResult<HttpResponse> {
        let handle = path.into_inner();
        trace!("Public page request for '{}'", handle);

        let response = match service.public_page(&handle).await {
            Ok(page) => success_response(PublicPageResponse {
                profile: PublicProfileResponse::from(page.profile),
                links: page
                    .links
                    .into_iter()
                    .map(PublicLinkResponse::from)
                    .collect(),
            }),
            Err(LinkbioError::NotFoundOrForbidden(_)) => {
                error_response(StatusCode::NOT_FOUND, ErrorCode::NotFound, "Page not found")
            }
            Err(e) => error_from_linkbio(&e),
        };
        Ok(response)
    }
}

/// 公开主页路由
pub fn public_routes() -> actix_web::Scope {
    web::scope("/api/public").route("/{handle}", web::get().to(PublicService::get_page))
}
