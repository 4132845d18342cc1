//! Dashboard API 统计汇总

use actix_web::{HttpResponse, Result as ActixResult, web};

use crate::api::middleware::OwnerId;
use crate::errors::LinkbioError;
use crate::services::AnalyticsService;

use super::error_code::ErrorCode;
use super::helpers::{error_from_linkbio, error_with_code, success_response};
use super::types::SummaryQuery;

/// GET /analytics/summary?days=N
pub async fn get_summary(
    owner: OwnerId,
    query: web::Query<SummaryQuery>,
    service: web::Data<AnalyticsService>,
) -> ActixResult<HttpResponse> {
    let response = match service.summarize(owner.as_str(), query.days).await {
        Ok(summary) => success_response(summary),
        Err(e @ LinkbioError::StoreUnavailable(_)) => {
            error_with_code(&e, ErrorCode::AnalyticsQueryFailed)
        }
        Err(e) => error_from_linkbio(&e),
    };
    Ok(response)
}
