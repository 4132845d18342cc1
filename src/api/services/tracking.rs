//! 事件上报 `/api/analytics/track`
//!
//! 公开页在访问与点击时调用。无论请求体是否合法都返回 202，
//! 写入在后台任务中完成，失败只记日志。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use tracing::debug;

use crate::services::AnalyticsService;
use crate::storage::{EventKind, VisitorMeta};
use crate::utils::ip::extract_client_ip;

use super::dashboard::TrackPayload;

/// 解析后的上报事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TrackedEvent {
    View { owner_id: String },
    Click { owner_id: String, link_id: String },
}

pub(crate) fn parse_track_payload(body: &[u8]) -> Result<(TrackedEvent, TrackPayload), String> {
    let payload: TrackPayload =
        serde_json::from_slice(body).map_err(|e| format!("invalid JSON: {}", e))?;

    let owner_id = payload.user_id.trim().to_string();
    if owner_id.is_empty() {
        return Err("missing user_id".to_string());
    }

    let kind: EventKind = payload
        .event_type
        .parse()
        .map_err(|_| format!("unknown event_type '{}'", payload.event_type))?;

    let event = match kind {
        EventKind::PageView => TrackedEvent::View { owner_id },
        EventKind::LinkClick => {
            let link_id = payload
                .link_id
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .ok_or_else(|| "link_click without link_id".to_string())?
                .to_string();
            TrackedEvent::Click { owner_id, link_id }
        }
    };

    Ok((event, payload))
}

fn accepted() -> HttpResponse {
    HttpResponse::Accepted().json(serde_json::json!({ "success": true }))
}

pub struct TrackingService;

impl TrackingService {
    pub async fn track(
        req: HttpRequest,
        body: web::Bytes,
        analytics: web::Data<AnalyticsService>,
    ) -> ActixResult<HttpResponse> {
        let (event, payload) = match parse_track_payload(&body) {
            Ok(parsed) => parsed,
            Err(reason) => {
                debug!("Dropping tracking event: {}", reason);
                return Ok(accepted());
            }
        };

        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|h| h.to_str().ok())
                .map(String::from)
        };
        let meta = VisitorMeta {
            ip_address: extract_client_ip(&req),
            user_agent: payload.user_agent.or_else(|| header("user-agent")),
            referrer: payload.referrer.or_else(|| header("referer")),
        };

        tokio::spawn(async move {
            match event {
                TrackedEvent::View { owner_id } => analytics.record_view(&owner_id, meta).await,
                TrackedEvent::Click { owner_id, link_id } => {
                    analytics.record_click(&owner_id, &link_id, meta).await
                }
            }
        });

        Ok(accepted())
    }
}

/// 事件上报路由
pub fn tracking_routes() -> actix_web::Scope {
    web::scope("/api/analytics").route("/track", web::post().to(TrackingService::track))
}
