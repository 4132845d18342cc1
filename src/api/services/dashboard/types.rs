//! Dashboard API 类型定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::{CreateLinkRequest, SaveProfileRequest, UpdateLinkRequest};
use crate::storage::{Link, Profile};
use crate::utils::IconKind;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

// ============ 链接 ============

#[derive(Serialize, Clone, Debug)]
pub struct LinkResponse {
    pub id: String,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub icon_kind: IconKind,
    pub position: i32,
    pub is_active: bool,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            icon_kind: IconKind::resolve(link.icon.as_deref()),
            id: link.id,
            title: link.title,
            url: link.url,
            description: link.description,
            icon: link.icon,
            position: link.position,
            is_active: link.is_active,
            click_count: link.click_count,
            created_at: link.created_at,
            updated_at: link.updated_at,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct CreateLinkBody {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

impl From<CreateLinkBody> for CreateLinkRequest {
    fn from(body: CreateLinkBody) -> Self {
        Self {
            title: body.title,
            url: body.url,
            description: body.description,
            icon: body.icon,
        }
    }
}

/// 缺省字段保持原值；`description`/`icon` 传空字符串表示清空
#[derive(Deserialize, Clone, Debug, Default)]
pub struct UpdateLinkBody {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

impl From<UpdateLinkBody> for UpdateLinkRequest {
    fn from(body: UpdateLinkBody) -> Self {
        Self {
            title: body.title,
            url: body.url,
            description: body.description,
            icon: body.icon,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct ReorderBody {
    pub ids: Vec<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SetActiveBody {
    pub active: bool,
}

// ============ 主页 ============

#[derive(Deserialize, Clone, Debug)]
pub struct SaveProfileBody {
    pub handle: String,
    pub display_name: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub theme: Option<String>,
}

impl From<SaveProfileBody> for SaveProfileRequest {
    fn from(body: SaveProfileBody) -> Self {
        Self {
            handle: body.handle,
            display_name: body.display_name,
            bio: body.bio,
            avatar_url: body.avatar_url,
            theme: body.theme,
        }
    }
}

/// 公开主页上的链接（不含计数与时间戳）
#[derive(Serialize, Clone, Debug)]
pub struct PublicLinkResponse {
    pub id: String,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub icon_kind: IconKind,
}

impl From<Link> for PublicLinkResponse {
    fn from(link: Link) -> Self {
        Self {
            icon_kind: IconKind::resolve(link.icon.as_deref()),
            id: link.id,
            title: link.title,
            url: link.url,
            description: link.description,
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct PublicProfileResponse {
    /// 前端上报事件时回传
    pub owner_id: String,
    pub handle: String,
    pub display_name: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub theme: String,
}

impl From<Profile> for PublicProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            owner_id: profile.owner_id,
            handle: profile.handle,
            display_name: profile.display_name,
            bio: profile.bio,
            avatar_url: profile.avatar_url,
            theme: profile.theme,
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct PublicPageResponse {
    pub profile: PublicProfileResponse,
    pub links: Vec<PublicLinkResponse>,
}

// ============ Analytics ============

#[derive(Deserialize, Clone, Debug, Default)]
pub struct SummaryQuery {
    pub days: Option<u32>,
}

/// 公开页上报的事件
#[derive(Deserialize, Clone, Debug)]
pub struct TrackPayload {
    #[serde(alias = "owner")]
    pub user_id: String,
    pub event_type: String,
    pub link_id: Option<String>,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
}
