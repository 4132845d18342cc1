use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

/// 主页资料
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub owner_id: String,
    pub handle: String,
    pub display_name: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub theme: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 写入/覆盖资料时使用的字段集合（已校验）
#[derive(Debug, Clone)]
pub struct ProfileRecord {
    pub owner_id: String,
    pub handle: String,
    pub display_name: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub theme: String,
}

/// owner 的一条外链
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub position: i32,
    pub is_active: bool,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 新建链接的字段（position 由存储层计算）
#[derive(Debug, Clone)]
pub struct NewLink {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

/// 局部更新，`None` 表示保持原值；description/icon 的 `Some(None)` 表示清空
#[derive(Debug, Clone, Default)]
pub struct LinkChanges {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<Option<String>>,
    pub icon: Option<Option<String>>,
}

impl LinkChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.url.is_none()
            && self.description.is_none()
            && self.icon.is_none()
    }
}

/// 重排结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderOutcome {
    Applied,
    /// 请求的 id 集合与当前集合不一致，未做任何写入
    Mismatch(String),
}

/// 事件类型
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EventKind {
    PageView,
    LinkClick,
}

/// 访问者元信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitorMeta {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

/// 待写入的统计事件
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub owner_id: String,
    pub kind: EventKind,
    pub link_id: Option<String>,
    pub meta: VisitorMeta,
    pub created_at: DateTime<Utc>,
}
