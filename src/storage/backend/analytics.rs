//! Analytics queries over `analytics_events` and `links`

use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use super::converters::model_to_link;
use super::{SeaOrmStorage, retry};
use crate::errors::Result;
use crate::storage::{EventKind, Link};

use migration::entities::{analytics_event, link};

/// 时间窗口内的一条事件（仅类型与时间）
pub type EventTimestampRow = (String, DateTime<Utc>);

impl SeaOrmStorage {
    /// owner 某类事件的全部数量
    pub async fn count_events(&self, owner_id: &str, kind: EventKind) -> Result<u64> {
        let db = &self.db;
        let count = retry::with_retry(
            &format!("count_events({}, {})", owner_id, kind.as_ref()),
            self.retry_config,
            || async {
                analytics_event::Entity::find()
                    .filter(analytics_event::Column::OwnerId.eq(owner_id))
                    .filter(analytics_event::Column::EventType.eq(kind.as_ref()))
                    .count(db)
                    .await
            },
        )
        .await?;

        Ok(count)
    }

    /// `since` 之后的事件（类型, 时间），按时间升序
    pub async fn events_since(
        &self,
        owner_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<EventTimestampRow>> {
        let db = &self.db;
        let rows = retry::with_retry(
            &format!("events_since({})", owner_id),
            self.retry_config,
            || async {
                analytics_event::Entity::find()
                    .select_only()
                    .column(analytics_event::Column::EventType)
                    .column(analytics_event::Column::CreatedAt)
                    .filter(analytics_event::Column::OwnerId.eq(owner_id))
                    .filter(analytics_event::Column::CreatedAt.gte(since))
                    .order_by_asc(analytics_event::Column::CreatedAt)
                    .into_tuple::<EventTimestampRow>()
                    .all(db)
                    .await
            },
        )
        .await?;

        Ok(rows)
    }

    /// 点击数大于 0 的链接，按点击数降序，同分时较新的在前
    pub async fn top_links(&self, owner_id: &str, limit: u64) -> Result<Vec<Link>> {
        let db = &self.db;
        let models = retry::with_retry(
            &format!("top_links({})", owner_id),
            self.retry_config,
            || async {
                link::Entity::find()
                    .filter(link::Column::OwnerId.eq(owner_id))
                    .filter(link::Column::ClickCount.gt(0))
                    .order_by_desc(link::Column::ClickCount)
                    .order_by_desc(link::Column::CreatedAt)
                    .limit(limit)
                    .all(db)
                    .await
            },
        )
        .await?;

        Ok(models.into_iter().map(model_to_link).collect())
    }
}
