//! EventSink implementation for SeaOrmStorage
//!
//! Events are appended one row per call; click counters are bumped with a
//! single `UPDATE ... SET click_count = click_count + 1` so concurrent
//! clicks never lose increments.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{ActiveValue::Set, ConnectionTrait, EntityTrait, ExprTrait};
use tracing::debug;

use super::SeaOrmStorage;
use super::retry;
use crate::storage::NewEvent;

use migration::entities::{analytics_event, link};

/// 统计事件写入端
#[async_trait]
pub trait EventSink: Send + Sync {
    /// 追加一条事件
    async fn append_event(&self, event: NewEvent) -> anyhow::Result<()>;

    /// 原子地将链接点击数加一，返回是否命中
    async fn increment_click_count(&self, owner_id: &str, link_id: &str) -> anyhow::Result<bool>;
}

#[async_trait]
impl EventSink for SeaOrmStorage {
    async fn append_event(&self, event: NewEvent) -> anyhow::Result<()> {
        let model = analytics_event::ActiveModel {
            owner_id: Set(event.owner_id.clone()),
            event_type: Set(event.kind.as_ref().to_string()),
            link_id: Set(event.link_id.clone()),
            ip_address: Set(event.meta.ip_address.clone()),
            user_agent: Set(event.meta.user_agent.clone()),
            referrer: Set(event.meta.referrer.clone()),
            created_at: Set(event.created_at),
            ..Default::default()
        };

        let db = &self.db;
        retry::with_retry("append_event", self.retry_config, || async {
            analytics_event::Entity::insert(model.clone())
                .exec_without_returning(db)
                .await
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to insert analytics event: {}", e))?;

        debug!(
            "Analytics event stored: owner={}, kind={}",
            event.owner_id,
            event.kind.as_ref()
        );
        Ok(())
    }

    async fn increment_click_count(&self, owner_id: &str, link_id: &str) -> anyhow::Result<bool> {
        let stmt = Query::update()
            .table(link::Entity)
            .value(
                link::Column::ClickCount,
                Expr::col(link::Column::ClickCount).add(Expr::val(1i64)),
            )
            .and_where(Expr::col(link::Column::Id).eq(link_id))
            .and_where(Expr::col(link::Column::OwnerId).eq(owner_id))
            .to_owned();

        let db = &self.db;
        let stmt_ref = &stmt;
        let result = retry::with_retry("increment_click_count", self.retry_config, || async {
            db.execute(stmt_ref).await
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to increment click count: {}", e))?;

        Ok(result.rows_affected() > 0)
    }
}
