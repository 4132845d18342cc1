//! Analytics service layer
//!
//! 记录访问/点击事件并汇总给 owner。
//!
//! - 写入（record_view / record_click）失败只记日志，不向调用方传播
//! - 汇总（summarize）只读，存储错误原样返回
//! - 日序列按服务器本地日历切分，`summarize_at` 可注入任意时区的“当前时间”

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::AnalyticsConfig;
use crate::errors::{LinkbioError, Result};
use crate::storage::{EventKind, EventSink, Link, NewEvent, SeaOrmStorage, VisitorMeta};

// ============ 公共类型定义 ============

/// 某一天的访问与点击数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub views: u64,
    pub clicks: u64,
}

/// 热门链接
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopLink {
    pub id: String,
    pub title: String,
    pub url: String,
    pub click_count: i64,
}

impl From<Link> for TopLink {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            title: link.title,
            url: link.url,
            click_count: link.click_count,
        }
    }
}

/// 汇总结果
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSummary {
    pub total_views: u64,
    pub total_clicks: u64,
    pub top_links: Vec<TopLink>,
    /// 恰好 `window_days` 项，按日期升序，最后一项为“今天”
    pub daily: Vec<DailyCount>,
    pub window_days: u32,
}

/// Analytics 服务
pub struct AnalyticsService {
    storage: Arc<SeaOrmStorage>,
    sink: Arc<dyn EventSink>,
    settings: AnalyticsConfig,
}

impl AnalyticsService {
    /// 使用存储自身作为事件写入端
    pub fn new(storage: Arc<SeaOrmStorage>, settings: AnalyticsConfig) -> Self {
        let sink: Arc<dyn EventSink> = storage.clone();
        Self::with_sink(storage, sink, settings)
    }

    pub fn with_sink(
        storage: Arc<SeaOrmStorage>,
        sink: Arc<dyn EventSink>,
        settings: AnalyticsConfig,
    ) -> Self {
        Self {
            storage,
            sink,
            settings,
        }
    }

    /// 记录一次主页访问
    pub async fn record_view(&self, owner_id: &str, meta: VisitorMeta) {
        let event = NewEvent {
            owner_id: owner_id.to_string(),
            kind: EventKind::PageView,
            link_id: None,
            meta,
            created_at: Utc::now(),
        };

        if let Err(e) = self.sink.append_event(event).await {
            warn!("Failed to record page view for owner {}: {}", owner_id, e);
        }
    }

    /// 记录一次链接点击并将该链接的 click_count 加一
    ///
    /// 事件写入与计数自增相互独立，任一失败都不影响另一个。
    pub async fn record_click(&self, owner_id: &str, link_id: &str, meta: VisitorMeta) {
        let event = NewEvent {
            owner_id: owner_id.to_string(),
            kind: EventKind::LinkClick,
            link_id: Some(link_id.to_string()),
            meta,
            created_at: Utc::now(),
        };

        if let Err(e) = self.sink.append_event(event).await {
            warn!(
                "Failed to record click event for link {} (owner {}): {}",
                link_id, owner_id, e
            );
        }

        match self.sink.increment_click_count(owner_id, link_id).await {
            Ok(true) => {}
            Ok(false) => debug!(
                "Click for unknown link {} (owner {}), counter not changed",
                link_id, owner_id
            ),
            Err(e) => warn!("Failed to increment click count for link {}: {}", link_id, e),
        }
    }

    /// 按服务器本地时区汇总
    pub async fn summarize(
        &self,
        owner_id: &str,
        window_days: Option<u32>,
    ) -> Result<AnalyticsSummary> {
        self.summarize_at(owner_id, window_days, Local::now()).await
    }

    /// 以 `now` 所在时区的日历日为边界汇总
    pub async fn summarize_at<Tz: TimeZone>(
        &self,
        owner_id: &str,
        window_days: Option<u32>,
        now: DateTime<Tz>,
    ) -> Result<AnalyticsSummary> {
        let window_days = self.resolve_window(window_days)?;
        let tz = now.timezone();
        let today = now.date_naive();
        let start_date = today - chrono::Days::new(u64::from(window_days - 1));
        let since = local_midnight(&tz, start_date);

        let total_views = self
            .storage
            .count_events(owner_id, EventKind::PageView)
            .await?;
        let total_clicks = self
            .storage
            .count_events(owner_id, EventKind::LinkClick)
            .await?;
        let top_links = self
            .storage
            .top_links(owner_id, self.settings.top_links_limit)
            .await?
            .into_iter()
            .map(TopLink::from)
            .collect();

        let rows = self.storage.events_since(owner_id, since).await?;
        let daily = build_daily_series(&rows, start_date, window_days, &tz);

        debug!(
            "Analytics: summary for owner {} ({} days, {} events in window)",
            owner_id,
            window_days,
            rows.len()
        );

        Ok(AnalyticsSummary {
            total_views,
            total_clicks,
            top_links,
            daily,
            window_days,
        })
    }

    fn resolve_window(&self, window_days: Option<u32>) -> Result<u32> {
        let days = window_days.unwrap_or(self.settings.default_window_days);
        if days == 0 || days > self.settings.max_window_days {
            return Err(LinkbioError::validation(format!(
                "Window must be between 1 and {} days, got {}",
                self.settings.max_window_days, days
            )));
        }
        Ok(days)
    }
}

/// 本地日期 0 点对应的 UTC 时间；0 点不存在（夏令时跳变）时按 UTC 解释
fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}

/// 将事件分桶到 `start_date` 起的连续 `window_days` 天，空白日补零
fn build_daily_series<Tz: TimeZone>(
    rows: &[(String, DateTime<Utc>)],
    start_date: NaiveDate,
    window_days: u32,
    tz: &Tz,
) -> Vec<DailyCount> {
    let mut daily: Vec<DailyCount> = start_date
        .iter_days()
        .take(window_days as usize)
        .map(|date| DailyCount {
            date,
            views: 0,
            clicks: 0,
        })
        .collect();

    for (event_type, created_at) in rows {
        let date = created_at.with_timezone(tz).date_naive();
        let offset = (date - start_date).num_days();
        let Some(bucket) = usize::try_from(offset).ok().and_then(|i| daily.get_mut(i)) else {
            continue;
        };

        match event_type.parse::<EventKind>() {
            Ok(EventKind::PageView) => bucket.views += 1,
            Ok(EventKind::LinkClick) => bucket.clicks += 1,
            Err(_) => {}
        }
    }

    daily
}
