//! AnalyticsService integration tests

use std::sync::{Arc, Once};

use async_trait::async_trait;
use chrono::{Local, Utc};
use linkbio::config::{AnalyticsConfig, DatabaseConfig, init_config};
use linkbio::errors::LinkbioError;
use linkbio::services::{
    AnalyticsService, CreateLinkRequest, LinkService, ProfileService, SaveProfileRequest,
};
use linkbio::storage::{EventSink, NewEvent, SeaOrmStorage, StorageFactory, VisitorMeta};
use tempfile::TempDir;

static INIT: Once = Once::new();

fn init_test_config() {
    INIT.call_once(|| {
        init_config();
    });
}

async fn create_temp_storage() -> (Arc<SeaOrmStorage>, TempDir) {
    init_test_config();

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("analytics.db");
    let config = DatabaseConfig {
        database_url: format!("sqlite://{}?mode=rwc", db_path.display()),
        ..Default::default()
    };

    let storage = StorageFactory::create(&config)
        .await
        .expect("Failed to create storage");
    (storage, temp_dir)
}

struct Fixture {
    analytics: Arc<AnalyticsService>,
    links: LinkService,
    storage: Arc<SeaOrmStorage>,
    _dir: TempDir,
}

async fn setup() -> Fixture {
    let (storage, dir) = create_temp_storage().await;
    ProfileService::new(storage.clone())
        .save(
            "alice",
            SaveProfileRequest {
                handle: "alice".to_string(),
                display_name: "Alice".to_string(),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to create profile");

    Fixture {
        analytics: Arc::new(AnalyticsService::new(
            storage.clone(),
            AnalyticsConfig::default(),
        )),
        links: LinkService::new(storage.clone()),
        storage,
        _dir: dir,
    }
}

async fn add_link(fixture: &Fixture, title: &str) -> String {
    fixture
        .links
        .create(
            "alice",
            CreateLinkRequest {
                title: title.to_string(),
                url: format!("https://example.com/{}", title),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .id
}

fn visitor() -> VisitorMeta {
    VisitorMeta {
        ip_address: Some("203.0.113.5".to_string()),
        user_agent: Some("test-agent".to_string()),
        referrer: None,
    }
}

#[tokio::test]
async fn test_empty_summary_has_zero_filled_window() {
    let fixture = setup().await;

    let summary = fixture.analytics.summarize("alice", None).await.unwrap();

    assert_eq!(summary.total_views, 0);
    assert_eq!(summary.total_clicks, 0);
    assert!(summary.top_links.is_empty());
    assert_eq!(summary.window_days, 7);
    assert_eq!(summary.daily.len(), 7);
    assert!(summary.daily.iter().all(|d| d.views == 0 && d.clicks == 0));
    assert_eq!(summary.daily.last().unwrap().date, Local::now().date_naive());
    assert!(summary.daily.windows(2).all(|w| w[0].date < w[1].date));
}

#[tokio::test]
async fn test_views_and_clicks_are_counted() {
    let fixture = setup().await;
    let blog = add_link(&fixture, "blog").await;
    let shop = add_link(&fixture, "shop").await;
    let _idle = add_link(&fixture, "idle").await;

    fixture.analytics.record_view("alice", visitor()).await;
    fixture.analytics.record_view("alice", visitor()).await;
    fixture.analytics.record_click("alice", &blog, visitor()).await;
    fixture.analytics.record_click("alice", &shop, visitor()).await;
    fixture.analytics.record_click("alice", &shop, visitor()).await;

    let summary = fixture.analytics.summarize("alice", Some(3)).await.unwrap();

    assert_eq!(summary.total_views, 2);
    assert_eq!(summary.total_clicks, 3);
    assert_eq!(summary.daily.len(), 3);
    let today = summary.daily.last().unwrap();
    assert_eq!((today.views, today.clicks), (2, 3));

    let top: Vec<(&str, i64)> = summary
        .top_links
        .iter()
        .map(|l| (l.id.as_str(), l.click_count))
        .collect();
    assert_eq!(top, vec![(shop.as_str(), 2), (blog.as_str(), 1)]);
}

#[tokio::test]
async fn test_top_links_ties_prefer_newest_link() {
    let fixture = setup().await;
    let older = add_link(&fixture, "older").await;
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    let newer = add_link(&fixture, "newer").await;
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    let busiest = add_link(&fixture, "busiest").await;

    for id in [&older, &older, &newer, &newer, &busiest, &busiest, &busiest] {
        fixture.analytics.record_click("alice", id, visitor()).await;
    }

    let summary = fixture.analytics.summarize("alice", None).await.unwrap();
    let top: Vec<&str> = summary.top_links.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(top, vec![busiest.as_str(), newer.as_str(), older.as_str()]);
}

#[tokio::test]
async fn test_top_links_respects_limit() {
    let fixture = setup().await;
    let analytics = AnalyticsService::new(
        fixture.storage.clone(),
        AnalyticsConfig {
            top_links_limit: 2,
            ..AnalyticsConfig::default()
        },
    );

    let mut ids = Vec::new();
    for (i, title) in ["one", "two", "three", "four"].into_iter().enumerate() {
        let id = add_link(&fixture, title).await;
        for _ in 0..=i {
            analytics.record_click("alice", &id, visitor()).await;
        }
        ids.push(id);
    }

    let summary = analytics.summarize("alice", None).await.unwrap();
    assert_eq!(summary.total_clicks, 10);

    let top: Vec<(&str, i64)> = summary
        .top_links
        .iter()
        .map(|l| (l.id.as_str(), l.click_count))
        .collect();
    assert_eq!(top, vec![(ids[3].as_str(), 4), (ids[2].as_str(), 3)]);
}

#[tokio::test]
async fn test_click_for_unknown_link_is_recorded_without_counter() {
    let fixture = setup().await;
    let link = add_link(&fixture, "blog").await;

    fixture
        .analytics
        .record_click("alice", "not-a-link", visitor())
        .await;

    let summary = fixture.analytics.summarize("alice", None).await.unwrap();
    assert_eq!(summary.total_clicks, 1);
    assert!(summary.top_links.is_empty());

    let stored = fixture.storage.get_link("alice", &link).await.unwrap().unwrap();
    assert_eq!(stored.click_count, 0);
}

#[tokio::test]
async fn test_summary_is_scoped_to_owner() {
    let fixture = setup().await;
    fixture.analytics.record_view("alice", visitor()).await;

    let summary = fixture.analytics.summarize("bob", None).await.unwrap();
    assert_eq!(summary.total_views, 0);
}

#[tokio::test]
async fn test_invalid_window_is_rejected() {
    let fixture = setup().await;

    for days in [0, AnalyticsConfig::default().max_window_days + 1] {
        let result = fixture.analytics.summarize("alice", Some(days)).await;
        assert!(matches!(result, Err(LinkbioError::Validation(_))));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_clicks_are_not_lost() {
    const CLICKS: usize = 32;

    let fixture = setup().await;
    let link = add_link(&fixture, "hot").await;

    let handles: Vec<_> = (0..CLICKS)
        .map(|_| {
            let analytics = fixture.analytics.clone();
            let link = link.clone();
            tokio::spawn(async move { analytics.record_click("alice", &link, visitor()).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    let stored = fixture.storage.get_link("alice", &link).await.unwrap().unwrap();
    assert_eq!(stored.click_count, CLICKS as i64);

    let summary = fixture.analytics.summarize("alice", None).await.unwrap();
    assert_eq!(summary.total_clicks, CLICKS as u64);
}

// =============================================================================
// Write failures are swallowed
// =============================================================================

struct FailingSink;

#[async_trait]
impl EventSink for FailingSink {
    async fn append_event(&self, _event: NewEvent) -> anyhow::Result<()> {
        anyhow::bail!("store offline")
    }

    async fn increment_click_count(&self, _owner_id: &str, _link_id: &str) -> anyhow::Result<bool> {
        anyhow::bail!("store offline")
    }
}

#[tokio::test]
async fn test_sink_failures_do_not_propagate() {
    let fixture = setup().await;
    let link = add_link(&fixture, "blog").await;
    let analytics = AnalyticsService::with_sink(
        fixture.storage.clone(),
        Arc::new(FailingSink),
        AnalyticsConfig::default(),
    );

    analytics.record_view("alice", VisitorMeta::default()).await;
    analytics.record_click("alice", &link, VisitorMeta::default()).await;

    let summary = analytics.summarize("alice", None).await.unwrap();
    assert_eq!(summary.total_views, 0);
    assert_eq!(summary.total_clicks, 0);
}

#[tokio::test]
async fn test_summarize_at_fixed_time() {
    let fixture = setup().await;
    fixture.analytics.record_view("alice", visitor()).await;

    let now = Utc::now();
    let summary = fixture
        .analytics
        .summarize_at("alice", Some(2), now)
        .await
        .unwrap();

    assert_eq!(summary.daily.len(), 2);
    assert_eq!(summary.daily[1].date, now.date_naive());
    assert_eq!(summary.daily[1].views, 1);
}
