//! HTTP API tests using actix-web's test utilities

use std::sync::Once;
use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};
use tempfile::TempDir;

use linkbio::api::configure_routes;
use linkbio::api::jwt::get_jwt_service;
use linkbio::config::{DatabaseConfig, get_config, init_config};
use linkbio::runtime::lifetime::startup::StartupContext;
use linkbio::storage::StorageFactory;

static INIT: Once = Once::new();

fn init_test_config() {
    INIT.call_once(|| {
        init_config();
    });
}

async fn create_context() -> (StartupContext, TempDir) {
    init_test_config();

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("api.db");
    let config = DatabaseConfig {
        database_url: format!("sqlite://{}?mode=rwc", db_path.display()),
        ..Default::default()
    };
    let storage = StorageFactory::create(&config)
        .await
        .expect("Failed to create storage");

    (StartupContext::from_storage(storage, &get_config()), temp_dir)
}

macro_rules! init_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($ctx.storage.clone()))
                .app_data(web::Data::from($ctx.link_service.clone()))
                .app_data(web::Data::from($ctx.profile_service.clone()))
                .app_data(web::Data::from($ctx.analytics_service.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

fn bearer(owner_id: &str) -> (&'static str, String) {
    let token = get_jwt_service()
        .generate_access_token(owner_id)
        .expect("Failed to sign token");
    ("Authorization", format!("Bearer {}", token))
}

#[actix_rt::test]
async fn test_health() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
}

#[actix_rt::test]
async fn test_dashboard_requires_token() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/v1/links").to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1001);

    let req = test::TestRequest::get()
        .uri("/api/v1/links")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_link_crud_flow() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);
    let auth = bearer("owner-1");

    // Links need a profile first
    let req = test::TestRequest::post()
        .uri("/api/v1/links")
        .insert_header(auth.clone())
        .set_json(json!({"title": "Blog", "url": "https://blog.example.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3002);

    let req = test::TestRequest::put()
        .uri("/api/v1/profile")
        .insert_header(auth.clone())
        .set_json(json!({"handle": "Owner1", "display_name": "Owner One"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["handle"], "owner1");

    let mut ids = Vec::new();
    for (title, icon) in [("Blog", "FaGithub"), ("Shop", "globe"), ("Mail", "envelope")] {
        let req = test::TestRequest::post()
            .uri("/api/v1/links")
            .insert_header(auth.clone())
            .set_json(json!({"title": title, "url": "https://example.com", "icon": icon}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        ids.push(body["data"]["id"].as_str().unwrap().to_string());
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/links")
        .insert_header(auth.clone())
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let kinds: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["icon_kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["github", "website", "email"]);

    // Reorder
    let order = vec![ids[2].clone(), ids[0].clone(), ids[1].clone()];
    let req = test::TestRequest::put()
        .uri("/api/v1/links/order")
        .insert_header(auth.clone())
        .set_json(json!({"ids": order}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let returned: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["id"].as_str().unwrap())
        .collect();
    assert_eq!(returned, order.iter().map(String::as_str).collect::<Vec<_>>());

    // Update
    let req = test::TestRequest::patch()
        .uri(&format!("/api/v1/links/{}", ids[0]))
        .insert_header(auth.clone())
        .set_json(json!({"title": "Writing"}))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["title"], "Writing");

    // Hide, then check the public page
    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/links/{}/active", ids[1]))
        .insert_header(auth.clone())
        .set_json(json!({"active": false}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/public/owner1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["profile"]["owner_id"], "owner-1");
    let public_titles: Vec<&str> = body["data"]["links"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["title"].as_str().unwrap())
        .collect();
    assert_eq!(public_titles, vec!["Mail", "Writing"]);

    // Delete
    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/links/{}", ids[2]))
        .insert_header(auth.clone())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/links/{}", ids[2]))
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3000);
}

#[actix_rt::test]
async fn test_other_owner_gets_not_found() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);

    for (owner, handle) in [("owner-a", "page-a"), ("owner-b", "page-b")] {
        let req = test::TestRequest::put()
            .uri("/api/v1/profile")
            .insert_header(bearer(owner))
            .set_json(json!({"handle": handle, "display_name": owner}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    let req = test::TestRequest::post()
        .uri("/api/v1/links")
        .insert_header(bearer("owner-a"))
        .set_json(json!({"title": "Mine", "url": "https://a.example.com"}))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/links/{}", id))
        .insert_header(bearer("owner-b"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::put()
        .uri("/api/v1/profile")
        .insert_header(bearer("owner-b"))
        .set_json(json!({"handle": "page-a", "display_name": "thief"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3010);
}

#[actix_rt::test]
async fn test_malformed_json_body() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::put()
        .uri("/api/v1/links/order")
        .insert_header(bearer("owner-1"))
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"ids\": 42}")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1000);
}

#[actix_rt::test]
async fn test_summary_window_validation() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/v1/analytics/summary?days=0")
        .insert_header(bearer("owner-1"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/v1/analytics/summary?days=14")
        .insert_header(bearer("owner-1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["daily"].as_array().unwrap().len(), 14);
}

#[actix_rt::test]
async fn test_tracking_always_accepts() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);

    for payload in [
        "garbage",
        "{}",
        r#"{"user_id":"owner-1","event_type":"hover"}"#,
        r#"{"user_id":"owner-1","event_type":"link_click"}"#,
        r#"{"user_id":"ghost","event_type":"page_view"}"#,
    ] {
        let req = test::TestRequest::post()
            .uri("/api/analytics/track")
            .insert_header(("Content-Type", "application/json"))
            .set_payload(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::ACCEPTED, "payload {}", payload);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"success": true}));
    }
}

#[actix_rt::test]
async fn test_tracked_click_reaches_summary() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);
    let auth = bearer("owner-1");

    let req = test::TestRequest::put()
        .uri("/api/v1/profile")
        .insert_header(auth.clone())
        .set_json(json!({"handle": "tracked", "display_name": "Tracked"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/v1/links")
        .insert_header(auth.clone())
        .set_json(json!({"title": "Blog", "url": "https://blog.example.com"}))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let link_id = body["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/analytics/track")
        .insert_header(("User-Agent", "integration-test"))
        .set_json(json!({"owner": "owner-1", "event_type": "link_click", "link_id": link_id}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::ACCEPTED);

    // Recording happens in a background task
    let mut total_clicks = 0;
    for _ in 0..50 {
        let req = test::TestRequest::get()
            .uri("/api/v1/analytics/summary")
            .insert_header(auth.clone())
            .to_request();
        let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
        total_clicks = body["data"]["total_clicks"].as_u64().unwrap();
        if total_clicks == 1 && body["data"]["top_links"][0]["click_count"] == 1 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(total_clicks, 1);
}
