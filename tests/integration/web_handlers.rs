//! Integration tests for the HTTP façade handlers.

use std::sync::Arc;

use actix_web::{test, web, App};
use serde_json::Value;
use tokio::sync::RwLock;

use netwatch_discovery::classify::KeywordClassifier;
use netwatch_discovery::config::DiscoveryConfig;
use netwatch_discovery::web::{handlers, AppState};

fn fast_config(snapshot_path: std::path::PathBuf) -> DiscoveryConfig {
    let mut config = DiscoveryConfig::default();
    config.timing.t_passive_secs = 0;
    config.timing.t_active_secs = 0;
    config.snapshot_path = snapshot_path;
    config
}

#[actix_web::test]
async fn discovery_json_is_empty_before_any_run() {
    let dir = tempfile::tempdir().unwrap();
    let state = web::Data::new(AppState {
        config: fast_config(dir.path().join("discovery.json")),
        classifier: Arc::new(KeywordClassifier),
        last_snapshot: RwLock::new(None),
    });

    let app = test::init_service(
        App::new()
            .app_data(state.clone())
            .route("/discovery.json", web::get().to(handlers::get_discovery)),
    )
    .await;

    let req = test::TestRequest::get().uri("/discovery.json").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["devices"], serde_json::json!([]));
}

#[actix_web::test]
async fn run_discovery_persists_and_caches_a_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot_path = dir.path().join("discovery.json");
    let state = web::Data::new(AppState {
        config: fast_config(snapshot_path.clone()),
        classifier: Arc::new(KeywordClassifier),
        last_snapshot: RwLock::new(None),
    });

    let app = test::init_service(
        App::new()
            .app_data(state.clone())
            .route("/run-discovery", web::post().to(handlers::run_discovery))
            .route("/discovery.json", web::get().to(handlers::get_discovery)),
    )
    .await;

    let req = test::TestRequest::post().uri("/run-discovery").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert!(snapshot_path.exists(), "run-discovery must persist discovery.json");

    let req = test::TestRequest::get().uri("/discovery.json").to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert!(body.get("meta").is_some(), "cached snapshot must be served afterwards");
}
