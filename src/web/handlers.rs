//! The two façade handlers: trigger a discovery run, fetch the last
//! snapshot. Both are intentionally thin — all the actual work happens in
//! `crate::engine` and `crate::store`.

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::error;

use super::AppState;
use crate::engine::DiscoveryEngine;
use crate::store::writer;

/// `POST /run-discovery`: run the engine once, persist the snapshot, cache
/// it in memory, and report the outcome.
pub async fn run_discovery(state: web::Data<AppState>) -> HttpResponse {
    let engine = DiscoveryEngine::new(state.config.clone(), state.classifier.clone());
    let snapshot = engine.run().await;

    if let Err(e) = writer::write(&snapshot, &state.config.snapshot_path) {
        error!(error = %e, "failed to persist discovery snapshot");
        return HttpResponse::InternalServerError().json(json!({
            "success": false,
            "deviceCount": snapshot.devices.len(),
            "message": format!("discovery completed but snapshot could not be written: {e}"),
        }));
    }

    let device_count = snapshot.devices.len();
    *state.last_snapshot.write().await = Some(snapshot);

    HttpResponse::Ok().json(json!({
        "success": true,
        "deviceCount": device_count,
        "message": "discovery run complete",
    }))
}

/// `GET /discovery.json`: the last completed snapshot, or an empty device
/// list if no run has completed yet — never a 404.
pub async fn get_discovery(state: web::Data<AppState>) -> HttpResponse {
    match &*state.last_snapshot.read().await {
        Some(snapshot) => HttpResponse::Ok().json(snapshot),
        None => HttpResponse::Ok().json(json!({ "devices": [] })),
    }
}
