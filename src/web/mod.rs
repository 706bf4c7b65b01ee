//! HTTP façade: the thin front door over the discovery engine.
//!
//! Exposes exactly two endpoints — trigger a run, fetch the last snapshot —
//! with no inventory browsing, search, or authentication surface. The rest
//! of that surface belongs to a full network-management product, not a
//! discovery engine.

pub mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use anyhow::Result;
use tokio::sync::RwLock;
use tracing::info;

use crate::classify::DeviceClassifier;
use crate::config::DiscoveryConfig;
use crate::models::Snapshot;

/// State shared across all façade handlers: the injected config/classifier
/// pair the engine needs to run, and the last completed snapshot.
pub struct AppState {
    pub config: DiscoveryConfig,
    pub classifier: Arc<dyn DeviceClassifier>,
    pub last_snapshot: RwLock<Option<Snapshot>>,
}

/// Start the HTTP façade, binding to the configured host/port.
pub async fn start_web_server(config: DiscoveryConfig, classifier: Arc<dyn DeviceClassifier>) -> Result<()> {
    let bind_addr = config.bind.to_bind_string();
    let cors_origins = config.cors_origins.clone();

    let app_state = web::Data::new(AppState {
        config,
        classifier,
        last_snapshot: RwLock::new(None),
    });

    info!(bind = %bind_addr, "starting discovery HTTP facade");

    HttpServer::new(move || {
        let mut cors = Cors::default().allowed_methods(vec!["GET", "POST"]);
        for origin in &cors_origins {
            cors = cors.allowed_origin(origin.as_str());
        }

        App::new()
            .app_data(app_state.clone())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .route("/run-discovery", web::post().to(handlers::run_discovery))
            .route("/discovery.json", web::get().to(handlers::get_discovery))
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    Ok(())
}
