mod api;
mod config;
mod sources;

use std::path::Path;
use std::sync::Arc;

use axum::http::Method;
use compute::{EnrichedCollection, TaxTable};
use formats::{parse_trend_records, TrendRecord};
use parking_lot::RwLock;
use scene::GlobeState;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::api::AppState;
use crate::config::ServerConfig;
use crate::sources::{load_boundaries, HttpJsonSource, JsonSource};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(err) = run().await {
        error!("{err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let config = ServerConfig::from_env()?;
    let source: Arc<dyn JsonSource> = Arc::new(
        HttpJsonSource::new(config.fetch_timeout).map_err(|e| e.to_string())?,
    );

    let table = match &config.tax_table_path {
        Some(path) => read_text(path)
            .await
            .map(|text| TaxTable::parse(&text))
            .unwrap_or_default(),
        None => TaxTable::bundled(),
    };
    let trends: Vec<TrendRecord> = match &config.trend_table_path {
        Some(path) => read_text(path)
            .await
            .map(|text| parse_trend_records(&text))
            .unwrap_or_default(),
        None => Vec::new(),
    };
    info!(
        "rate table has {} countries, {} trend records",
        table.len(),
        trends.len()
    );

    let boundaries = load_boundaries(
        source.as_ref(),
        &config.boundaries_url,
        config.boundaries_path.as_deref(),
    )
    .await;
    let countries = EnrichedCollection::enrich(&boundaries, &table);
    let unmatched = countries.unmatched().count();
    if unmatched > 0 {
        info!("{unmatched} of {} countries have no rate record", countries.len());
    }

    let state = AppState {
        countries: Arc::new(countries),
        trends: Arc::new(trends),
        view: Arc::new(RwLock::new(GlobeState::new())),
        info_source: source,
        country_info_url: Arc::from(config.country_info_url.as_str()),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS]);

    let app = api::router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .map_err(|e| format!("failed to bind {}: {e}", config.addr))?;
    info!("taxglobe server listening on http://{}", config.addr);
    axum::serve(listener, app)
        .await
        .map_err(|e| format!("server error: {e}"))
}

/// `None` (after logging) when the file cannot be read; callers treat that
/// as empty input.
async fn read_text(path: &Path) -> Option<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Some(text),
        Err(err) => {
            warn!("failed to read {}: {err}", path.display());
            None
        }
    }
}
