use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use compute::{EnrichedCollection, Framing, TrendSeries};
use formats::TrendRecord;
use layers::{legend, PolygonStyle};
use parking_lot::RwLock;
use scene::{CameraMove, FeatureIndex, GlobeState, ViewSnapshot};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::sources::{lookup_flag, JsonSource};

#[derive(Clone)]
pub struct AppState {
    pub countries: Arc<EnrichedCollection>,
    pub trends: Arc<Vec<TrendRecord>>,
    pub view: Arc<RwLock<GlobeState>>,
    pub info_source: Arc<dyn JsonSource>,
    pub country_info_url: Arc<str>,
}

impl AppState {
    fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot::capture(&self.view.read(), &self.countries, &self.trends)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/countries", get(get_countries))
        .route("/styles", get(get_styles))
        .route("/legend", get(get_legend))
        .route("/countries/:name/frame", get(get_frame))
        .route("/countries/:name/trend", get(get_trend))
        .route("/countries/:name/flag", get(get_flag))
        .route("/view", get(get_view))
        .route("/view/hover", post(post_hover))
        .route("/view/click", post(post_click))
        .route("/view/close", post(post_close))
        .with_state(state)
}

fn api_error(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": message.into() })))
}

fn unknown_country(name: &str) -> Response {
    api_error(StatusCode::NOT_FOUND, format!("unknown country: {name}")).into_response()
}

async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

async fn get_countries(State(state): State<AppState>) -> Json<Value> {
    Json(state.countries.to_geojson_value())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FeatureStyle {
    name: String,
    #[serde(flatten)]
    style: PolygonStyle,
}

async fn get_styles(State(state): State<AppState>) -> Json<Value> {
    let view = state.view.read();
    let styles: Vec<FeatureStyle> = state
        .countries
        .features
        .iter()
        .enumerate()
        .map(|(i, f)| FeatureStyle {
            name: f.name().to_string(),
            style: view.style_for(i, f),
        })
        .collect();
    Json(json!({
        "styles": styles,
        "sideColor": layers::SIDE_COLOR,
        "strokeColor": layers::STROKE_COLOR,
    }))
}

async fn get_legend() -> Json<Value> {
    Json(json!({ "entries": legend() }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FrameResponse {
    name: String,
    framing: Framing,
    camera: CameraMove,
}

async fn get_frame(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    let Some(feature) = state.countries.find_by_name(&name) else {
        return unknown_country(&name);
    };
    let framing = feature.framing();
    Json(FrameResponse {
        name: feature.name().to_string(),
        framing,
        camera: CameraMove::focus(framing),
    })
    .into_response()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TrendResponse {
    #[serde(flatten)]
    series: TrendSeries,
    year_extent: Option<(i32, i32)>,
    rate_domain: (f64, f64),
}

async fn get_trend(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    let Some(feature) = state.countries.find_by_name(&name) else {
        return unknown_country(&name);
    };
    let series = TrendSeries::select(feature.name(), &state.trends);
    Json(TrendResponse {
        year_extent: series.year_extent(),
        rate_domain: series.rate_domain(),
        series,
    })
    .into_response()
}

async fn get_flag(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    let Some(feature) = state.countries.find_by_name(&name) else {
        return unknown_country(&name);
    };
    let flag = lookup_flag(
        state.info_source.as_ref(),
        &state.country_info_url,
        feature.name(),
    )
    .await;
    Json(json!({ "name": feature.name(), "flagUrl": flag })).into_response()
}

async fn get_view(State(state): State<AppState>) -> Json<ViewSnapshot> {
    Json(state.snapshot())
}

#[derive(Debug, Deserialize)]
pub struct HoverRequest {
    /// `None` clears the hover.
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ClickRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InteractionResponse {
    camera: Option<CameraMove>,
    view: ViewSnapshot,
}

async fn post_hover(State(state): State<AppState>, Json(req): Json<HoverRequest>) -> Response {
    match req.name {
        None => state.view.write().clear_hover(),
        Some(name) => {
            let Some(index) = state.countries.position_by_name(&name) else {
                return unknown_country(&name);
            };
            state.view.write().hover(index);
        }
    }
    Json(state.snapshot()).into_response()
}

async fn post_click(State(state): State<AppState>, Json(req): Json<ClickRequest>) -> Response {
    let Some(index) = state.countries.position_by_name(&req.name) else {
        return unknown_country(&req.name);
    };
    let feature = &state.countries.features[index];
    let (camera, selected) = {
        let mut view = state.view.write();
        let camera = view.click(index, feature);
        (camera, view.selected() == Some(index))
    };
    if selected {
        refresh_flag(state.clone(), index).await;
    }
    Json(InteractionResponse {
        camera: Some(camera),
        view: state.snapshot(),
    })
    .into_response()
}

async fn post_close(State(state): State<AppState>) -> Json<InteractionResponse> {
    let camera = state.view.write().close();
    Json(InteractionResponse {
        camera,
        view: state.snapshot(),
    })
}

/// Looks up the flag for a freshly selected feature and records it unless
/// the selection has moved on in the meantime.
async fn refresh_flag(state: AppState, index: FeatureIndex) {
    let Some(feature) = state.countries.features.get(index) else {
        return;
    };
    let flag = lookup_flag(
        state.info_source.as_ref(),
        &state.country_info_url,
        feature.name(),
    )
    .await;
    if !state.view.write().set_flag(index, flag) {
        debug!("discarding flag for {}: selection changed", feature.name());
    }
}
