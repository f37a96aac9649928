use super::state::HostState;
use crate::dashboard::{self, NavItem};
use crate::routes::RouteTable;
use crate::{robots, sitemap};
use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, header};
use axum::response::IntoResponse;
use mosaic_domain::module::ModuleConfig;
use serde::Serialize;

const XML: &str = "application/xml; charset=utf-8";
const TEXT: &str = "text/plain; charset=utf-8";

pub(super) async fn sitemap_handler(
    State(state): State<HostState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let origin = state.origin_for(&headers);
    let entries = state.sitemap.build(&state.platform.registries().sitemap, &origin).await;

    (
        [
            (header::CONTENT_TYPE, XML.to_owned()),
            (header::CACHE_CONTROL, state.sitemap_cache_control.clone()),
        ],
        sitemap::to_xml(&entries),
    )
}

pub(super) async fn robots_handler(
    State(state): State<HostState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let origin = state.origin_for(&headers);
    let groups = state
        .robots
        .build(&state.platform.registries().robots, &origin, &state.config.robots.host_defaults)
        .await;

    ([(header::CONTENT_TYPE, TEXT)], robots::to_text(&groups, &origin))
}

pub(super) async fn navigation_handler(State(state): State<HostState>) -> Json<Vec<NavItem>> {
    Json(dashboard::navigation(
        &state.platform.registries().dashboard,
        &state.config.site.dashboard_base,
    ))
}

pub(super) async fn routes_handler(State(state): State<HostState>) -> Json<RouteTable> {
    Json(state.platform.routes().clone())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ModulesResponse {
    modules: Vec<ModuleConfig>,
    excluded: Vec<ExcludedResponse>,
}

#[derive(Debug, Serialize)]
struct ExcludedResponse {
    source: &'static str,
    reason: String,
}

pub(super) async fn modules_handler(State(state): State<HostState>) -> Json<ModulesResponse> {
    Json(ModulesResponse {
        modules: state.platform.modules().to_vec(),
        excluded: state
            .platform
            .excluded()
            .iter()
            .map(|e| ExcludedResponse { source: e.source, reason: e.error.to_string() })
            .collect(),
    })
}
