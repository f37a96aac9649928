use super::handlers;
use super::health;
use super::state::HostState;
use crate::robots::SITEMAP_PATH;
use axum::Router;
use axum::routing::get;
use tracing::info;

pub const ROBOTS_PATH: &str = "/robots.txt";

/// Health and diagnostics, always mounted.
pub fn system_router<S>() -> Router<S>
where
    S: Send + Sync + Clone + 'static,
{
    Router::<S>::new().route("/health", get(health::health_handler))
}

/// Host endpoints for `state`'s platform.
///
/// `sitemap.xml` and `robots.txt` are served only while their fallback
/// survived route composition.
pub fn host_router(state: &HostState) -> Router<HostState> {
    let routes = state.platform.routes();
    let mut router = Router::new()
        .route("/api/navigation", get(handlers::navigation_handler))
        .route("/api/routes", get(handlers::routes_handler))
        .route("/api/modules", get(handlers::modules_handler))
        .merge(system_router());

    if routes.includes_fallback(SITEMAP_PATH) {
        router = router.route(SITEMAP_PATH, get(handlers::sitemap_handler));
    } else {
        info!(path = SITEMAP_PATH, "Host endpoint disabled: path claimed by a module");
    }
    if routes.includes_fallback(ROBOTS_PATH) {
        router = router.route(ROBOTS_PATH, get(handlers::robots_handler));
    } else {
        info!(path = ROBOTS_PATH, "Host endpoint disabled: path claimed by a module");
    }
    router
}
