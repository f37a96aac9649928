use axum::Router;
use mosaic::server::HostState;
use mosaic::server::router::host_router;
use tower_http::trace::TraceLayer;

pub(crate) fn init(state: HostState) -> Router {
    host_router(&state).layer(TraceLayer::new_for_http()).with_state(state)
}
