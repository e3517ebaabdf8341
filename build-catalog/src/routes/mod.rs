pub mod assets;
pub mod changelog;
pub mod ota;
pub mod pages;

use crate::state::AppState;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/changelog", get(changelog::global))
        .route("/changelog/{device}", get(changelog::device))
        .route("/static/{*path}", get(assets::static_file))
        .route("/{target_device}", get(pages::device))
        .route("/{device}/{romtype}", get(ota::latest_build))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
