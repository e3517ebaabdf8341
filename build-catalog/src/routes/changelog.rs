use crate::services::changelog::to_html;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::Html;
use minijinja::HtmlEscape;
use std::sync::Arc;

// Upstream failures are reported as text with a 200 status, which is what the
// updater app expects to display.
const FETCH_FAILED: &str = "Fetching changelog failed!";

/// GET /changelog - global changelog
pub async fn global(State(state): State<Arc<AppState>>) -> Html<String> {
    match state.changelog.global().await {
        Ok(text) => Html(to_html(&text)),
        Err(_) => Html(FETCH_FAILED.to_string()),
    }
}

/// GET /changelog/{device} - global changelog followed by the device one
pub async fn device(
    State(state): State<Arc<AppState>>,
    Path(device): Path<String>,
) -> Html<String> {
    let global = match state.changelog.global().await {
        Ok(text) => text,
        Err(_) => return Html(FETCH_FAILED.to_string()),
    };
    match state.changelog.device(&device).await {
        Ok(device_log) => Html(to_html(&format!("{}\n{}", global, device_log))),
        Err(_) => Html(format!("Fetching changelog for {} failed!", HtmlEscape(&device))),
    }
}
