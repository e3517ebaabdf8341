use crate::error::AppError;
use crate::models::build::{first_of_type, OtaRelease};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct OtaResponse {
    pub response: Vec<OtaRelease>,
}

/// GET /{device}/{romtype} - OTA check used by the on-device updater
///
/// Answers with the first build of `romtype` in manifest order, or an empty
/// list when the device is not in the directory or has no such build.
pub async fn latest_build(
    State(state): State<Arc<AppState>>,
    Path((device, romtype)): Path<(String, String)>,
) -> Result<Json<OtaResponse>, AppError> {
    let devices = state.catalog.devices().await?;
    if !devices.contains_key(&device) {
        tracing::debug!(%device, "OTA check for unknown device");
        return Ok(Json(OtaResponse { response: Vec::new() }));
    }

    let manifest = state.catalog.builds().await?;
    let release = manifest
        .get(&device)
        .and_then(|builds| first_of_type(builds, &romtype))
        .map(|build| OtaRelease::from_build(build, &state.config.download_base_url))
        .transpose()?;

    Ok(Json(OtaResponse {
        response: release.into_iter().collect(),
    }))
}
