use crate::error::AppError;
use crate::models::build::available_downloads;
use crate::models::device::DeviceInfo;
use crate::models::filename::{format_build_date, latest_build_dates};
use crate::state::AppState;
use crate::templates::{DEVICE_PAGE, INDEX_PAGE};
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Response};
use minijinja::context;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
struct IndexEntry {
    codename: String,
    name: String,
    build_date: Option<String>,
}

#[derive(Debug, Serialize)]
struct DownloadEntry {
    kind: String,
    filename: String,
    url: String,
}

/// GET / - every known device with the date of its newest build
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let manifest = state.catalog.builds().await?;
    let mut devices = state.catalog.devices().await?;

    let latest = latest_build_dates(
        manifest
            .values()
            .flatten()
            .map(|build| build.filename.as_str()),
    )?;

    // Codenames with builds but no directory entry are listed under their codename
    for codename in latest.keys() {
        if !devices.contains_key(codename) {
            devices.insert(codename.clone(), codename.clone());
        }
    }

    let mut entries = Vec::with_capacity(devices.len());
    for (codename, name) in devices {
        let build_date = match latest.get(&codename) {
            Some(date) => Some(format_build_date(date)?),
            None => None,
        };
        entries.push(IndexEntry {
            codename,
            name,
            build_date,
        });
    }

    let html = state
        .templates
        .get_template(INDEX_PAGE)?
        .render(context! { devices => entries })?;
    Ok(Html(html))
}

/// GET /{target_device} - download page for one device
pub async fn device(
    State(state): State<Arc<AppState>>,
    Path(target_device): Path<String>,
) -> Result<Response, AppError> {
    let manifest = state.catalog.builds().await?;
    let Some(builds) = manifest.get(&target_device) else {
        tracing::debug!(device = %target_device, "No builds in manifest");
        return Ok(format!("There isn't any build for {} available here!", target_device).into_response());
    };

    let base_url = &state.config.download_base_url;
    let files: Vec<DownloadEntry> = available_downloads(builds)
        .into_iter()
        .map(|(kind, file)| DownloadEntry {
            url: file.download_url(base_url),
            kind,
            filename: file.filename,
        })
        .collect();

    let records = state.catalog.device_records().await?;
    let info = DeviceInfo::resolve(&records, &target_device);

    let html = state
        .templates
        .get_template(DEVICE_PAGE)?
        .render(context! { device => info, files => files })?;
    Ok(Html(html).into_response())
}
