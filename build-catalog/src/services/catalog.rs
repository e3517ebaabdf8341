//! Loads the device directory and build manifest from disk.
//!
//! Both files are re-read on every call so that a redeployed manifest shows
//! up on the next request without a restart.

use crate::config::AppConfig;
use crate::models::build::BuildManifest;
use crate::models::device::Device;
use anyhow::Context;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Catalog {
    devices_path: PathBuf,
    builds_path: PathBuf,
}

impl Catalog {
    pub fn new(devices_path: impl Into<PathBuf>, builds_path: impl Into<PathBuf>) -> Self {
        Self {
            devices_path: devices_path.into(),
            builds_path: builds_path.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.devices_path(), config.builds_path())
    }

    /// Every record of `devices.json`, in file order.
    pub async fn device_records(&self) -> anyhow::Result<Vec<Device>> {
        let path = self.devices_path.clone();
        tokio::task::spawn_blocking(move || read_json::<Vec<Device>>(&path))
            .await
            .map_err(|e| anyhow::anyhow!(e))?
    }

    /// Codename to display name.
    pub async fn devices(&self) -> anyhow::Result<IndexMap<String, String>> {
        let records = self.device_records().await?;
        Ok(crate::models::device::display_names(&records))
    }

    /// The full `builds.json` manifest.
    pub async fn builds(&self) -> anyhow::Result<BuildManifest> {
        let path = self.builds_path.clone();
        tokio::task::spawn_blocking(move || read_json::<BuildManifest>(&path))
            .await
            .map_err(|e| anyhow::anyhow!(e))?
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "Loaded manifest");
    Ok(value)
}
