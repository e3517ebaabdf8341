use std::path::PathBuf;
use std::time::Duration;

pub const DEVICES_JSON: &str = "devices.json";
pub const BUILDS_JSON: &str = "builds.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub builds_dir: PathBuf,
    pub static_dir: PathBuf,
    pub download_base_url: String,
    pub changelog_base_url: String,
    pub upstream_timeout: Option<Duration>,
    pub log_level: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            data_dir: PathBuf::from(std::env::var("DATA_DIR").unwrap_or_else(|_| ".".into())),
            builds_dir: PathBuf::from(
                std::env::var("BUILDS_DIRECTORY").unwrap_or_else(|_| "/mnt/builds".into()),
            ),
            static_dir: PathBuf::from(std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".into())),
            download_base_url: std::env::var("DOWNLOAD_BASE_URL")
                .unwrap_or_else(|_| "https://get.aosip.dev".into()),
            changelog_base_url: std::env::var("CHANGELOG_BASE_URL").unwrap_or_else(|_| {
                "https://raw.githubusercontent.com/AOSiP-Devices/Updater-Stuff/master".into()
            }),
            upstream_timeout: timeout_from_secs(
                std::env::var("UPSTREAM_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(30),
            ),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
        }
    }

    /// Configuration rooted at `data_dir`, with every other value at its default.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 0,
            data_dir: data_dir.into(),
            builds_dir: PathBuf::from("/mnt/builds"),
            static_dir: PathBuf::from("static"),
            download_base_url: "https://get.aosip.dev".into(),
            changelog_base_url: "https://raw.githubusercontent.com/AOSiP-Devices/Updater-Stuff/master"
                .into(),
            upstream_timeout: timeout_from_secs(30),
            log_level: "info".into(),
        }
    }

    pub fn devices_path(&self) -> PathBuf {
        self.data_dir.join(DEVICES_JSON)
    }

    pub fn builds_path(&self) -> PathBuf {
        self.data_dir.join(BUILDS_JSON)
    }
}

// 0 means no timeout at all
fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
