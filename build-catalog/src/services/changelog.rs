//! Changelog passthrough from the upstream updater repository.

use std::time::Duration;

use reqwest::StatusCode;
use tracing::warn;

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("'{0}' is not a device codename")]
    InvalidDevice(String),

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: StatusCode },

    #[error("{url} could not be reached: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, Clone)]
pub struct ChangelogClient {
    client: reqwest::Client,
    base_url: String,
}

impl ChangelogClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("build-catalog/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn global_url(&self) -> String {
        format!("{}/changelog", self.base_url)
    }

    pub fn device_url(&self, device: &str) -> String {
        format!("{}/{}/changelog", self.base_url, device)
    }

    /// Single GET, no retries. Returns the status and body whatever the status is.
    pub async fn fetch(&self, url: &str) -> Result<(StatusCode, String), FetchError> {
        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };
        let resp = self.client.get(url).send().await.map_err(transport)?;
        let status = resp.status();
        let body = resp.text().await.map_err(transport)?;
        tracing::debug!(%url, %status, bytes = body.len(), "Fetched changelog");
        Ok((status, body))
    }

    /// Body of `url`, treating anything but 200 as a failure.
    pub async fn fetch_ok(&self, url: &str) -> Result<String, FetchError> {
        let (status, body) = self.fetch(url).await?;
        if status != StatusCode::OK {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }
        Ok(body)
    }

    pub async fn global(&self) -> Result<String, FetchError> {
        let url = self.global_url();
        self.fetch_ok(&url).await.inspect_err(|e| warn!("Changelog fetch failed: {}", e))
    }

    pub async fn device(&self, device: &str) -> Result<String, FetchError> {
        if !is_path_safe(device) {
            warn!("Refusing changelog fetch for device {:?}", device);
            return Err(FetchError::InvalidDevice(device.to_string()));
        }
        let url = self.device_url(device);
        self.fetch_ok(&url)
            .await
            .inspect_err(|e| warn!("Changelog fetch for {} failed: {}", device, e))
    }
}

// The codename becomes one segment of the upstream path and must not escape it.
fn is_path_safe(device: &str) -> bool {
    !device.is_empty()
        && device != "."
        && device != ".."
        && !device.contains(['/', '\\', '?', '#', '%'])
}

/// Line breaks become `<br>` so the text renders as-is in a browser.
pub fn to_html(text: &str) -> String {
    text.replace('\n', "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_upstream;

    #[test]
    fn test_to_html() {
        assert_eq!(to_html("- fixed wifi\n- new kernel\n"), "- fixed wifi<br>- new kernel<br>");
        assert_eq!(to_html("no breaks"), "no breaks");
    }

    #[test]
    fn test_urls() {
        let client = ChangelogClient::new("https://raw.example/updater/master/", None).unwrap();
        assert_eq!(client.global_url(), "https://raw.example/updater/master/changelog");
        assert_eq!(
            client.device_url("whyred"),
            "https://raw.example/updater/master/whyred/changelog"
        );
    }

    #[tokio::test]
    async fn test_fetch_reports_status_and_body() {
        let base = spawn_upstream(Some("global"), &[]).await;
        let client = ChangelogClient::new(&base, None).unwrap();

        let (status, body) = client.fetch(&client.global_url()).await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "global");

        let (status, _) = client.fetch(&client.device_url("whyred")).await.unwrap();
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_device_log() {
        let base = spawn_upstream(Some("global"), &[("whyred", "c")]).await;
        let client = ChangelogClient::new(&base, None).unwrap();
        assert_eq!(client.device("whyred").await.unwrap(), "c");
    }

    #[tokio::test]
    async fn test_missing_device_log_is_status_error() {
        let base = spawn_upstream(Some("global"), &[]).await;
        let client = ChangelogClient::new(&base, None).unwrap();
        let err = client.device("whyred").await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status, .. } if status == StatusCode::NOT_FOUND));
        assert!(err.to_string().contains("/whyred/changelog"));
    }

    #[tokio::test]
    async fn test_device_cannot_leave_its_directory() {
        // Anything reaching the upstream would be served by this fake
        let base = spawn_upstream(Some("global"), &[("whyred", "c")]).await;
        let client = ChangelogClient::new(&base, None).unwrap();

        for device in ["..", ".", "", "whyred/..", "x?y=", "x#frag", "..%2Fchangelog", "a\\b"] {
            let err = client.device(device).await.unwrap_err();
            assert!(matches!(err, FetchError::InvalidDevice(_)), "{device}");
        }
        assert!(client.device("whyred").await.is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_transport_error() {
        // Bind then drop to get a port nobody listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ChangelogClient::new(&format!("http://{addr}"), Some(Duration::from_secs(5))).unwrap();
        let err = client.global().await.unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
    }
}
