//! Fixtures shared by the unit tests.

use axum::routing::get;
use axum::Router;
use std::path::Path;

/// Serve a fake changelog repository on an ephemeral port and return its base URL.
/// Paths without a body answer 404.
pub async fn spawn_upstream(global: Option<&str>, devices: &[(&str, &str)]) -> String {
    let mut app = Router::new();
    if let Some(body) = global {
        let body = body.to_string();
        app = app.route("/changelog", get(move || async move { body }));
    }
    for (device, body) in devices {
        let body = body.to_string();
        app = app.route(&format!("/{device}/changelog"), get(move || async move { body }));
    }

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

pub const DEVICES_JSON: &str = r#"[
    {"codename": "beryllium", "device": "Poco F1", "xda": "https://forum.xda-developers.com/poco-f1", "maintainer": "ada"},
    {"codename": "whyred", "device": "Redmi Note 5 Pro"},
    {"codename": "lavender", "device": "Redmi Note 7"}
]"#;

pub const BUILDS_JSON: &str = r#"{
    "beryllium": [
        {
            "filename": "AOSiP-10-Official-beryllium-20200214.zip",
            "type": "official", "version": "10", "date": "2020-02-14T08:30:00",
            "sha256": "sha-official-new", "filepath": "/beryllium/", "size": 734003200,
            "fastboot_images": true, "boot_image": true
        },
        {
            "filename": "AOSiP-10-Gapps-beryllium-20200101.zip",
            "type": "gapps", "version": "10", "date": "2020-01-01T10:00:00Z",
            "sha256": "sha-gapps", "filepath": "/beryllium/", "size": 1073741824
        },
        {
            "filename": "AOSiP-10-Official-beryllium-20200101.zip",
            "type": "official", "version": "10", "date": "2020-01-01T10:00:00",
            "sha256": "sha-official-old", "filepath": "/beryllium/", "size": 734003200
        }
    ],
    "whyred": [
        {
            "filename": "AOSiP-9.0-Unofficial-whyred-20191130.zip",
            "type": "unofficial", "version": "9.0", "date": "2019-11-30",
            "sha256": "sha-whyred", "filepath": "/whyred/", "size": 1
        }
    ],
    "olive": [
        {
            "filename": "AOSiP-10-Official-olive-20200310.zip",
            "type": "official", "version": "10", "date": "2020-03-10",
            "sha256": "sha-olive", "filepath": "/olive/", "size": 2
        }
    ]
}"#;

/// Write the sample device directory and manifest into `dir`.
pub fn write_manifests(dir: &Path) {
    std::fs::write(dir.join("devices.json"), DEVICES_JSON).unwrap();
    std::fs::write(dir.join("builds.json"), BUILDS_JSON).unwrap();
}
