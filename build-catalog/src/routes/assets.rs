use crate::error::AppError;
use crate::state::AppState;
use axum::extract::{Request, State};
use axum::http::Uri;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::services::ServeDir;

/// GET /static/{*path} - stylesheet and other assets from the static directory
///
/// Only paths below `/static/` are served, so `/static` on its own is still a
/// device page.
pub async fn static_file(
    State(state): State<Arc<AppState>>,
    mut request: Request,
) -> Result<Response, AppError> {
    let path = request
        .uri()
        .path()
        .strip_prefix("/static")
        .unwrap_or("/")
        .to_string();
    *request.uri_mut() = Uri::try_from(path).map_err(anyhow::Error::from)?;

    match ServeDir::new(&state.config.static_dir).oneshot(request).await {
        Ok(resp) => Ok(resp.into_response()),
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use crate::config::AppConfig;
    use crate::routes::create_router;
    use crate::state::AppState;
    use crate::test_support::write_manifests;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;

    async fn call(dir: &TempDir, uri: &str) -> (StatusCode, String) {
        let mut config = AppConfig::with_data_dir(dir.path());
        config.static_dir = dir.path().join("assets");
        let state = Arc::new(AppState::new(config).unwrap());

        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = create_router(state).oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        write_manifests(dir.path());
        std::fs::create_dir(dir.path().join("assets")).unwrap();
        std::fs::write(dir.path().join("assets/style.css"), "body { margin: 0; }").unwrap();
        dir
    }

    #[tokio::test]
    async fn test_serves_files_below_static() {
        let dir = fixture();
        let (status, body) = call(&dir, "/static/style.css").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "body { margin: 0; }");

        let (status, _) = call(&dir, "/static/missing.css").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_bare_static_is_a_device_page() {
        let dir = fixture();
        let (status, body) = call(&dir, "/static").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "There isn't any build for static available here!");
    }
}
