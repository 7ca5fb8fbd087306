//! HTTP API for document classification.
//!
//! - `POST /classify_file`: multipart upload in the `file` field, answers
//!   `{"file_class": "<result>"}`
//! - `GET /health`: liveness and model status

mod handlers;
pub mod rate_limit;
mod routes;

pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use doclassify::config::Settings;
use doclassify_analysis::Pipeline;

use rate_limit::{InMemoryRateLimiter, RateLimitBackend};

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub limiter: Arc<dyn RateLimitBackend>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(settings: &Settings, pipeline: Pipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            limiter: Arc::new(InMemoryRateLimiter::per_minute(
                settings.rate_limit_per_minute,
            )),
            max_upload_bytes: settings.max_upload_bytes,
        }
    }
}

/// Start the web server.
pub async fn serve(
    settings: &Settings,
    pipeline: Pipeline,
    host: &str,
    port: u16,
) -> anyhow::Result<()> {
    let state = AppState::new(settings, pipeline);
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use doclassify::model::ModelHandle;
    use doclassify_analysis::ExtractorRegistry;

    const BOUNDARY: &str = "doclassify-test-boundary";

    fn test_state(limit: u32, max_upload_bytes: usize) -> AppState {
        let pipeline = Pipeline::new(
            ExtractorRegistry::with_defaults("eng"),
            ModelHandle::unavailable("not trained"),
        );
        AppState {
            pipeline: Arc::new(pipeline),
            limiter: Arc::new(InMemoryRateLimiter::per_minute(limit)),
            max_upload_bytes,
        }
    }

    fn setup_test_app() -> axum::Router {
        create_router(test_state(100, 5 * 1024 * 1024))
    }

    /// Multipart body with one field. `filename` of `None` sends a plain form field.
    fn multipart_request(field: &str, filename: Option<&str>, content: &[u8]) -> Request<Body> {
        let disposition = match filename {
            Some(name) => format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                field, name
            ),
            None => format!("Content-Disposition: form-data; name=\"{}\"\r\n", field),
        };

        let mut body = Vec::new();
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

        Request::builder()
            .method("POST")
            .uri("/classify_file")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = setup_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["model_loaded"], false);
    }

    #[tokio::test]
    async fn test_classify_txt_invoice() {
        let app = setup_test_app();

        let response = app
            .oneshot(multipart_request(
                "file",
                Some("x.txt"),
                b"Invoice #123, amount due $40",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["file_class"], "invoice");
    }

    #[tokio::test]
    async fn test_classify_unknown() {
        let app = setup_test_app();

        let response = app
            .oneshot(multipart_request("file", Some("notes.txt"), b"lorem ipsum"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["file_class"], "unknown_file");
    }

    #[tokio::test]
    async fn test_missing_file_part() {
        let app = setup_test_app();

        let response = app
            .oneshot(multipart_request("document", Some("x.txt"), b"invoice"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["error"],
            "No file part in the request"
        );
    }

    #[tokio::test]
    async fn test_file_field_without_filename_is_not_a_file_part() {
        let app = setup_test_app();

        let response = app
            .oneshot(multipart_request("file", None, b"invoice"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["error"],
            "No file part in the request"
        );
    }

    #[tokio::test]
    async fn test_not_multipart() {
        let app = setup_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/classify_file")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["error"],
            "No file part in the request"
        );
    }

    #[tokio::test]
    async fn test_empty_filename() {
        let app = setup_test_app();

        let response = app
            .oneshot(multipart_request("file", Some(""), b"invoice"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "No selected file");
    }

    #[tokio::test]
    async fn test_disallowed_extension() {
        let app = setup_test_app();

        let response = app
            .oneshot(multipart_request("file", Some("malware.exe"), b"MZ"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "File type not allowed");
    }

    #[tokio::test]
    async fn test_upload_too_large() {
        let app = create_router(test_state(100, 256));
        let content = vec![b'a'; 4096];

        let response = app
            .oneshot(multipart_request("file", Some("big.txt"), &content))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let app = create_router(test_state(2, 5 * 1024 * 1024));

        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(multipart_request("file", Some("x.txt"), b"invoice"))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app
            .clone()
            .oneshot(multipart_request("file", Some("x.txt"), b"invoice"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(response.headers().contains_key(header::RETRY_AFTER));

        // Health is not rate limited
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
