//! `POST /classify_file`.

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tokio::task::JoinError;
use tracing::{error, info, warn, Instrument};
use uuid::Uuid;

use doclassify::utils::is_supported_extension;
use doclassify::{ClassificationResult, UploadedDocument};

use super::api_types::{bad_request, ClassifyResponse, ErrorResponse};
use crate::AppState;

/// Multipart field carrying the upload.
const FILE_FIELD: &str = "file";

/// Classify the file uploaded in the `file` multipart field.
pub async fn classify_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("classify_file", %request_id);
    handle_upload(state, multipart).instrument(span).await
}

async fn handle_upload(
    state: AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let mut multipart = match multipart {
        Ok(m) => m,
        Err(e) => {
            warn!("Rejected upload: {}", e);
            return bad_request("No file part in the request").into_response();
        }
    };

    let (filename, content) = loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return bad_request("No file part in the request").into_response(),
            Err(e) => return multipart_error(e).into_response(),
        };
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        // A `file` field without a filename parameter is a plain form value.
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        if filename.is_empty() {
            return bad_request("No selected file").into_response();
        }
        match field.bytes().await {
            Ok(bytes) => break (filename, bytes),
            Err(e) => return multipart_error(e).into_response(),
        }
    };

    let allowed = doclassify::utils::file_extension(&filename)
        .map(|ext| is_supported_extension(&ext))
        .unwrap_or(false);
    if !allowed {
        info!("Rejected '{}': file type not allowed", filename);
        return bad_request("File type not allowed").into_response();
    }

    let document = UploadedDocument::new(filename.clone(), content.to_vec());
    let pipeline = Arc::clone(&state.pipeline);
    let span = tracing::Span::current();
    let result = tokio::task::spawn_blocking(move || {
        let _entered = span.enter();
        pipeline.classify(&document)
    })
    .await;

    let file_class = settle(result, &filename);
    info!("Classified '{}' as {}", filename, file_class);
    Json(ClassifyResponse { file_class }).into_response()
}

/// A classification task that died still answers with a result string.
fn settle(
    result: Result<ClassificationResult, JoinError>,
    filename: &str,
) -> ClassificationResult {
    result.unwrap_or_else(|e| {
        error!("Classification task for '{}' failed: {}", filename, e);
        ClassificationResult::ClassificationError
    })
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> impl IntoResponse {
    let status = e.status();
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        warn!("Upload exceeds size limit: {}", e);
        ErrorResponse::with_status(status, "File too large")
    } else {
        warn!("Malformed multipart body: {}", e);
        ErrorResponse::with_status(StatusCode::BAD_REQUEST, "Malformed multipart body")
    }
}
