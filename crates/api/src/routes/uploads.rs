//! Workbook upload route.

use axum::{
    Json, Router,
    extract::{
        DefaultBodyLimit, Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use axum_extra::extract::cookie::CookieJar;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::responses::ApiError;
use crate::{AppState, ReportSession};
use finansi_core::storage::{sanitize_filename, snapshot_key, upload_key};
use finansi_shared::config::UploadConfig;

/// Multipart field carrying the workbook.
pub const FILE_FIELD: &str = "file";

/// Allowance for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD: u64 = 16 * 1024;

/// Creates the upload routes.
pub fn routes(upload: &UploadConfig) -> Router<AppState> {
    let body_limit = usize::try_from(request_limit(upload)).unwrap_or(usize::MAX);

    Router::new()
        .route("/uploads", post(upload_workbook))
        .layer(DefaultBodyLimit::max(body_limit))
}

fn request_limit(upload: &UploadConfig) -> u64 {
    upload.max_size_bytes.saturating_add(MULTIPART_OVERHEAD)
}

/// Response for an accepted upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Sanitized name of the stored file.
    pub file_name: String,
    /// Size of the stored file in bytes.
    pub size_bytes: usize,
    /// Upload time (ISO 8601).
    pub uploaded_at: DateTime<Utc>,
}

/// POST `/uploads`
/// Store a workbook and bind the browser to a fresh report session.
async fn upload_workbook(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let max = state.upload.max_size_bytes;

    if content_length(&headers).is_some_and(|len| len > request_limit(&state.upload)) {
        return Err(ApiError::file_too_large(max));
    }

    let mut multipart = multipart.map_err(|_| ApiError::missing_file())?;
    let (file_name, bytes) = read_file_field(&mut multipart, max).await?;

    if !state.upload.is_extension_allowed(&file_name) {
        return Err(ApiError::unsupported_file_type());
    }
    if u64::try_from(bytes.len()).unwrap_or(u64::MAX) > max {
        return Err(ApiError::file_too_large(max));
    }

    // A re-upload restarts the browser's existing session.
    let session_id = state
        .sessions
        .current(&jar)
        .await
        .map_or_else(Uuid::new_v4, |session| session.id);
    let size_bytes = bytes.len();

    state
        .storage
        .write(&upload_key(session_id), bytes.to_vec())
        .await?;
    state.storage.delete(&snapshot_key(session_id)).await?;

    let session = ReportSession::new(session_id, sanitize_filename(&file_name));
    let response = UploadResponse {
        file_name: session.file_name.clone(),
        size_bytes,
        uploaded_at: session.uploaded_at,
    };
    state.sessions.put(session).await;

    info!(
        session_id = %session_id,
        file_name = %response.file_name,
        size_bytes,
        "Workbook uploaded"
    );

    Ok((
        StatusCode::CREATED,
        jar.add(state.sessions.cookie(session_id)),
        Json(response),
    )
        .into_response())
}

fn content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

/// Finds the file part and reads it whole. Other parts are skipped.
async fn read_file_field(
    multipart: &mut Multipart,
    max: u64,
) -> Result<(String, Bytes), ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&e, max))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().trim().to_string();
        if file_name.is_empty() {
            return Err(ApiError::missing_file());
        }

        let bytes = field.bytes().await.map_err(|e| multipart_error(&e, max))?;
        return Ok((file_name, bytes));
    }

    Err(ApiError::missing_file())
}

fn multipart_error(err: &MultipartError, max: u64) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::file_too_large(max)
    } else {
        warn!(error = %err, "Malformed multipart upload");
        ApiError::missing_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AppState, create_router, test_support::memory_state};
    use axum::{body::Body, http::Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    const BOUNDARY: &str = "finansi-test-boundary";

    fn multipart_body(field: &str, file_name: &str, content: &[u8]) -> Vec<u8> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn upload_request(body: Vec<u8>, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/api/v1/uploads")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            );
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body)).unwrap()
    }

    async fn error_code(response: Response) -> String {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        json["error"].as_str().unwrap().to_string()
    }

    fn session_cookie(response: &Response) -> String {
        let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    fn cookie_session_id(cookie: &str) -> Uuid {
        Uuid::parse_str(cookie.split_once('=').unwrap().1).unwrap()
    }

    #[tokio::test]
    async fn test_upload_creates_session_and_stores_file() {
        let state = memory_state();
        let app = create_router(state.clone());

        let response = app
            .oneshot(upload_request(
                multipart_body("file", "transaksi januari.xlsx", b"PK\x03\x04data"),
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let cookie = session_cookie(&response);
        assert!(cookie.starts_with("finansi_session="));
        let session_id = cookie_session_id(&cookie);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["file_name"], "transaksi_januari.xlsx");
        assert_eq!(json["size_bytes"], 8);

        let session = state.sessions.get(session_id).await.expect("live session");
        assert!(session.report.is_none());
        assert_eq!(
            state.storage.read(&upload_key(session_id)).await.unwrap(),
            b"PK\x03\x04data"
        );
    }

    #[tokio::test]
    async fn test_reupload_reuses_session_and_drops_snapshot() {
        let state = memory_state();
        let first = create_router(state.clone())
            .oneshot(upload_request(
                multipart_body("file", "a.xlsx", b"first"),
                None,
            ))
            .await
            .unwrap();
        let cookie = session_cookie(&first);
        let session_id = cookie_session_id(&cookie);

        state
            .storage
            .write(&snapshot_key(session_id), b"{}".to_vec())
            .await
            .unwrap();

        let second = create_router(state.clone())
            .oneshot(upload_request(
                multipart_body("file", "b.xlsx", b"second"),
                Some(&cookie),
            ))
            .await
            .unwrap();

        assert_eq!(second.status(), StatusCode::CREATED);
        assert_eq!(cookie_session_id(&session_cookie(&second)), session_id);
        assert_eq!(
            state.storage.read(&upload_key(session_id)).await.unwrap(),
            b"second"
        );
        assert!(!state.storage.exists(&snapshot_key(session_id)).await);
    }

    #[tokio::test]
    async fn test_missing_file_field() {
        let app = create_router(memory_state());
        let response = app
            .oneshot(upload_request(
                multipart_body("attachment", "a.xlsx", b"data"),
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_code(response).await, "missing_file");
    }

    #[tokio::test]
    async fn test_empty_file_name() {
        let app = create_router(memory_state());
        let response = app
            .oneshot(upload_request(multipart_body("file", "", b""), None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_code(response).await, "missing_file");
    }

    #[tokio::test]
    async fn test_not_multipart() {
        let app = create_router(memory_state());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/uploads")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_code(response).await, "missing_file");
    }

    #[tokio::test]
    async fn test_unsupported_file_type() {
        let app = create_router(memory_state());
        let response = app
            .oneshot(upload_request(
                multipart_body("file", "transaksi.csv", b"a,b"),
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_code(response).await, "unsupported_file_type");
    }

    fn small_limit_state() -> AppState {
        let mut state = memory_state();
        state.upload = std::sync::Arc::new(UploadConfig {
            max_size_bytes: 16,
            ..UploadConfig::default()
        });
        state
    }

    #[tokio::test]
    async fn test_file_over_limit() {
        let state = small_limit_state();
        let app = create_router(state.clone());

        let response = app
            .oneshot(upload_request(
                multipart_body("file", "besar.xlsx", &[0u8; 17]),
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_code(response).await, "file_too_large");
    }

    #[tokio::test]
    async fn test_content_length_over_limit() {
        let app = create_router(memory_state());
        let body = multipart_body("file", "a.xlsx", b"data");

        let mut request = upload_request(body, None);
        request
            .headers_mut()
            .insert(header::CONTENT_LENGTH, "104857600".parse().unwrap());

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_code(response).await, "file_too_large");
    }
}
