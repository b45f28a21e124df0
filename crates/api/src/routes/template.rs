//! Input template download.

use axum::{
    Router,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::warn;

use crate::AppState;
use crate::responses::ApiError;
use finansi_core::storage::sanitize_filename;
use finansi_shared::AppError;

/// Content type of `.xlsx` workbooks.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Creates the template routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/template", get(download_template))
}

/// GET `/template`
/// Serve the blank transaction workbook.
async fn download_template(State(state): State<AppState>) -> Result<Response, ApiError> {
    let path = state.template_path.as_path();

    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "Template workbook not found");
            return Err(ApiError::template_not_found());
        }
        Err(e) => return Err(AppError::Internal(e.to_string()).into()),
    };

    let file_name = path
        .file_name()
        .map_or_else(|| "template.xlsx".to_string(), |name| {
            sanitize_filename(&name.to_string_lossy())
        });

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_router, test_support::memory_state};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tower::ServiceExt;
    use uuid::Uuid;

    fn get_template() -> Request<Body> {
        Request::builder()
            .uri("/api/v1/template")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_template_served_as_attachment() {
        let path = std::env::temp_dir().join(format!("Template_{}.xlsx", Uuid::new_v4()));
        tokio::fs::write(&path, b"PK\x03\x04template").await.unwrap();

        let mut state = memory_state();
        state.template_path = Arc::new(path.clone());

        let response = create_router(state).oneshot(get_template()).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            XLSX_CONTENT_TYPE
        );
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment; filename=\"Template_"));

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"PK\x03\x04template");
    }

    #[tokio::test]
    async fn test_missing_template_returns_404() {
        let mut state = memory_state();
        state.template_path = Arc::new(PathBuf::from("does/not/exist.xlsx"));

        let response = create_router(state).oneshot(get_template()).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "template_not_found");
    }
}
