//! JSON error responses.
//!
//! Every failure leaves the API as `{"error": <code>, "message": <text>}`. Module
//! errors from the core crate pass through [`AppError`] first so the status code
//! is decided in one place.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use finansi_core::statement::StatementError;
use finansi_core::storage::StorageError;
use finansi_core::summary::SummaryError;
use finansi_core::workbook::WorkbookError;
use finansi_shared::AppError;

/// Error returned by route handlers.
#[derive(Debug)]
pub struct ApiError {
    code: &'static str,
    error: AppError,
}

impl ApiError {
    /// Error with an explicit machine-readable code.
    #[must_use]
    pub fn new(code: &'static str, error: AppError) -> Self {
        Self { code, error }
    }

    /// No file part in the upload.
    #[must_use]
    pub fn missing_file() -> Self {
        Self::new(
            "missing_file",
            AppError::Validation("Silakan pilih file transaksi terlebih dahulu.".into()),
        )
    }

    /// Upload is not an accepted spreadsheet type.
    #[must_use]
    pub fn unsupported_file_type() -> Self {
        Self::new(
            "unsupported_file_type",
            AppError::Validation("Format file tidak didukung. Unggah file Excel (.xlsx).".into()),
        )
    }

    /// Upload exceeds the configured size limit.
    #[must_use]
    pub fn file_too_large(max_bytes: u64) -> Self {
        Self::new(
            "file_too_large",
            AppError::Validation(format!(
                "Ukuran file melebihi batas maksimal ({max_bytes} byte)."
            )),
        )
    }

    /// The session has no uploaded workbook.
    #[must_use]
    pub fn no_upload() -> Self {
        Self::new(
            "no_upload",
            AppError::Validation("Tidak ada file yang diproses. Unggah ulang file Anda.".into()),
        )
    }

    /// The session was re-uploaded while its report was being generated.
    #[must_use]
    pub fn upload_changed() -> Self {
        Self::new(
            "upload_changed",
            AppError::Validation(
                "File transaksi berubah saat laporan dibuat. Proses ulang laporan Anda.".into(),
            ),
        )
    }

    /// The session has no processed report.
    #[must_use]
    pub fn no_report() -> Self {
        Self::new(
            "no_report",
            AppError::NotFound("Tidak ada laporan untuk diunduh.".into()),
        )
    }

    /// The input template is not on disk.
    #[must_use]
    pub fn template_not_found() -> Self {
        Self::new(
            "template_not_found",
            AppError::NotFound("File template tidak ditemukan.".into()),
        )
    }

    /// Machine-readable code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.error.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self::new(error.error_code(), error)
    }
}

impl From<WorkbookError> for ApiError {
    fn from(err: WorkbookError) -> Self {
        Self::new("parse_failed", AppError::Unprocessable(err.to_string()))
    }
}

impl From<SummaryError> for ApiError {
    fn from(err: SummaryError) -> Self {
        Self::new(
            "amount_out_of_range",
            AppError::Unprocessable(format!(
                "Jumlah transaksi terlalu besar untuk diproses ({err})."
            )),
        )
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err.to_string()).into()
    }
}

impl From<StatementError> for ApiError {
    fn from(err: StatementError) -> Self {
        AppError::Internal(err.to_string()).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Server-side details stay in the log.
        let message = if status.is_server_error() {
            error!(code = self.code, error = %self.error, "Request failed");
            "Terjadi kesalahan pada server."
        } else {
            self.error.message()
        };

        (
            status,
            Json(json!({
                "error": self.code,
                "message": message
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use rstest::rstest;

    async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    #[rstest]
    #[case(ApiError::missing_file(), StatusCode::BAD_REQUEST, "missing_file")]
    #[case(ApiError::unsupported_file_type(), StatusCode::BAD_REQUEST, "unsupported_file_type")]
    #[case(ApiError::file_too_large(1024), StatusCode::BAD_REQUEST, "file_too_large")]
    #[case(ApiError::no_upload(), StatusCode::BAD_REQUEST, "no_upload")]
    #[case(ApiError::upload_changed(), StatusCode::BAD_REQUEST, "upload_changed")]
    #[case(ApiError::no_report(), StatusCode::NOT_FOUND, "no_report")]
    #[case(ApiError::template_not_found(), StatusCode::NOT_FOUND, "template_not_found")]
    fn test_named_errors(
        #[case] error: ApiError,
        #[case] status: StatusCode,
        #[case] code: &str,
    ) {
        assert_eq!(error.status(), status);
        assert_eq!(error.code(), code);
    }

    #[test]
    fn test_workbook_error_is_unprocessable() {
        let error = ApiError::from(WorkbookError::MissingTableHeader);
        assert_eq!(error.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(error.code(), "parse_failed");
    }

    #[test]
    fn test_summary_overflow_is_unprocessable() {
        let error = ApiError::from(SummaryError::AmountOutOfRange("Pendapatan"));
        assert_eq!(error.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(error.code(), "amount_out_of_range");
    }

    #[rstest]
    #[case(AppError::Validation(String::new()))]
    #[case(AppError::NotFound(String::new()))]
    #[case(AppError::Internal(String::new()))]
    fn test_generic_code_comes_from_app_error(#[case] error: AppError) {
        let expected = error.error_code();
        assert_eq!(ApiError::from(error).code(), expected);
    }

    #[test]
    fn test_storage_error_is_server_error() {
        let error = ApiError::from(StorageError::Backend("disk full".into()));
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.code(), "storage_error");
    }

    #[tokio::test]
    async fn test_client_error_body_carries_message() {
        let (status, body) = body_json(ApiError::from(WorkbookError::MissingTableHeader)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "parse_failed");
        assert_eq!(body["message"], "transaction table header not found");
    }

    #[tokio::test]
    async fn test_server_error_body_hides_details() {
        let (status, body) =
            body_json(ApiError::from(AppError::Internal("stack trace".into()))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "internal_error");
        assert_eq!(body["message"], "Terjadi kesalahan pada server.");
    }
}
