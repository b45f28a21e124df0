//! Report routes.
//!
//! Process the session's upload into a statement, show it, and hand out the PDF.
//! Downloading the PDF ends the session.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use crate::responses::ApiError;
use crate::{AppState, ReportSession, SessionReport};
use finansi_core::statement::StatementRenderer;
use finansi_core::storage::{StorageError, snapshot_key, upload_key};
use finansi_core::summary::{KindTotal, MonthlySummary, SummaryService};
use finansi_core::workbook::WorkbookParser;
use finansi_shared::AppError;
use finansi_shared::types::format_rupiah;

/// Content type of the statement download.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports", post(process_report))
        .route("/reports/current", get(get_current_report))
        .route("/reports/current/pdf", get(download_pdf))
}

// ============================================================================
// Response Types
// ============================================================================

/// The six statement amounts, raw or formatted.
#[derive(Debug, Serialize)]
pub struct StatementAmounts<T> {
    /// Modal.
    pub capital: T,
    /// Pendapatan.
    pub revenue: T,
    /// Beban Usaha.
    pub operating_expense: T,
    /// Beban Lain-lain.
    pub other_expense: T,
    /// Total Beban.
    pub total_expense: T,
    /// Laba Bersih.
    pub net_profit: T,
}

impl StatementAmounts<Decimal> {
    fn of(summary: &MonthlySummary) -> Self {
        Self {
            capital: summary.capital(),
            revenue: summary.revenue(),
            operating_expense: summary.operating_expense(),
            other_expense: summary.other_expense(),
            total_expense: summary.total_expense(),
            net_profit: summary.net_profit(),
        }
    }

    fn formatted(&self) -> StatementAmounts<String> {
        StatementAmounts {
            capital: format_rupiah(self.capital),
            revenue: format_rupiah(self.revenue),
            operating_expense: format_rupiah(self.operating_expense),
            other_expense: format_rupiah(self.other_expense),
            total_expense: format_rupiah(self.total_expense),
            net_profit: format_rupiah(self.net_profit),
        }
    }
}

/// Processed report as shown to the browser.
#[derive(Debug, Serialize)]
pub struct ReportView {
    /// Business name from the workbook.
    pub business_name: String,
    /// Statement month.
    pub month: String,
    /// Statement year.
    pub year: String,
    /// Amounts as decimal strings.
    pub amounts: StatementAmounts<Decimal>,
    /// Amounts as Rupiah text.
    pub formatted: StatementAmounts<String>,
    /// Chart totals per transaction label.
    pub chart: Vec<KindTotal>,
    /// Optional workbook columns that were absent.
    pub missing_columns: Vec<String>,
    /// When the report was generated (ISO 8601).
    pub generated_at: DateTime<Utc>,
}

impl ReportView {
    fn new(report: &SessionReport) -> Self {
        let summary = &report.summary;
        let amounts = StatementAmounts::of(summary);

        Self {
            business_name: summary.business_name().to_string(),
            month: summary.month().to_string(),
            year: summary.year().to_string(),
            formatted: amounts.formatted(),
            amounts,
            chart: report.chart.clone(),
            missing_columns: report.missing_columns.clone(),
            generated_at: report.generated_at,
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Runs CPU-bound work off the async workers.
async fn blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ApiError::from(AppError::Internal(e.to_string())))
}

/// The session's processed report, or `no_report`.
async fn current_report(
    state: &AppState,
    jar: &CookieJar,
) -> Result<(ReportSession, Arc<SessionReport>), ApiError> {
    let session = state
        .sessions
        .current(jar)
        .await
        .ok_or_else(ApiError::no_report)?;
    let report = session.report.clone().ok_or_else(ApiError::no_report)?;
    Ok((session, report))
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/reports`
/// Parse the uploaded workbook and build the monthly statement.
async fn process_report(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Response, ApiError> {
    let session = state
        .sessions
        .current(&jar)
        .await
        .ok_or_else(ApiError::no_upload)?;

    let bytes = match state.storage.read(&upload_key(session.id)).await {
        Ok(bytes) => bytes,
        Err(StorageError::NotFound(_)) => return Err(ApiError::no_upload()),
        Err(e) => return Err(e.into()),
    };

    let parsed = blocking(move || WorkbookParser::parse_bytes(&bytes))
        .await?
        .map_err(|e| {
            warn!(session_id = %session.id, error = %e, "Workbook could not be parsed");
            ApiError::from(e)
        })?;

    let summary =
        SummaryService::summarize(&parsed.rows, &parsed.business_name, &parsed.period_label)
            .map_err(|e| {
                warn!(session_id = %session.id, error = %e, "Workbook totals out of range");
                ApiError::from(e)
            })?;
    let chart = SummaryService::kind_breakdown(&parsed.rows)?;

    let snapshot = serde_json::to_vec(&parsed).map_err(|e| AppError::Internal(e.to_string()))?;
    state
        .storage
        .write(&snapshot_key(session.id), snapshot)
        .await?;

    let report = SessionReport {
        summary,
        chart,
        missing_columns: parsed.missing_columns,
        generated_at: Utc::now(),
    };
    let view = ReportView::new(&report);

    if !state.sessions.attach_report(&session, Arc::new(report)).await {
        warn!(session_id = %session.id, "Upload changed while the report was generated");
        return Err(ApiError::upload_changed());
    }

    info!(
        session_id = %session.id,
        rows = parsed.rows.len(),
        business_name = %view.business_name,
        "Report generated"
    );

    Ok((StatusCode::CREATED, Json(view)).into_response())
}

/// GET `/reports/current`
/// Show the processed report.
async fn get_current_report(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<ReportView>, ApiError> {
    let (_, report) = current_report(&state, &jar).await?;
    Ok(Json(ReportView::new(&report)))
}

/// GET `/reports/current/pdf`
/// Render the statement and end the session.
async fn download_pdf(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Response, ApiError> {
    let (session, report) = current_report(&state, &jar).await?;

    let summary = report.summary.clone();
    let pdf = blocking(move || {
        let mut pdf = Vec::new();
        StatementRenderer::render(&summary, &mut pdf).map(|()| pdf)
    })
    .await??;

    state.sessions.remove(session.id).await;
    for key in [upload_key(session.id), snapshot_key(session.id)] {
        if let Err(e) = state.storage.delete(&key).await {
            warn!(
                session_id = %session.id,
                key = %key,
                error = %e,
                "Failed to delete session file"
            );
        }
    }

    let file_name = StatementRenderer::file_name(&report.summary);
    info!(session_id = %session.id, file_name = %file_name, "Statement downloaded");

    Ok((
        StatusCode::OK,
        jar.remove(state.sessions.removal_cookie()),
        [
            (header::CONTENT_TYPE, PDF_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        pdf,
    )
        .into_response())
}
