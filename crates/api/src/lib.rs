//! HTTP API layer with Axum routes and session handling.
//!
//! This crate provides:
//! - REST API routes for the upload → process → view → download workflow
//! - Cookie-keyed report sessions
//! - JSON error responses

pub mod responses;
pub mod routes;
pub mod session;

use axum::Router;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use finansi_core::storage::StorageService;
use finansi_shared::AppConfig;
use finansi_shared::config::UploadConfig;

pub use session::{ReportSession, SessionReport, SessionStore};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Storage for uploaded workbooks and their snapshots.
    pub storage: Arc<StorageService>,
    /// Live report sessions.
    pub sessions: SessionStore,
    /// Upload limits.
    pub upload: Arc<UploadConfig>,
    /// Blank input workbook offered for download.
    pub template_path: Arc<PathBuf>,
}

impl AppState {
    /// Builds the state from loaded configuration and a ready storage service.
    #[must_use]
    pub fn new(config: &AppConfig, storage: StorageService) -> Self {
        let storage = Arc::new(storage);
        Self {
            sessions: SessionStore::new(&config.session, Arc::clone(&storage)),
            storage,
            upload: Arc::new(config.upload.clone()),
            template_path: Arc::new(config.template.workbook_path.clone()),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes(&state))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
