//! Per-browser report sessions.
//!
//! A session is created by an upload and lives in an in-memory Moka cache keyed by
//! a random UUID. The browser only holds that UUID in a cookie. When a session
//! expires or is evicted, its stored upload and snapshot are deleted with it.

use std::future;
use std::sync::Arc;
use std::time::Duration;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Utc};
use moka::Entry;
use moka::future::Cache;
use moka::notification::{ListenerFuture, RemovalCause};
use moka::ops::compute::{CompResult, Op};
use tracing::{debug, warn};
use uuid::Uuid;

use finansi_core::storage::{StorageService, snapshot_key, upload_key};
use finansi_core::summary::{KindTotal, MonthlySummary};
use finansi_shared::config::SessionConfig;

/// Result of processing the session's upload.
#[derive(Debug, Clone)]
pub struct SessionReport {
    /// Aggregated monthly statement.
    pub summary: MonthlySummary,
    /// Totals per canonical transaction label.
    pub chart: Vec<KindTotal>,
    /// Optional workbook columns that were absent.
    pub missing_columns: Vec<String>,
    /// When the upload was processed.
    pub generated_at: DateTime<Utc>,
}

/// State held for one browser between requests.
#[derive(Debug, Clone)]
pub struct ReportSession {
    /// Session identifier, also the storage key stem.
    pub id: Uuid,
    /// Sanitized name of the uploaded file.
    pub file_name: String,
    /// When the workbook was uploaded.
    pub uploaded_at: DateTime<Utc>,
    /// Present once the upload has been processed.
    pub report: Option<Arc<SessionReport>>,
}

impl ReportSession {
    /// A fresh session for a just-uploaded workbook.
    #[must_use]
    pub fn new(id: Uuid, file_name: impl Into<String>) -> Self {
        Self {
            id,
            file_name: file_name.into(),
            uploaded_at: Utc::now(),
            report: None,
        }
    }
}

/// Concurrent session store with idle expiry and a capacity bound.
#[derive(Clone)]
pub struct SessionStore {
    cache: Cache<Uuid, ReportSession>,
    cookie_name: Arc<str>,
}

impl SessionStore {
    /// Creates a store from session configuration.
    ///
    /// Sessions dropped for idleness or capacity take their files in `storage` with
    /// them. Explicit removals and replacements leave the files to the caller.
    #[must_use]
    pub fn new(config: &SessionConfig, storage: Arc<StorageService>) -> Self {
        let cache: Cache<Uuid, ReportSession> = Cache::builder()
            .max_capacity(config.max_sessions)
            .time_to_idle(Duration::from_secs(config.ttl_secs))
            .async_eviction_listener(
                move |id: Arc<Uuid>, _, cause: RemovalCause| -> ListenerFuture {
                    let storage = Arc::clone(&storage);
                    Box::pin(async move {
                        if cause.was_evicted() {
                            delete_session_files(&storage, *id, cause).await;
                        }
                    })
                },
            )
            .build();

        Self {
            cache,
            cookie_name: Arc::from(config.cookie_name.as_str()),
        }
    }

    /// Looks up a live session.
    pub async fn get(&self, id: Uuid) -> Option<ReportSession> {
        self.cache.get(&id).await
    }

    /// Inserts or replaces a session.
    pub async fn put(&self, session: ReportSession) {
        self.cache.insert(session.id, session).await;
    }

    /// Stores `report` on the session it was built for.
    ///
    /// Returns false, leaving the store untouched, when that session has since been
    /// replaced by a newer upload or has expired.
    pub async fn attach_report(
        &self,
        session: &ReportSession,
        report: Arc<SessionReport>,
    ) -> bool {
        let uploaded_at = session.uploaded_at;

        let result = self
            .cache
            .entry(session.id)
            .and_compute_with(|current| {
                let op = match current.map(Entry::into_value) {
                    Some(live) if live.uploaded_at == uploaded_at => Op::Put(ReportSession {
                        report: Some(report),
                        ..live
                    }),
                    _ => Op::Nop,
                };
                future::ready(op)
            })
            .await;

        matches!(result, CompResult::ReplacedWith(_))
    }

    /// Removes a session, returning it if it was live.
    pub async fn remove(&self, id: Uuid) -> Option<ReportSession> {
        self.cache.remove(&id).await
    }

    /// Session referenced by the request cookie, if it is still live.
    pub async fn current(&self, jar: &CookieJar) -> Option<ReportSession> {
        let id = self.session_id(jar)?;
        self.get(id).await
    }

    /// Session id carried by the request cookie, live or not.
    #[must_use]
    pub fn session_id(&self, jar: &CookieJar) -> Option<Uuid> {
        jar.get(&self.cookie_name)
            .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
    }

    /// Cookie that binds the browser to `id`.
    #[must_use]
    pub fn cookie(&self, id: Uuid) -> Cookie<'static> {
        Cookie::build((self.cookie_name.to_string(), id.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build()
    }

    /// Cookie that clears the binding.
    #[must_use]
    pub fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build((self.cookie_name.to_string(), "")).path("/").build()
    }
}

async fn delete_session_files(storage: &StorageService, id: Uuid, cause: RemovalCause) {
    for key in [upload_key(id), snapshot_key(id)] {
        if let Err(e) = storage.delete(&key).await {
            warn!(
                session_id = %id,
                key = %key,
                error = %e,
                "Failed to delete expired session file"
            );
        }
    }
    debug!(session_id = %id, cause = ?cause, "Session files removed");
}
