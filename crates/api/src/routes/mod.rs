//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod health;
pub mod reports;
pub mod template;
pub mod uploads;

/// Creates the API router with all routes.
///
/// Takes the state so the upload body limit follows the configured maximum.
pub fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(template::routes())
        .merge(uploads::routes(&state.upload))
        .merge(reports::routes())
}
