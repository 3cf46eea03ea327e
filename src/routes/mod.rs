use std::sync::Arc;

use axum::Router;

use crate::FreshnessCache;

mod conditions;
mod health;

// ---

/// Build the application router around a shared cache.
pub fn router(cache: Arc<FreshnessCache>) -> Router {
    // ---
    Router::new()
        .merge(conditions::router())
        .merge(health::router())
        .with_state(cache)
}
