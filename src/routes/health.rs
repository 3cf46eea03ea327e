// src/routes/health.rs
//! Liveness endpoint for the rowing conditions service.
//!
//! Answers `GET /health` without consulting the cache or either upstream
//! provider, so it stays green while the river or weather feed is down.
//! Follows the Explicit Module Boundary Pattern (EMBP): the handler is
//! private, the gateway (`mod.rs`) only sees the subrouter.

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// JSON response body for the `/health` endpoint.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Handle `GET /health`.
///
/// Returns a static JSON object. Upstream availability is reported by
/// `/api/conditions` (503), not here.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Create a subrouter containing the `/health` route.
///
/// Generic over the state type so it merges with the gateway router
/// whatever state the other routes carry (`Arc<FreshnessCache>` today).
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health))
}
