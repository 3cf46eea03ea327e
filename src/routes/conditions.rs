use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use tracing::{debug, info};

use crate::{report, AppError, ConditionsReport, FreshnessCache};

// ---

pub fn router() -> Router<Arc<FreshnessCache>> {
    // ---
    Router::new().route("/api/conditions", get(handler))
}

async fn handler(
    State(cache): State<Arc<FreshnessCache>>,
) -> Result<Json<ConditionsReport>, AppError> {
    // ---
    debug!("GET /api/conditions - refreshing expired readings");
    cache.ensure_fresh().await;

    let snapshot = cache.snapshot().await;
    let report = report::build(&snapshot, Utc::now())?;

    info!(
        "GET /api/conditions - flow={} temp={} gust={}",
        report.data.river_flow, report.data.temperature, report.data.wind_speed
    );
    for (category, result) in &report.conditions {
        debug!("  {:<24}: {}", category.label(), result.overall.label());
    }
    Ok(Json(report))
}
