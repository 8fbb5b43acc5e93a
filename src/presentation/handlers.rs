// HTTP request handlers
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

use crate::domain::dashboard::Dashboard;
use crate::domain::reading::NormalizedReading;
use crate::domain::report::DiagnosticReport;
use crate::domain::statistics::Granularity;

#[derive(Deserialize)]
pub struct ReadingsQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct DashboardQuery {
    pub granularity: Option<Granularity>,
    pub date: Option<NaiveDate>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Normalized readings for a collection, optionally for one calendar day
pub async fn get_readings(
    Path(collection): Path<String>,
    Query(query): Query<ReadingsQuery>,
    State(state): State<Arc<AppState>>,
) -> Json<Vec<NormalizedReading>> {
    match state.reading_service.get_readings(&collection, query.date).await {
        Ok(readings) => Json(readings),
        Err(e) => {
            tracing::error!(collection = %collection, error = %e, "failed to fetch readings");
            // Return empty list on error
            Json(Vec::new())
        }
    }
}

/// Aggregated dashboard for a collection
pub async fn get_dashboard(
    Path(collection): Path<String>,
    Query(query): Query<DashboardQuery>,
    State(state): State<Arc<AppState>>,
) -> Json<Dashboard> {
    let granularity = query.granularity.unwrap_or_default();
    let dashboard = state
        .dashboard_service
        .get_dashboard(&collection, granularity, query.date)
        .await;
    Json(dashboard)
}

/// Diagnostic report over the raw batch of a collection
pub async fn get_diagnostics(
    Path(collection): Path<String>,
    Query(query): Query<ReadingsQuery>,
    State(state): State<Arc<AppState>>,
) -> Json<DiagnosticReport> {
    let report = state
        .dashboard_service
        .get_diagnostics(&collection, query.date)
        .await;
    Json(report)
}
