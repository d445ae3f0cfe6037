//! Dashboard routes: aggregated product and visitor statistics.

use axum::{
    extract::{Query, State},
    Json,
};

use crate::errors::{ApiResponse, AppError};
use crate::services::dashboard::{
    self, ProductSummary, SummaryFilter, SummaryQuery, VisitorSummary,
};
use crate::AppState;

/// GET /products — per-product view/purchase totals and conversion rates.
pub async fn products(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<ApiResponse<Vec<ProductSummary>>>, AppError> {
    let filter = SummaryFilter::from_query(&query)?;
    let summaries = dashboard::product_summary(state.store.as_ref(), &filter).await?;
    Ok(ApiResponse::success(summaries))
}

/// GET /visitors — visit totals, distinct sessions, and breakdowns.
pub async fn visitors(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<ApiResponse<VisitorSummary>>, AppError> {
    let filter = SummaryFilter::from_query(&query)?;
    let summary = dashboard::visitor_summary(state.store.as_ref(), &filter).await?;
    Ok(ApiResponse::success(summary))
}
