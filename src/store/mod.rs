//! Query store port: a narrow read interface over the two dashboard tables.
//!
//! Handlers and services depend on [`DashboardStore`] rather than on a pool
//! directly, so the aggregation layer is testable against an in-memory
//! implementation without a live database.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::product_trend::ProductTrend;
use crate::models::visitor_log::VisitorLog;

/// Read operations the dashboard needs from the query store.
#[async_trait]
pub trait DashboardStore: Send + Sync {
    /// Fetch all product trend rows.
    async fn list_product_trends(&self) -> Result<Vec<ProductTrend>, AppError>;

    /// Fetch all visitor log rows.
    async fn list_visitor_logs(&self) -> Result<Vec<VisitorLog>, AppError>;

    /// Cheap connectivity check for the readiness probe.
    async fn ping(&self) -> Result<(), AppError>;
}

/// PostgreSQL-backed store over a sqlx connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DashboardStore for PgStore {
    async fn list_product_trends(&self) -> Result<Vec<ProductTrend>, AppError> {
        let rows = sqlx::query_as::<_, ProductTrend>(
            "SELECT id, product_id, date, views, purchases
             FROM product_trends
             ORDER BY product_id, date",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_visitor_logs(&self) -> Result<Vec<VisitorLog>, AppError> {
        let rows = sqlx::query_as::<_, VisitorLog>(
            "SELECT id, session_id, ip, user_agent, path, country, created_at
             FROM visitor_logs
             ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
