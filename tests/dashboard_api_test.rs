//! Integration tests for the dashboard API surface.
//!
//! The router is exercised end-to-end with `tower::ServiceExt::oneshot`
//! against an in-memory store implementation — no database required.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use trenddash::errors::AppError;
use trenddash::models::product_trend::ProductTrend;
use trenddash::models::visitor_log::VisitorLog;
use trenddash::store::DashboardStore;
use trenddash::AppState;

/// In-memory store holding the seed fixture rows.
struct MemoryStore {
    trends: Vec<ProductTrend>,
    logs: Vec<VisitorLog>,
}

#[async_trait]
impl DashboardStore for MemoryStore {
    async fn list_product_trends(&self) -> Result<Vec<ProductTrend>, AppError> {
        Ok(self.trends.clone())
    }

    async fn list_visitor_logs(&self) -> Result<Vec<VisitorLog>, AppError> {
        Ok(self.logs.clone())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Store whose every query fails, for error-path tests.
struct BrokenStore;

#[async_trait]
impl DashboardStore for BrokenStore {
    async fn list_product_trends(&self) -> Result<Vec<ProductTrend>, AppError> {
        Err(AppError::Store(sqlx::Error::PoolClosed))
    }

    async fn list_visitor_logs(&self) -> Result<Vec<VisitorLog>, AppError> {
        Err(AppError::Store(sqlx::Error::PoolClosed))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(AppError::Store(sqlx::Error::PoolClosed))
    }
}

fn trend(product_id: &str, date: &str, views: i32, purchases: i32) -> ProductTrend {
    ProductTrend {
        id: Uuid::new_v4(),
        product_id: product_id.to_string(),
        date: date.parse().unwrap(),
        views,
        purchases,
    }
}

fn visit(session_id: &str, path: &str, country: &str, created_at: &str) -> VisitorLog {
    VisitorLog {
        id: Uuid::new_v4(),
        session_id: session_id.to_string(),
        ip: "192.168.1.1".to_string(),
        user_agent: "Chrome".to_string(),
        path: path.to_string(),
        country: country.to_string(),
        created_at: created_at.parse::<DateTime<Utc>>().unwrap(),
    }
}

fn seeded_router() -> axum::Router {
    let store = MemoryStore {
        trends: vec![
            trend("prod-1", "2025-08-28", 50, 2),
            trend("prod-1", "2025-09-01", 120, 5),
            trend("prod-1", "2025-09-05", 80, 3),
            trend("prod-2", "2025-08-30", 30, 1),
            trend("prod-2", "2025-09-02", 90, 4),
            trend("prod-2", "2025-09-06", 60, 2),
        ],
        logs: vec![
            visit("sess-1", "/products", "US", "2025-09-01T10:00:00Z"),
            visit("sess-1", "/cart", "US", "2025-09-01T10:05:00Z"),
            visit("sess-2", "/products", "US", "2025-09-02T12:00:00Z"),
            visit("sess-3", "/home", "CA", "2025-09-03T14:00:00Z"),
            visit("sess-4", "/products", "US", "2025-09-04T16:00:00Z"),
            visit("sess-5", "/checkout", "UK", "2025-09-05T18:00:00Z"),
            visit("sess-6", "/products", "US", "2025-09-06T20:00:00Z"),
            visit("sess-7", "/home", "CA", "2025-09-07T22:00:00Z"),
        ],
    };
    trenddash::routes::router(AppState {
        store: Arc::new(store),
    })
}

fn broken_router() -> axum::Router {
    trenddash::routes::router(AppState {
        store: Arc::new(BrokenStore),
    })
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn products_returns_seed_summaries() {
    let (status, json) = get_json(seeded_router(), "/products").await;
    assert_eq!(status, StatusCode::OK);

    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);

    assert_eq!(data[0]["product_id"], "prod-1");
    assert_eq!(data[0]["total_views"], 250);
    assert_eq!(data[0]["total_purchases"], 10);
    assert_eq!(data[0]["conversion_rate"], 0.04);

    assert_eq!(data[1]["product_id"], "prod-2");
    assert_eq!(data[1]["total_views"], 180);
    assert_eq!(data[1]["total_purchases"], 7);
}

#[tokio::test]
async fn visitors_returns_seed_summary() {
    let (status, json) = get_json(seeded_router(), "/visitors").await;
    assert_eq!(status, StatusCode::OK);

    let data = &json["data"];
    assert_eq!(data["total"], 8);
    assert_eq!(data["distinct_sessions"], 7);
    assert_eq!(data["by_country"]["US"], 5);
    assert_eq!(data["by_country"]["CA"], 2);
    assert_eq!(data["by_country"]["UK"], 1);
    assert_eq!(data["by_path"]["/products"], 4);
    assert_eq!(data["by_path"]["/cart"], 1);
    assert_eq!(data["by_path"]["/home"], 2);
    assert_eq!(data["by_path"]["/checkout"], 1);
}

#[tokio::test]
async fn products_accepts_range_and_limit() {
    let (status, json) =
        get_json(seeded_router(), "/products?from=2025-09-01&to=2025-09-05&limit=1").await;
    assert_eq!(status, StatusCode::OK);

    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["product_id"], "prod-1");
    assert_eq!(data[0]["total_views"], 200);
}

#[tokio::test]
async fn malformed_date_is_bad_request() {
    let (status, json) = get_json(seeded_router(), "/products?from=yesterday").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn store_failure_is_service_unavailable() {
    let (status, json) = get_json(broken_router(), "/visitors").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["error"]["code"], "STORE_UNAVAILABLE");
    assert!(json["data"].is_null());
}

#[tokio::test]
async fn health_live_is_ok() {
    let response = seeded_router()
        .oneshot(
            Request::builder()
                .uri("/health/live")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn health_ready_reports_store_status() {
    let (status, json) = get_json(seeded_router(), "/health/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["store"], "connected");
}
