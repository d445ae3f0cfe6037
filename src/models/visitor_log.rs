//! Visitor log entries: one row per page-visit event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A single page-visit event. Append-only, immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VisitorLog {
    pub id: Uuid,
    pub session_id: String,
    pub ip: String,
    pub user_agent: String,
    pub path: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
}
