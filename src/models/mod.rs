//! Database models and DTOs for the dashboard entities.

pub mod product_trend;
pub mod visitor_log;
