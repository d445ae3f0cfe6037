//! Service layer: aggregation logic behind the dashboard routes.

pub mod dashboard;
