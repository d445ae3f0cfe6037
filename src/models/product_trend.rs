//! Daily product trend entries: views and purchases per product per day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One day of view/purchase counts for a product. Append-only;
/// purchases <= views is expected but not enforced.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProductTrend {
    pub id: Uuid,
    pub product_id: String,
    pub date: NaiveDate,
    pub views: i32,
    pub purchases: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_trend_serialization() {
        let row = ProductTrend {
            id: Uuid::nil(),
            product_id: "prod-1".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            views: 120,
            purchases: 5,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["product_id"], "prod-1");
        assert_eq!(json["date"], "2025-09-01");
        assert_eq!(json["views"], 120);
    }
}
