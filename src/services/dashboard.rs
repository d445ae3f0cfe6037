//! Dashboard aggregation: summary statistics over product trends and
//! visitor logs.
//!
//! Each operation is a single read-compute-respond cycle: fetch rows through
//! the store port, aggregate in memory, return the summary. No state is
//! retained between calls.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::product_trend::ProductTrend;
use crate::models::visitor_log::VisitorLog;
use crate::store::DashboardStore;

/// Raw query-string parameters for the summary endpoints. All optional;
/// absent parameters mean "all rows, no limit".
#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<String>,
}

/// Validated date-range / result-count filter.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SummaryFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: Option<usize>,
}

impl SummaryFilter {
    /// Parse and validate raw query parameters. Empty strings are treated
    /// as absent.
    pub fn from_query(query: &SummaryQuery) -> Result<Self, AppError> {
        let from = parse_date("from", query.from.as_deref())?;
        let to = parse_date("to", query.to.as_deref())?;

        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(AppError::Validation(format!(
                    "'from' ({from}) must not be after 'to' ({to})"
                )));
            }
        }

        let limit = match query.limit.as_deref().filter(|s| !s.is_empty()) {
            None => None,
            Some(raw) => {
                let n: usize = raw.parse().map_err(|_| {
                    AppError::Validation(format!("Invalid 'limit' value: '{raw}'"))
                })?;
                if n == 0 {
                    return Err(AppError::Validation(
                        "'limit' must be at least 1".to_string(),
                    ));
                }
                Some(n)
            }
        };

        Ok(Self { from, to, limit })
    }

    fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

fn parse_date(name: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match raw.filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<NaiveDate>()
            .map(Some)
            .map_err(|_| AppError::Validation(format!("Invalid '{name}' date: '{raw}'"))),
    }
}

/// Per-product totals across all trend rows.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductSummary {
    pub product_id: String,
    pub total_views: i64,
    pub total_purchases: i64,
    pub conversion_rate: f64,
}

/// Site-wide visitor statistics.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VisitorSummary {
    pub total: i64,
    pub distinct_sessions: i64,
    pub by_country: BTreeMap<String, i64>,
    pub by_path: BTreeMap<String, i64>,
}

/// GET /products — per-product totals and conversion rates.
pub async fn product_summary(
    store: &dyn DashboardStore,
    filter: &SummaryFilter,
) -> Result<Vec<ProductSummary>, AppError> {
    let rows = store.list_product_trends().await?;
    Ok(summarize_products(&rows, filter))
}

/// GET /visitors — total, distinct sessions, and breakdowns.
pub async fn visitor_summary(
    store: &dyn DashboardStore,
    filter: &SummaryFilter,
) -> Result<VisitorSummary, AppError> {
    let rows = store.list_visitor_logs().await?;
    Ok(summarize_visitors(&rows, filter))
}

/// Group trend rows by product and compute totals. Ordered by total views
/// descending, ties broken by product id ascending. The limit truncates
/// the summary list (top-N products), not the input rows.
pub fn summarize_products(rows: &[ProductTrend], filter: &SummaryFilter) -> Vec<ProductSummary> {
    let mut totals: BTreeMap<&str, (i64, i64)> = BTreeMap::new();
    for row in rows.iter().filter(|r| filter.contains(r.date)) {
        let entry = totals.entry(&row.product_id).or_default();
        entry.0 += i64::from(row.views);
        entry.1 += i64::from(row.purchases);
    }

    let mut summaries: Vec<ProductSummary> = totals
        .into_iter()
        .map(|(product_id, (views, purchases))| ProductSummary {
            product_id: product_id.to_string(),
            total_views: views,
            total_purchases: purchases,
            conversion_rate: conversion_rate(purchases, views),
        })
        .collect();

    // BTreeMap iteration already yields product_id ascending, so a stable
    // sort on views descending preserves the id tie-break.
    summaries.sort_by(|a, b| b.total_views.cmp(&a.total_views));

    if let Some(limit) = filter.limit {
        summaries.truncate(limit);
    }
    summaries
}

/// Purchases over views, defined as 0 when there are no views.
fn conversion_rate(purchases: i64, views: i64) -> f64 {
    if views == 0 {
        0.0
    } else {
        purchases as f64 / views as f64
    }
}

/// Count visits, distinct sessions, and per-country / per-path breakdowns.
/// The limit truncates each breakdown to its N highest-count entries; total
/// and distinct session counts are unaffected.
pub fn summarize_visitors(rows: &[VisitorLog], filter: &SummaryFilter) -> VisitorSummary {
    let mut total = 0i64;
    let mut sessions: HashSet<&str> = HashSet::new();
    let mut by_country: BTreeMap<String, i64> = BTreeMap::new();
    let mut by_path: BTreeMap<String, i64> = BTreeMap::new();

    for row in rows
        .iter()
        .filter(|r| filter.contains(r.created_at.date_naive()))
    {
        total += 1;
        sessions.insert(&row.session_id);
        *by_country.entry(row.country.clone()).or_default() += 1;
        *by_path.entry(row.path.clone()).or_default() += 1;
    }

    if let Some(limit) = filter.limit {
        by_country = top_n(by_country, limit);
        by_path = top_n(by_path, limit);
    }

    VisitorSummary {
        total,
        distinct_sessions: sessions.len() as i64,
        by_country,
        by_path,
    }
}

/// Keep the `n` highest-count entries of a breakdown, lowest keys winning
/// ties so the result is deterministic.
fn top_n(counts: BTreeMap<String, i64>, n: usize) -> BTreeMap<String, i64> {
    let mut entries: Vec<(String, i64)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(n);
    entries.into_iter().collect()
}
