// src/handlers/summary.rs
use chrono::NaiveDate;
use log::{info, warn};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use super::error::ApiError;
use crate::models::DateRange;
use crate::services::cpa::{records_in_range, summarize};
use crate::services::report::{build_insight, format_count, format_currency, format_signed};
use crate::services::store::DatasetStore;

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub target_cpa: f64,
}

/// One CPA run: summary numbers, card views, filtered rows for the table,
/// the dual-axis chart series, and the insight block.
pub async fn get_summary(query: SummaryQuery, store: Arc<DatasetStore>) -> Result<Json, Rejection> {
    info!(
        "Handling CPA summary request: {} to {}, target {}",
        query.start, query.end, query.target_cpa
    );

    // The aggregator treats a negative target as a caller bug; this is the
    // input boundary that keeps it out.
    if query.target_cpa < 0.0 {
        warn!("Rejecting negative target CPA: {}", query.target_cpa);
        return Err(warp::reject::custom(ApiError::bad_request(
            "target_cpa must not be negative",
        )));
    }
    if query.start > query.end {
        warn!(
            "Start {} is after end {}; the window selects nothing",
            query.start, query.end
        );
    }

    let range = DateRange::new(query.start, query.end);
    let summary = summarize(store.records(), &range, query.target_cpa);
    let rows = records_in_range(store.records(), &range);
    let insight = build_insight(&summary);

    let actual_card = json!({
        "label": "Actual CPA",
        "value": summary.actual_cpa.map(format_currency),
        "subtext": match summary.cpa_delta {
            Some(delta) => format!("{} vs target", format_signed(delta)),
            None => "no conversions in this period".to_string(),
        },
        "good": summary.is_good(),
    });
    let target_card = json!({
        "label": "Target CPA",
        "value": format_currency(summary.target_cpa),
        "subtext": "efficiency goal",
        "good": null,
    });
    let volume_card = json!({
        "label": "Conversion Volume",
        "value": format_count(summary.total_conversions),
        "subtext": format!("{} conversions in period", format_count(summary.total_conversions)),
        "good": true,
    });

    let series = json!({
        "dates": rows.iter().map(|r| r.date).collect::<Vec<_>>(),
        "costs": rows.iter().map(|r| r.cost).collect::<Vec<_>>(),
        "conversions": rows.iter().map(|r| r.conversions).collect::<Vec<_>>(),
    });

    Ok(warp::reply::json(&json!({
        "summary": summary,
        "cards": [actual_card, target_card, volume_card],
        "rows": rows,
        "series": series,
        "insight": insight,
    })))
}
