// src/bin/test_summary.rs
use cpa_dashboard_srg::models::DateRange;
use cpa_dashboard_srg::services::cpa::summarize;
use cpa_dashboard_srg::services::dataset::{DatasetProvider, StaticProvider};
use cpa_dashboard_srg::services::report::{build_insight, format_count, format_currency};
use cpa_dashboard_srg::BoxError;

fn main() -> Result<(), BoxError> {
    let records = StaticProvider.load()?;
    let first = records.first().ok_or("dataset is empty")?;
    let last = records.last().ok_or("dataset is empty")?;
    let range = DateRange::new(first.date, last.date);

    let summary = summarize(&records, &range, 5.0);
    let insight = build_insight(&summary);

    println!("Window:            {} to {}", range.start, range.end);
    println!("Total cost:        {}", format_currency(summary.total_cost));
    println!("Total conversions: {}", format_count(summary.total_conversions));
    println!("Actual CPA:        {:?}", summary.actual_cpa);
    println!("Target CPA:        {}", format_currency(summary.target_cpa));
    println!("Delta:             {:?}", summary.cpa_delta);
    println!("Over/under:        {:?}", summary.over_under_pct);
    println!("Insight:           {} {}", insight.headline, insight.detail);
    Ok(())
}
