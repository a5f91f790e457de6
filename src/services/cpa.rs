// src/services/cpa.rs
use crate::models::{CpaSummary, DailyRecord, DateRange};

/// Records whose date falls inside the window, in input order.
pub fn records_in_range(records: &[DailyRecord], range: &DateRange) -> Vec<DailyRecord> {
    records
        .iter()
        .filter(|r| range.contains(r.date))
        .copied()
        .collect()
}

/// Compute the CPA summary for a date window against a target.
///
/// Pure function of its inputs: no state, no I/O, safe to call from any
/// number of requests at once. An inverted or out-of-bounds window just
/// yields zero totals.
pub fn summarize(records: &[DailyRecord], range: &DateRange, target_cpa: f64) -> CpaSummary {
    let mut total_cost = 0.0;
    let mut total_conversions: u64 = 0;
    for record in records.iter().filter(|r| range.contains(r.date)) {
        total_cost += record.cost;
        total_conversions += u64::from(record.conversions);
    }

    // No conversions means CPA is undefined, not zero. A zero here would
    // read as a perfect CPA on the dashboard.
    let actual_cpa = (total_conversions > 0).then(|| total_cost / total_conversions as f64);
    let cpa_delta = actual_cpa.map(|cpa| cpa - target_cpa);
    // A zero (or unset) target admits no percentage comparison.
    let over_under_pct =
        cpa_delta.and_then(|delta| (target_cpa > 0.0).then(|| delta / target_cpa * 100.0));

    CpaSummary {
        total_cost,
        total_conversions,
        actual_cpa,
        target_cpa,
        cpa_delta,
        over_under_pct,
    }
}
