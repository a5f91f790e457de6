// src/models.rs
use serde::{Serialize, Deserialize};
use chrono::NaiveDate;

/// One day of spend and attributed conversions. Immutable once loaded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub cost: f64,
    pub conversions: u32,
}

/// Inclusive date window. Callers are expected to keep `start <= end`;
/// an inverted window simply selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// First and last dates of the loaded dataset. The frontend clamps its
/// date picker to these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatasetBounds {
    pub min_date: NaiveDate,
    pub max_date: NaiveDate,
}

/// Result of one CPA run over a date window.
///
/// The `Option` fields are genuinely absent values, not zeroes: a window
/// with no conversions has no CPA at all, and a zero target admits no
/// percentage comparison. They serialize as JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CpaSummary {
    pub total_cost: f64,
    pub total_conversions: u64,
    pub actual_cpa: Option<f64>,
    pub target_cpa: f64,
    pub cpa_delta: Option<f64>,
    pub over_under_pct: Option<f64>,
}

impl CpaSummary {
    /// A run reads as good when actual CPA is at or below target
    /// (`cpa_delta <= 0`). `None` when there is no CPA to judge.
    pub fn is_good(&self) -> Option<bool> {
        self.cpa_delta.map(|delta| delta <= 0.0)
    }
}
