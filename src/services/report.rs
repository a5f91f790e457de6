// src/services/report.rs
use serde::Serialize;

use crate::models::CpaSummary;

/// Where actual CPA sits relative to the target. `None` when there is no
/// CPA (zero conversions) or no positive target to compare against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetStanding {
    Above,
    Below,
    On,
}

pub fn target_standing(summary: &CpaSummary) -> Option<TargetStanding> {
    // over_under_pct is only present when both CPA and a positive target
    // exist, which is exactly when a standing is meaningful.
    summary.over_under_pct?;
    let delta = summary.cpa_delta?;
    Some(if delta > 0.0 {
        TargetStanding::Above
    } else if delta < 0.0 {
        TargetStanding::Below
    } else {
        TargetStanding::On
    })
}

/// Narrative block for the performance-insight panel.
#[derive(Debug, Clone, Serialize)]
pub struct Insight {
    pub standing: Option<TargetStanding>,
    pub headline: String,
    pub detail: String,
}

pub fn build_insight(summary: &CpaSummary) -> Insight {
    let Some(actual_cpa) = summary.actual_cpa else {
        return Insight {
            standing: None,
            headline: "No conversions in this period.".to_string(),
            detail: format!(
                "Spend of {} produced no conversions between these dates, so CPA cannot be computed.",
                format_currency(summary.total_cost)
            ),
        };
    };

    let Some(standing) = target_standing(summary) else {
        return Insight {
            standing: None,
            headline: "No target to compare against.".to_string(),
            detail: format!(
                "Current CPA is {}. Set a target above zero to see how the period compares.",
                format_currency(actual_cpa)
            ),
        };
    };

    let (headline, direction) = match standing {
        TargetStanding::Above => ("CPA is running hot.", "above"),
        TargetStanding::Below => ("CPA is beating target.", "below"),
        TargetStanding::On => ("CPA is exactly on target.", "at"),
    };
    let pct = summary.over_under_pct.unwrap_or_default();

    Insight {
        standing: Some(standing),
        headline: headline.to_string(),
        detail: format!(
            "Current CPA is {}, which is {} {} the target of {} over this period.",
            format_currency(actual_cpa),
            format_percent(pct.abs()),
            direction,
            format_currency(summary.target_cpa)
        ),
    }
}

/// `$1,234.56`, two decimals, thousands separators.
pub fn format_currency(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{}${}.{}", sign, group_thousands(int_part), frac_part)
}

/// `1,665` style count formatting.
pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// `+3.76` / `-1.20` / `0.00` — explicit plus sign only when positive.
pub fn format_signed(value: f64) -> String {
    let sign = if value > 0.0 { "+" } else if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{}{}.{}", sign, group_thousands(int_part), frac_part)
}

/// One-decimal percentage, e.g. `75.2%`.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

fn group_thousands(digits: &str) -> String {
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(bytes.len() + bytes.len() / 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*b as char);
    }
    out
}
