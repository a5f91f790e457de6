// src/services/dataset.rs
use chrono::NaiveDate;
use log::{info, warn};
use std::fmt;
use std::path::PathBuf;

use crate::models::DailyRecord;

/// Why a provider could not hand back a usable dataset.
#[derive(Debug)]
pub enum DatasetError {
    /// The source as a whole cannot be read (missing file, bad header, ...).
    Unavailable { source: String, reason: String },
    /// A single row does not parse into the `DailyRecord` shape.
    MalformedRecord { row: usize, reason: String },
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DatasetError::Unavailable { source, reason } => {
                write!(f, "dataset unavailable ({}): {}", source, reason)
            }
            DatasetError::MalformedRecord { row, reason } => {
                write!(f, "malformed record at row {}: {}", row, reason)
            }
        }
    }
}

impl std::error::Error for DatasetError {}

/// Anything that can supply the working dataset.
///
/// Contract: records come back sorted ascending by date with one record per
/// calendar day. Providers only read their source, never mutate it.
pub trait DatasetProvider {
    fn load(&self) -> Result<Vec<DailyRecord>, DatasetError>;
}

/// Daily non-brand spend and conversion counts for November 2025.
/// Stands in for the real reporting feed until one is wired up.
const SEED_ROWS: &[(&str, f64, u32)] = &[
    ("2025-11-01", 403.0, 46),
    ("2025-11-02", 431.0, 46),
    ("2025-11-03", 263.0, 97),
    ("2025-11-04", 311.0, 87),
    ("2025-11-05", 548.0, 97),
    ("2025-11-06", 371.0, 76),
    ("2025-11-07", 445.0, 90),
    ("2025-11-08", 729.0, 20),
    ("2025-11-09", 948.0, 65),
    ("2025-11-10", 796.0, 83),
    ("2025-11-11", 646.0, 35),
    ("2025-11-12", 789.0, 69),
    ("2025-11-13", 182.0, 14),
    ("2025-11-14", 955.0, 25),
    ("2025-11-15", 251.0, 69),
    ("2025-11-16", 669.0, 16),
    ("2025-11-17", 523.0, 17),
    ("2025-11-18", 608.0, 12),
    ("2025-11-19", 463.0, 53),
    ("2025-11-20", 629.0, 75),
    ("2025-11-21", 967.0, 96),
    ("2025-11-22", 139.0, 58),
    ("2025-11-23", 171.0, 79),
    ("2025-11-24", 885.0, 80),
    ("2025-11-25", 554.0, 92),
    ("2025-11-26", 520.0, 21),
    ("2025-11-27", 301.0, 72),
    ("2025-11-28", 721.0, 15),
    ("2025-11-29", 908.0, 22),
    ("2025-11-30", 579.0, 38),
];

/// The built-in sample dataset. Infallible in practice, but it goes through
/// the same row parsing as any external source.
pub struct StaticProvider;

impl DatasetProvider for StaticProvider {
    fn load(&self) -> Result<Vec<DailyRecord>, DatasetError> {
        SEED_ROWS
            .iter()
            .enumerate()
            .map(|(i, &(date, cost, conversions))| {
                let date = parse_date(date, i + 1)?;
                Ok(DailyRecord { date, cost, conversions })
            })
            .collect()
    }
}

/// Reads `date,cost,conversions` rows from a local CSV file.
///
/// This is the seam where a real reporting feed attaches; a flat file is as
/// far as this service goes.
pub struct CsvProvider {
    path: PathBuf,
}

impl CsvProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvProvider { path: path.into() }
    }
}

impl DatasetProvider for CsvProvider {
    fn load(&self) -> Result<Vec<DailyRecord>, DatasetError> {
        let source = self.path.display().to_string();
        info!("Loading daily records from CSV: {}", source);

        let unavailable = |reason: String| DatasetError::Unavailable {
            source: source.clone(),
            reason,
        };

        let mut rdr = csv::Reader::from_path(&self.path).map_err(|e| unavailable(e.to_string()))?;

        // Locate columns by header name so column order doesn't matter.
        let headers = rdr.headers().map_err(|e| unavailable(e.to_string()))?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| unavailable(format!("no '{}' column in CSV header", name)))
        };
        let idx_date = column("date")?;
        let idx_cost = column("cost")?;
        let idx_conversions = column("conversions")?;

        let mut records = Vec::new();
        for (i, row) in rdr.records().enumerate() {
            // The header occupies line 1; data rows start at line 2.
            let line = i + 2;
            let malformed = |reason: String| DatasetError::MalformedRecord { row: line, reason };

            let row = row.map_err(|e| malformed(e.to_string()))?;
            let field = |idx: usize, name: &str| {
                row.get(idx)
                    .map(str::trim)
                    .ok_or_else(|| malformed(format!("missing '{}' field", name)))
            };

            let date = parse_date(field(idx_date, "date")?, line)?;
            let cost: f64 = field(idx_cost, "cost")?
                .parse()
                .map_err(|e| malformed(format!("cost is not a number: {}", e)))?;
            if cost < 0.0 {
                return Err(malformed(format!("cost must not be negative, got {}", cost)));
            }
            let conversions: u32 = field(idx_conversions, "conversions")?
                .parse()
                .map_err(|e| malformed(format!("conversions is not a whole number: {}", e)))?;

            records.push(DailyRecord { date, cost, conversions });
        }

        // Uphold the provider contract regardless of file order.
        records.sort_by_key(|r| r.date);
        for pair in records.windows(2) {
            if pair[0].date == pair[1].date {
                warn!("Duplicate date {} in {}", pair[0].date, source);
            }
        }

        info!("Loaded {} daily records from {}", records.len(), source);
        Ok(records)
    }
}

fn parse_date(raw: &str, row: usize) -> Result<NaiveDate, DatasetError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| DatasetError::MalformedRecord {
        row,
        reason: format!("'{}' is not an ISO-8601 date: {}", raw, e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn temp_csv(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("cpa_dashboard_{}", name));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn static_provider_loads_full_month_sorted() {
        let records = StaticProvider.load().unwrap();
        assert_eq!(records.len(), 30);
        assert_eq!(records[0].date.to_string(), "2025-11-01");
        assert_eq!(records[29].date.to_string(), "2025-11-30");
        assert!(records.windows(2).all(|w| w[0].date < w[1].date));

        // First day of the sample feed.
        assert_eq!(records[0].cost, 403.0);
        assert_eq!(records[0].conversions, 46);
    }

    #[test]
    fn csv_provider_parses_and_sorts_rows() {
        let path = temp_csv(
            "ok.csv",
            "date,cost,conversions\n2025-11-02,431,46\n2025-11-01,403,46\n",
        );
        let records = CsvProvider::new(&path).load().unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date.to_string(), "2025-11-01");
        assert_eq!(records[1].cost, 431.0);
    }

    #[test]
    fn csv_provider_reports_missing_file_as_unavailable() {
        let err = CsvProvider::new("/nonexistent/feed.csv").load().unwrap_err();
        assert!(matches!(err, DatasetError::Unavailable { .. }), "got {err:?}");
    }

    #[test]
    fn csv_provider_reports_missing_column_as_unavailable() {
        let path = temp_csv("no_cost.csv", "date,spend,conversions\n2025-11-01,403,46\n");
        let err = CsvProvider::new(&path).load().unwrap_err();
        fs::remove_file(&path).unwrap();
        match err {
            DatasetError::Unavailable { reason, .. } => assert!(reason.contains("cost")),
            other => panic!("expected Unavailable, got {other:?}"),
        }
    }

    #[test]
    fn csv_provider_flags_bad_rows_with_line_numbers() {
        let path = temp_csv(
            "bad_cost.csv",
            "date,cost,conversions\n2025-11-01,403,46\n2025-11-02,not-a-number,46\n",
        );
        let err = CsvProvider::new(&path).load().unwrap_err();
        fs::remove_file(&path).unwrap();
        match err {
            DatasetError::MalformedRecord { row, reason } => {
                assert_eq!(row, 3);
                assert!(reason.contains("cost"));
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn csv_provider_rejects_unparsable_dates() {
        let path = temp_csv("bad_date.csv", "date,cost,conversions\n11/01/2025,403,46\n");
        let err = CsvProvider::new(&path).load().unwrap_err();
        fs::remove_file(&path).unwrap();
        assert!(matches!(err, DatasetError::MalformedRecord { row: 2, .. }), "got {err:?}");
    }

    #[test]
    fn csv_provider_rejects_negative_cost() {
        let path = temp_csv("neg_cost.csv", "date,cost,conversions\n2025-11-01,-5,46\n");
        let err = CsvProvider::new(&path).load().unwrap_err();
        fs::remove_file(&path).unwrap();
        assert!(matches!(err, DatasetError::MalformedRecord { row: 2, .. }), "got {err:?}");
    }
}
