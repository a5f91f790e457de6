// src/services/store.rs
use log::info;

use crate::models::{DailyRecord, DatasetBounds};
use crate::services::dataset::{DatasetError, DatasetProvider};

/// In-memory holder for the working dataset.
///
/// Loaded once at startup and held immutable for the life of the process;
/// refreshing the data means restarting. Requests share it behind an `Arc`
/// and only ever read.
pub struct DatasetStore {
    records: Vec<DailyRecord>,
}

impl DatasetStore {
    pub fn from_provider(provider: &dyn DatasetProvider) -> Result<Self, DatasetError> {
        let records = provider.load()?;
        info!("Dataset store initialized with {} daily records", records.len());
        Ok(DatasetStore { records })
    }

    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    /// Date-picker bounds, relying on the provider contract that records
    /// arrive sorted ascending. `None` for an empty dataset.
    pub fn bounds(&self) -> Option<DatasetBounds> {
        let first = self.records.first()?;
        let last = self.records.last()?;
        Some(DatasetBounds {
            min_date: first.date,
            max_date: last.date,
        })
    }
}
