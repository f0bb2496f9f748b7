//! Bounded, persisted history of BMI calculations.
//!
//! The whole history is stored under a single key as a JSON array, newest
//! first, and is rewritten on every change. Unreadable state is treated as
//! an empty history.

use crate::{BmiRecord, BmiResult, KeyValueStore, Measurement, Result};
use chrono::Utc;

/// Storage key holding the serialized history
pub const HISTORY_KEY: &str = "bmi_history";

/// Maximum number of records kept
pub const MAX_HISTORY: usize = 50;

/// History of past calculations over an injectable backend
#[derive(Debug)]
pub struct HistoryStore<S: KeyValueStore> {
    backend: S,
    records: Vec<BmiRecord>,
}

impl<S: KeyValueStore> HistoryStore<S> {
    /// Load history from `backend`
    ///
    /// Missing, unreadable, or unparseable state yields an empty history.
    pub fn open(backend: S) -> Self {
        let records = load_records(&backend);
        Self { backend, records }
    }

    /// Records, most recent first
    pub fn list(&self) -> &[BmiRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Prepend `record`, keep the newest [`MAX_HISTORY`], and persist
    ///
    /// The in-memory list only changes once the backend write succeeds.
    pub fn append(&mut self, record: BmiRecord) -> Result<()> {
        tracing::debug!("Appending record {} (bmi {})", record.id, record.bmi);
        let mut records = Vec::with_capacity(MAX_HISTORY);
        records.push(record);
        records.extend(self.records.iter().take(MAX_HISTORY - 1).cloned());

        let dropped = (self.records.len() + 1).saturating_sub(MAX_HISTORY);
        if dropped > 0 {
            tracing::debug!("Dropping {} oldest record(s)", dropped);
        }

        persist(&mut self.backend, &records)?;
        self.records = records;
        Ok(())
    }

    /// Create a record for a fresh calculation and append it
    pub fn record(&mut self, measurement: &Measurement, result: &BmiResult) -> Result<BmiRecord> {
        let record = BmiRecord::new(measurement, result, Utc::now());
        self.append(record.clone())?;
        Ok(record)
    }

    /// Discard every record, including the durable copy
    pub fn clear(&mut self) -> Result<()> {
        self.backend.remove(HISTORY_KEY)?;
        self.records.clear();
        tracing::info!("Cleared history");
        Ok(())
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Give back the backend, e.g. to reopen it as a fresh store
    pub fn into_backend(self) -> S {
        self.backend
    }
}

fn persist<S: KeyValueStore>(backend: &mut S, records: &[BmiRecord]) -> Result<()> {
    let contents = serde_json::to_string(records)?;
    backend.set(HISTORY_KEY, &contents)?;
    tracing::debug!("Persisted {} record(s)", records.len());
    Ok(())
}

fn load_records<S: KeyValueStore>(backend: &S) -> Vec<BmiRecord> {
    let contents = match backend.get(HISTORY_KEY) {
        Ok(Some(contents)) => contents,
        Ok(None) => {
            tracing::info!("No saved history, starting empty");
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!("Unable to read history: {}. Starting empty.", e);
            return Vec::new();
        }
    };

    let mut records = match serde_json::from_str::<Vec<BmiRecord>>(&contents) {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!("Failed to parse history: {}. Starting empty.", e);
            return Vec::new();
        }
    };

    let before = records.len();
    records.retain(|r| {
        let ok = r.is_consistent();
        if !ok {
            tracing::warn!(
                "Skipping record {}: category {} does not match bmi {}",
                r.id,
                r.category,
                r.bmi
            );
        }
        ok
    });
    records.truncate(MAX_HISTORY);

    tracing::debug!("Loaded {} of {} stored record(s)", records.len(), before);
    records
}
