//! Bounded per-metric history buffers.
//!
//! Each time-series channel keeps the last [`SERIES_CAPACITY`] readings in
//! arrival order. Every mutation is mirrored to the snapshot store in the
//! same call, so a crash or reload can never observe the in-memory series
//! and the persisted snapshot diverging.

use std::collections::VecDeque;

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::store::SnapshotStore;

/// Maximum number of readings retained per metric.
pub const SERIES_CAPACITY: usize = 15;

/// One timestamped sample from a time-series channel.
///
/// Immutable after creation; the timestamp is captured at decode time in
/// human-readable local format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub value: f64,
    pub timestamp: String,
}

impl Reading {
    /// Create a reading stamped with the current local time.
    pub fn now(value: f64) -> Self {
        Self {
            value,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Ordered reading history, oldest first.
pub type MetricSeries = VecDeque<Reading>;

/// Fixed-capacity FIFO history for one metric, mirrored to persistent
/// storage under the metric's name.
///
/// The buffer is append/evict only: there is no random access mutation,
/// deletion, or reordering.
#[derive(Debug)]
pub struct MetricBuffer {
    name: String,
    series: MetricSeries,
}

impl MetricBuffer {
    /// Restore a buffer from the store, or start empty.
    ///
    /// An absent or unparseable snapshot means "no history", not an error.
    pub fn restore(name: &str, store: &dyn SnapshotStore) -> Self {
        let series = store
            .get(name)
            .and_then(|raw| serde_json::from_str::<MetricSeries>(&raw).ok())
            .unwrap_or_default();
        debug!("Restored {} readings for metric '{}'", series.len(), name);
        Self {
            name: name.to_string(),
            series,
        }
    }

    /// Append a reading, evicting the oldest entry if the series would
    /// exceed capacity, then persist the resulting series.
    ///
    /// Pushes arrive one at a time, so a single eviction always restores
    /// the invariant `len() <= SERIES_CAPACITY`.
    pub fn append(&mut self, reading: Reading, store: &mut dyn SnapshotStore) {
        self.series.push_back(reading);
        if self.series.len() > SERIES_CAPACITY {
            self.series.pop_front();
        }
        self.persist(store);
    }

    fn persist(&self, store: &mut dyn SnapshotStore) {
        match serde_json::to_string(&self.series) {
            Ok(json) => store.set(&self.name, &json),
            // A reading is plain data; serialization cannot fail in practice.
            Err(e) => debug!("Failed to serialize series '{}': {}", self.name, e),
        }
    }

    /// The metric name, which doubles as the store key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The retained readings, oldest first.
    pub fn series(&self) -> &MetricSeries {
        &self.series
    }

    /// Number of retained readings.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// True when no readings are retained.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// The most recent reading, if any.
    pub fn latest(&self) -> Option<&Reading> {
        self.series.back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::store::MemoryStore;

    fn reading(value: f64) -> Reading {
        Reading {
            value,
            timestamp: format!("t{}", value),
        }
    }

    #[test]
    fn test_capacity_invariant_holds_after_every_append() {
        let mut store = MemoryStore::new();
        let mut buffer = MetricBuffer::restore("humidity", &store);

        for i in 0..50 {
            buffer.append(reading(i as f64), &mut store);
            assert!(buffer.len() <= SERIES_CAPACITY);
        }
        assert_eq!(buffer.len(), SERIES_CAPACITY);
    }

    #[test]
    fn test_overflow_evicts_strictly_fifo() {
        let mut store = MemoryStore::new();
        let mut buffer = MetricBuffer::restore("humidity", &store);

        for v in 1..=16 {
            buffer.append(reading(v as f64), &mut store);
        }

        let values: Vec<f64> = buffer.series().iter().map(|r| r.value).collect();
        let expected: Vec<f64> = (2..=16).map(|v| v as f64).collect();
        assert_eq!(values, expected);
    }

    #[test]
    fn test_overflow_equals_previous_minus_head_plus_tail() {
        let mut store = MemoryStore::new();
        let mut buffer = MetricBuffer::restore("temperature", &store);
        for v in 0..SERIES_CAPACITY {
            buffer.append(reading(v as f64), &mut store);
        }

        let mut expected: Vec<Reading> = buffer.series().iter().cloned().collect();
        expected.remove(0);
        expected.push(reading(99.0));

        buffer.append(reading(99.0), &mut store);
        let actual: Vec<Reading> = buffer.series().iter().cloned().collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_append_persists_synchronously() {
        let mut store = MemoryStore::new();
        let mut buffer = MetricBuffer::restore("humidity", &store);

        buffer.append(reading(42.0), &mut store);

        let persisted: MetricSeries =
            serde_json::from_str(&store.get("humidity").unwrap()).unwrap();
        assert_eq!(&persisted, buffer.series());
    }

    #[test]
    fn test_restore_round_trips_through_store() {
        let mut store = MemoryStore::new();
        let mut buffer = MetricBuffer::restore("temperature", &store);
        for v in [20.1, 20.4, 21.0] {
            buffer.append(reading(v), &mut store);
        }
        let before: Vec<Reading> = buffer.series().iter().cloned().collect();

        // Fresh buffer, same store: the persisted snapshot survives.
        let restored = MetricBuffer::restore("temperature", &store);
        let after: Vec<Reading> = restored.series().iter().cloned().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_restore_missing_snapshot_starts_empty() {
        let store = MemoryStore::new();
        let buffer = MetricBuffer::restore("humidity", &store);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_restore_malformed_snapshot_starts_empty() {
        let mut store = MemoryStore::new();
        store.set("humidity", "not valid json");
        let buffer = MetricBuffer::restore("humidity", &store);
        assert!(buffer.is_empty());

        store.set("humidity", r#"{"wrong":"shape"}"#);
        let buffer = MetricBuffer::restore("humidity", &store);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_latest_returns_newest_reading() {
        let mut store = MemoryStore::new();
        let mut buffer = MetricBuffer::restore("humidity", &store);
        assert!(buffer.latest().is_none());

        buffer.append(reading(1.0), &mut store);
        buffer.append(reading(2.0), &mut store);
        assert_eq!(buffer.latest().unwrap().value, 2.0);
    }
}
