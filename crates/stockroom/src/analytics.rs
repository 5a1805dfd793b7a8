//! # Metric Recorder
//!
//! An append-only log of named numeric observations. Unlike products and orders, metrics
//! are not an actor: any number of request handlers append concurrently, and the log is only
//! ever pushed to or copied out, so a mutex held for one push is enough. The durable copy is
//! written on the blocking pool, outside that mutex, so a handler never stalls a runtime worker
//! while an actor holds the database connection.

use crate::model::Metric;
use crate::storage::SqliteStore;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, warn};

/// Cloneable handle on a shared metric log.
#[derive(Clone, Default)]
pub struct MetricRecorder {
    log: Arc<Mutex<Vec<Metric>>>,
    sink: Option<SqliteStore>,
}

impl MetricRecorder {
    /// A recorder that keeps metrics in memory only.
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder that also appends every metric to the `metrics` table of `store`.
    ///
    /// Metrics recorded before a restart are not read back; the in-memory log starts empty.
    pub fn with_sink(store: SqliteStore) -> Self {
        Self {
            log: Arc::default(),
            sink: Some(store),
        }
    }

    /// Records `value` under `name`, stamped with the current time. Never fails: a failed
    /// durable write is logged and the metric is still kept in memory.
    ///
    /// Concurrent calls may reach the `metrics` table in a different order than the in-memory
    /// log.
    pub async fn track_metric(&self, name: impl Into<String>, value: f64) -> Metric {
        let metric = Metric {
            name: name.into(),
            value,
            time: chrono::Utc::now().timestamp(),
        };
        debug!(name = %metric.name, value, "Tracking metric");
        self.log.lock().push(metric.clone());

        if let Some(sink) = self.sink.clone() {
            let stored = metric.clone();
            match tokio::task::spawn_blocking(move || sink.insert_metric(&stored)).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!(name = %metric.name, error = %e, "Metric not persisted"),
                Err(e) => warn!(name = %metric.name, error = %e, "Metric write task failed"),
            }
        }

        metric
    }

    /// Every metric recorded through this log, in the order they were recorded.
    pub fn metrics(&self) -> Vec<Metric> {
        self.log.lock().clone()
    }
}
