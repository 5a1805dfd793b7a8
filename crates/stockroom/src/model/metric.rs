use serde::{Deserialize, Serialize};

/// A single numeric observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    pub value: f64,
    /// Unix timestamp, seconds.
    pub time: i64,
}
