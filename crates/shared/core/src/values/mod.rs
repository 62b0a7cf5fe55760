use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Unix seconds of the raw-history epoch: 2011-01-01T00:00:00Z.
/// Raw series encode time as whole minutes elapsed since this instant.
pub const SERIES_EPOCH_UNIX_SECS: i64 = 1_293_840_000;

/// Convert a raw minute offset into an absolute instant.
///
/// Negative or absurdly large offsets are malformed input and yield
/// `None` (the decoder skips them rather than failing the whole series).
pub fn timestamp_from_offset(offset_minutes: i64) -> Option<Timestamp> {
    if offset_minutes < 0 {
        return None;
    }
    let unix_secs = offset_minutes
        .checked_mul(60)
        .and_then(|secs| secs.checked_add(SERIES_EPOCH_UNIX_SECS))?;
    DateTime::from_timestamp(unix_secs, 0)
}

/// A single decoded observation in a sparse series
///
/// Series are event-driven: a point exists only where the upstream feed
/// recorded a change, so consecutive points may be minutes or weeks apart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalPoint {
    /// Absolute instant of the observation
    pub timestamp: Timestamp,
    /// Observed value; `None` when the raw entry resolved to "no data"
    /// and null retention was requested at decode time
    pub value: Option<f64>,
}

impl SignalPoint {
    /// Create a point carrying a value
    pub fn new(timestamp: Timestamp, value: f64) -> Self {
        Self {
            timestamp,
            value: Some(value),
        }
    }

    /// Create a value-less point (gap marker)
    pub fn absent(timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            value: None,
        }
    }

    /// Returns true if the point carries a value
    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }
}

/// Project the present values of a series, in timestamp order
pub fn present_values(points: &[SignalPoint]) -> Vec<f64> {
    points.iter().filter_map(|p| p.value).collect()
}

/// Project the present (timestamp, value) pairs of a series
pub fn present_points(points: &[SignalPoint]) -> Vec<(Timestamp, f64)> {
    points
        .iter()
        .filter_map(|p| p.value.map(|v| (p.timestamp, v)))
        .collect()
}
