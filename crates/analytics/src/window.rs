//! Series Windowing
//!
//! Trims a decoded series to a trailing time window and bounds its point
//! count before the heavier analyzers run. Both operations are total and
//! no-ops on empty input.

use argus_core::values::{SignalPoint, Timestamp};
use chrono::Duration;

/// Days per "month" for window arithmetic. A deliberate simplification:
/// 12 months is 360 days, not a calendar year, so long lookback windows
/// drift slightly against the calendar.
pub const DAYS_PER_MONTH: i64 = 30;

/// Keep only points newer than `now - months * 30 days`
pub fn trim_to_months(series: &[SignalPoint], months: u32, now: Timestamp) -> Vec<SignalPoint> {
    if series.is_empty() {
        return Vec::new();
    }
    let cutoff = now - Duration::days(i64::from(months) * DAYS_PER_MONTH);
    series
        .iter()
        .filter(|p| p.timestamp >= cutoff)
        .copied()
        .collect()
}

/// Bound a series to `max_points` by keeping every Nth point,
/// N = ceil(len / max_points). The first point always survives and the
/// final observation is re-appended if the stride would drop it, so the
/// series endpoints are preserved.
pub fn downsample(series: &[SignalPoint], max_points: usize) -> Vec<SignalPoint> {
    if max_points == 0 || series.len() <= max_points {
        return series.to_vec();
    }
    let stride = series.len().div_ceil(max_points);
    let mut sampled: Vec<SignalPoint> = series.iter().step_by(stride).copied().collect();

    if let Some(last) = series.last() {
        if sampled.last() != Some(last) {
            sampled.push(*last);
        }
    }
    sampled
}

#[cfg(test)]
mod tests {
    use super::*;
    use argus_core::values::timestamp_from_offset;

    fn series(offsets: &[i64]) -> Vec<SignalPoint> {
        offsets
            .iter()
            .map(|&o| SignalPoint::new(timestamp_from_offset(o).unwrap(), o as f64))
            .collect()
    }

    #[test]
    fn test_trim_keeps_trailing_window() {
        let now = timestamp_from_offset(6 * 30 * 1440).unwrap(); // 180 days in
        let points = series(&[0, 60 * 1440, 150 * 1440]);

        let trimmed = trim_to_months(&points, 3, now);
        assert_eq!(trimmed.len(), 1);
        assert_eq!(trimmed[0].value, Some((150 * 1440) as f64));

        // Wide window keeps everything
        assert_eq!(trim_to_months(&points, 12, now).len(), 3);
    }

    #[test]
    fn test_trim_empty_is_noop() {
        let now = timestamp_from_offset(0).unwrap();
        assert!(trim_to_months(&[], 12, now).is_empty());
    }

    #[test]
    fn test_downsample_bounds_length() {
        let offsets: Vec<i64> = (0..1000).map(|i| i * 60).collect();
        let points = series(&offsets);

        let sampled = downsample(&points, 100);
        assert!(sampled.len() <= 101); // budget plus the re-appended endpoint
        assert_eq!(sampled.first(), points.first());
        assert_eq!(sampled.last(), points.last());
        assert!(sampled.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    }

    #[test]
    fn test_downsample_short_series_untouched() {
        let points = series(&[0, 60, 120]);
        assert_eq!(downsample(&points, 500), points);
        assert!(downsample(&[], 500).is_empty());
    }
}
