//! Statistical Primitives
//!
//! Summary extraction and dispersion figures over present values. Two
//! volatility flavors exist: a plain coefficient of variation for roughly
//! linear metrics (price), and a log-domain variant for heavy-tailed,
//! multiplicative metrics (sales rank), where a jump from rank 1_000 to
//! 10_000 should weigh like one from 10_000 to 100_000.
//!
//! Every function resolves degenerate numerics (zero or non-finite mean,
//! too few samples) to `None` rather than letting NaN escape downstream.

use argus_core::values::{SignalPoint, present_values};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

/// Rank volatility figures are clamped to this ceiling (percent)
pub const RANK_VOLATILITY_CAP: f64 = 150.0;

/// Summary of a series' present values
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SeriesStats {
    /// Latest present value, scanning from the end backward (trailing
    /// points may be absent gap markers)
    pub current: Option<f64>,
    pub avg: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Summarize a series' present values; all-absent input yields all-`None`
pub fn series_stats(points: &[SignalPoint]) -> SeriesStats {
    let current = points.iter().rev().find_map(|p| p.value);
    let values = present_values(points);
    if values.is_empty() {
        return SeriesStats::default();
    }

    let avg = mean(&values);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    SeriesStats {
        current,
        avg: Some(avg),
        min: Some(min),
        max: Some(max),
    }
}

/// Coefficient of variation as a percentage, 1 dp.
///
/// `None` under `min_points` present values or when the mean is zero or
/// non-finite. Suited to roughly linear metrics like price.
pub fn volatility_pct(values: &[f64], min_points: usize) -> Option<f64> {
    if values.len() < min_points {
        return None;
    }
    let mean = mean(values);
    if mean == 0.0 || !mean.is_finite() {
        return None;
    }
    let pct = population_std_dev(values, mean) / mean * 100.0;
    pct.is_finite().then(|| round1(pct))
}

/// Log-domain dispersion percentage for rank series, clamped to
/// [0, [`RANK_VOLATILITY_CAP`]].
///
/// Values at or below zero cannot feed the log transform and are excluded
/// before the `min_points` check.
pub fn rank_volatility_pct(values: &[f64], min_points: usize) -> Option<f64> {
    let logs: Vec<f64> = values
        .iter()
        .copied()
        .filter(|v| *v > 0.0)
        .map(f64::ln)
        .collect();
    if logs.len() < min_points {
        return None;
    }
    let mean = mean(&logs);
    if mean == 0.0 || !mean.is_finite() {
        return None;
    }
    let pct = population_std_dev(&logs, mean) / mean * 100.0;
    if !pct.is_finite() {
        return None;
    }
    Some(round1(pct.clamp(0.0, RANK_VOLATILITY_CAP)))
}

/// Price stability: `1 - volatility/100`, clamped to [0, 1].
///
/// Absent volatility yields absent stability, never a misleading 0 or 1.
pub fn stability_score(volatility_pct: Option<f64>) -> Option<f64> {
    volatility_pct.map(|v| (1.0 - v / 100.0).clamp(0.0, 1.0))
}

/// Rank stability: the volatility ratio is capped at 1.5 before clamping,
/// matching the wider [`RANK_VOLATILITY_CAP`] range
pub fn rank_stability_score(volatility_pct: Option<f64>) -> Option<f64> {
    volatility_pct.map(|v| (1.0 - (v / 100.0).min(1.5)).clamp(0.0, 1.0))
}

/// Convert a dollar figure to `Decimal` money rounded to 2 dp;
/// non-finite input resolves to `None`
pub fn money(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_f64(value).map(|d| d.round_dp(2))
}

/// Round to 1 decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divide by n)
fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use argus_core::values::timestamp_from_offset;
    use rust_decimal_macros::dec;

    fn points(entries: &[(i64, Option<f64>)]) -> Vec<SignalPoint> {
        entries
            .iter()
            .map(|&(offset, value)| SignalPoint {
                timestamp: timestamp_from_offset(offset).unwrap(),
                value,
            })
            .collect()
    }

    #[test]
    fn test_series_stats() {
        let series = points(&[
            (0, Some(10.0)),
            (60, Some(30.0)),
            (120, Some(20.0)),
            (180, None), // trailing gap marker
        ]);
        let stats = series_stats(&series);

        assert_eq!(stats.current, Some(20.0)); // last present, not last point
        assert_eq!(stats.avg, Some(20.0));
        assert_eq!(stats.min, Some(10.0));
        assert_eq!(stats.max, Some(30.0));
    }

    #[test]
    fn test_series_stats_all_absent() {
        let series = points(&[(0, None), (60, None)]);
        assert_eq!(series_stats(&series), SeriesStats::default());
        assert_eq!(series_stats(&[]), SeriesStats::default());
    }

    #[test]
    fn test_volatility_minimum_sample_guard() {
        // Extreme spread, but below the minimum sample count
        let values = vec![1.0, 1000.0, 1.0, 1000.0];
        assert_eq!(volatility_pct(&values, 10), None);
        assert_eq!(rank_volatility_pct(&values, 10), None);

        assert!(volatility_pct(&vec![10.0; 10], 10).is_some());
    }

    #[test]
    fn test_volatility_degenerate_mean() {
        let zero_mean = vec![-5.0, 5.0, -5.0, 5.0, -5.0, 5.0, -5.0, 5.0, -5.0, 5.0];
        assert_eq!(volatility_pct(&zero_mean, 10), None);
    }

    #[test]
    fn test_volatility_value() {
        // Known case: values 8..12 uniform-ish around mean 10
        let values = vec![8.0, 9.0, 10.0, 11.0, 12.0, 8.0, 9.0, 10.0, 11.0, 12.0];
        let vol = volatility_pct(&values, 10).unwrap();
        assert!((vol - 14.1).abs() < 0.1, "got {vol}");
    }

    #[test]
    fn test_rank_volatility_excludes_nonpositive_before_gate() {
        // 12 values, but only 9 are positive: still below min_points
        let mut values = vec![100.0; 9];
        values.extend([0.0, -1.0, -50.0]);
        assert_eq!(rank_volatility_pct(&values, 10), None);
    }

    #[test]
    fn test_rank_volatility_clamped() {
        // Mean of logs near zero inflates the ratio; cap applies
        let mut values = vec![2.0; 10];
        values.extend(vec![50_000.0; 2]);
        if let Some(vol) = rank_volatility_pct(&values, 10) {
            assert!((0.0..=RANK_VOLATILITY_CAP).contains(&vol));
        }
    }

    #[test]
    fn test_stability_bounds() {
        for vol in [0.0, 12.5, 50.0, 100.0, 150.0, 400.0] {
            let s = stability_score(Some(vol)).unwrap();
            assert!((0.0..=1.0).contains(&s), "stability {s} for vol {vol}");
            let rs = rank_stability_score(Some(vol)).unwrap();
            assert!((0.0..=1.0).contains(&rs));
        }
        assert_eq!(stability_score(None), None);
        assert_eq!(rank_stability_score(None), None);
    }

    #[test]
    fn test_money_rounding() {
        assert_eq!(money(19.999), Some(dec!(20.00)));
        assert_eq!(money(19.99), Some(dec!(19.99)));
        assert_eq!(money(f64::NAN), None);
        assert_eq!(money(f64::INFINITY), None);
    }
}
