//! Trend Classifier
//!
//! A coarse two-window comparison: split the ordered values into halves,
//! compare the half means, and label the direction. Deliberately not a
//! regression — cheap, explainable, and order-preserving is the goal.
//!
//! Rank polarity is inverted at the mapping layer: a rising sales rank
//! means the product is selling worse.

use argus_core::{PriceTrend, RankTrend};

use crate::stats::mean;

/// Polarity-neutral direction of an ordered value sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Rising,
    Falling,
    Flat,
}

/// Label the direction of an ordered, present-only value sequence.
///
/// The first `floor(n/2)` values form the first window, the remainder the
/// second. Relative change is `(second - first) / max(1, |first|)`; fewer
/// than `min_points` values yields the neutral label.
pub fn classify(values: &[f64], min_points: usize, threshold: f64) -> Trend {
    if values.len() < min_points.max(2) {
        return Trend::Flat;
    }
    let mid = values.len() / 2;
    let first_mean = mean(&values[..mid]);
    let second_mean = mean(&values[mid..]);

    let change = (second_mean - first_mean) / first_mean.abs().max(1.0);
    if change > threshold {
        Trend::Rising
    } else if change < -threshold {
        Trend::Falling
    } else {
        Trend::Flat
    }
}

/// Price polarity: rising prices are "up"
pub fn price_trend(values: &[f64], min_points: usize, threshold: f64) -> PriceTrend {
    match classify(values, min_points, threshold) {
        Trend::Rising => PriceTrend::Up,
        Trend::Falling => PriceTrend::Down,
        Trend::Flat => PriceTrend::Stable,
    }
}

/// Rank polarity: a falling rank number means the product is improving
pub fn rank_trend(values: &[f64], min_points: usize, threshold: f64) -> RankTrend {
    match classify(values, min_points, threshold) {
        Trend::Rising => RankTrend::Declining,
        Trend::Falling => RankTrend::Improving,
        Trend::Flat => RankTrend::Flat,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_TREND_MIN_POINTS, DEFAULT_TREND_THRESHOLD};

    fn classify_default(values: &[f64]) -> Trend {
        classify(values, DEFAULT_TREND_MIN_POINTS, DEFAULT_TREND_THRESHOLD)
    }

    #[test]
    fn test_directions() {
        assert_eq!(classify_default(&[10.0, 11.0, 14.0, 15.0]), Trend::Rising);
        assert_eq!(classify_default(&[15.0, 14.0, 11.0, 10.0]), Trend::Falling);
        assert_eq!(
            classify_default(&[10.0, 10.1, 10.0, 10.2, 10.1]),
            Trend::Flat
        );
    }

    #[test]
    fn test_symmetry_under_reversal() {
        let rising: Vec<f64> = (1..=20).map(|i| i as f64).collect();
        let falling: Vec<f64> = rising.iter().rev().copied().collect();

        assert_eq!(classify_default(&rising), Trend::Rising);
        assert_eq!(classify_default(&falling), Trend::Falling);
        assert_eq!(
            price_trend(&rising, DEFAULT_TREND_MIN_POINTS, DEFAULT_TREND_THRESHOLD),
            PriceTrend::Up
        );
        assert_eq!(
            price_trend(&falling, DEFAULT_TREND_MIN_POINTS, DEFAULT_TREND_THRESHOLD),
            PriceTrend::Down
        );
    }

    #[test]
    fn test_too_few_values_is_neutral() {
        assert_eq!(classify_default(&[1.0, 100.0, 1000.0]), Trend::Flat);
        assert_eq!(classify_default(&[]), Trend::Flat);
        assert_eq!(
            rank_trend(&[1.0, 1000.0], DEFAULT_TREND_MIN_POINTS, DEFAULT_TREND_THRESHOLD),
            RankTrend::Flat
        );
    }

    #[test]
    fn test_rank_polarity_inverted() {
        // Rank dropping from 5000 toward 1000: the product is improving
        let improving = [5000.0, 4500.0, 2000.0, 1000.0];
        assert_eq!(
            rank_trend(&improving, DEFAULT_TREND_MIN_POINTS, DEFAULT_TREND_THRESHOLD),
            RankTrend::Improving
        );

        let declining: Vec<f64> = improving.iter().rev().copied().collect();
        assert_eq!(
            rank_trend(&declining, DEFAULT_TREND_MIN_POINTS, DEFAULT_TREND_THRESHOLD),
            RankTrend::Declining
        );
    }

    #[test]
    fn test_small_magnitude_denominator_floor() {
        // |first mean| < 1: denominator floors at 1 so tiny absolute
        // wiggles do not register as trends
        assert_eq!(classify_default(&[0.01, 0.01, 0.02, 0.02]), Trend::Flat);
    }
}
