//! Seasonality Builder
//!
//! Pools an inverse-rank demand proxy by calendar month across every year
//! of history, producing a 12-slot index where 100 is the cross-month
//! average. Pooling per calendar month (rather than fitting a single-year
//! curve) is what surfaces a *recurring* yearly pattern from multi-year
//! history.
//!
//! The builder is gated on breadth of history: fewer than 6 distinct
//! `YYYY-MM` months observed yields the all-null "insufficient history"
//! result rather than an index fit to noise.

use argus_core::SeasonalitySignals;
use argus_core::values::{SignalPoint, present_points};
use chrono::Datelike;
use std::collections::HashSet;

use crate::stats::{mean, round1};

/// Build the monthly demand index from a full (untrimmed) rank series
pub fn build(rank_series: &[SignalPoint], min_months: usize) -> SeasonalitySignals {
    let mut observed_months: HashSet<(i32, u32)> = HashSet::new();
    let mut by_month: [Vec<f64>; 12] = Default::default();

    for (timestamp, value) in present_points(rank_series) {
        if value <= 0.0 {
            continue;
        }
        // Lower rank means more demand; 1/rank is the demand proxy
        let proxy = 1.0 / value;
        observed_months.insert((timestamp.year(), timestamp.month()));
        by_month[timestamp.month0() as usize].push(proxy);
    }

    if observed_months.len() < min_months {
        log::debug!(
            "[Seasonality] {} distinct months of history, {min_months} required",
            observed_months.len()
        );
        return SeasonalitySignals::insufficient_history();
    }

    let month_avgs: Vec<Option<f64>> = by_month
        .iter()
        .map(|samples| (!samples.is_empty()).then(|| mean(samples)))
        .collect();
    let populated: Vec<f64> = month_avgs.iter().filter_map(|&avg| avg).collect();
    let grand_avg = mean(&populated);
    if grand_avg <= 0.0 || !grand_avg.is_finite() {
        return SeasonalitySignals::insufficient_history();
    }

    let mut monthly_index = [None; 12];
    let mut indexed: Vec<(u32, f64)> = Vec::new();
    for (slot, avg) in month_avgs.iter().enumerate() {
        if let Some(avg) = avg {
            let index = round1(avg / grand_avg * 100.0);
            monthly_index[slot] = Some(index);
            indexed.push((slot as u32 + 1, index));
        }
    }

    let score = if indexed.len() >= 2 {
        let max = indexed.iter().map(|&(_, i)| i).fold(f64::NEG_INFINITY, f64::max);
        let min = indexed.iter().map(|&(_, i)| i).fold(f64::INFINITY, f64::min);
        Some(round1(max - min))
    } else {
        None
    };

    // Stable sorts: ties keep calendar order
    let mut by_desc = indexed.clone();
    by_desc.sort_by(|a, b| b.1.total_cmp(&a.1));
    let peak_months: Vec<u32> = by_desc.iter().take(3).map(|&(m, _)| m).collect();

    let mut by_asc = indexed;
    by_asc.sort_by(|a, b| a.1.total_cmp(&b.1));
    let trough_months: Vec<u32> = by_asc.iter().take(3).map(|&(m, _)| m).collect();

    SeasonalitySignals {
        score,
        peak_months,
        trough_months,
        monthly_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argus_core::values::{Timestamp, timestamp_from_offset};
    use chrono::{TimeZone, Utc};

    fn at(year: i32, month: u32, day: u32) -> Timestamp {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    fn rank_point(ts: Timestamp, rank: f64) -> SignalPoint {
        SignalPoint::new(ts, rank)
    }

    /// Three years of monthly rank data; December rank divided by `boost`
    fn yearly_series(december_boost: f64) -> Vec<SignalPoint> {
        let mut points = Vec::new();
        for year in 2021..2024 {
            for month in 1..=12 {
                let rank = if month == 12 { 5000.0 / december_boost } else { 5000.0 };
                points.push(rank_point(at(year, month, 15), rank));
            }
        }
        points
    }

    #[test]
    fn test_insufficient_history_gated() {
        // Five distinct months across two years
        let points = vec![
            rank_point(at(2022, 1, 1), 1000.0),
            rank_point(at(2022, 2, 1), 1000.0),
            rank_point(at(2022, 3, 1), 1000.0),
            rank_point(at(2023, 1, 1), 1000.0),
            rank_point(at(2023, 5, 1), 1000.0),
        ];
        let signals = build(&points, 6);

        assert!(!signals.is_available());
        assert_eq!(signals.score, None);
        assert!(signals.peak_months.is_empty());
        assert!(signals.trough_months.is_empty());
        assert_eq!(signals.monthly_index, [None; 12]);
    }

    #[test]
    fn test_december_peak_across_years() {
        let signals = build(&yearly_series(5.0), 6);

        assert!(signals.is_available());
        assert!(signals.peak_months.contains(&12), "peaks: {:?}", signals.peak_months);
        assert_eq!(signals.peak_months[0], 12);
        assert!(!signals.trough_months.contains(&12));
        assert!(signals.score.unwrap() > 0.0);

        // December index above average, everything else below
        assert!(signals.monthly_index[11].unwrap() > 100.0);
        assert!(signals.monthly_index[0].unwrap() < 100.0);
    }

    #[test]
    fn test_flat_demand_scores_near_zero() {
        let signals = build(&yearly_series(1.0), 6);

        assert!(signals.is_available());
        assert_eq!(signals.score, Some(0.0));
        for slot in signals.monthly_index {
            assert_eq!(slot, Some(100.0));
        }
        // Ties keep calendar order
        assert_eq!(signals.peak_months, vec![1, 2, 3]);
        assert_eq!(signals.trough_months, vec![1, 2, 3]);
    }

    #[test]
    fn test_nonpositive_ranks_excluded() {
        let base = timestamp_from_offset(0).unwrap();
        let points = vec![
            SignalPoint::new(base, 0.0),
            SignalPoint::new(base, -1.0),
        ];
        assert!(!build(&points, 6).is_available());
    }

    #[test]
    fn test_peaks_capped_at_three() {
        let signals = build(&yearly_series(5.0), 6);
        assert!(signals.peak_months.len() <= 3);
        assert!(signals.trough_months.len() <= 3);
    }
}
