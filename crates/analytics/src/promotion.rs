//! Promotion Detector
//!
//! Flags price-drop episodes against a dynamic baseline: for each price
//! point, the baseline is the median of the strictly preceding points
//! inside a trailing 30-day window. A point is in promotion when it sits
//! at least 10% below its baseline; contiguous in-promotion points merge
//! into episodes, and an episode only counts once it clears a 5-day floor
//! (and stays under the configured cap, when set, so long clearance events
//! do not masquerade as cadence).
//!
//! Because baselines use strictly preceding points only, the first ~30
//! days of any series can never register a promotion. That cold-start
//! window is an accepted property of the method, kept as-is.
//!
//! A lightning-deal flag series is treated as ground truth when it shows
//! any activity: its time-weighted active percentage replaces the
//! rolling-median frequency estimate. The average-drop figure always comes
//! from the rolling-median method.

use argus_core::PromotionSignals;
use argus_core::values::{SignalPoint, Timestamp, present_points};
use chrono::Duration;

use crate::availability::active_time_pct;
use crate::config::AnalyticsConfig;
use crate::stats::round1;

/// One contiguous below-baseline run
#[derive(Debug, Clone, Copy)]
struct Episode {
    start: Timestamp,
    end: Timestamp,
    /// Relative drop at the episode's opening point, against its baseline
    depth: f64,
}

impl Episode {
    fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Detect promotional cadence on the primary price series.
///
/// `prices` is the windowed price series; `lightning` the decoded
/// lightning-deal series, empty when the product has none.
pub fn detect(
    prices: &[SignalPoint],
    lightning: &[SignalPoint],
    config: &AnalyticsConfig,
) -> PromotionSignals {
    let points = present_points(prices);
    if points.len() < config.promo_min_price_points {
        return PromotionSignals::default();
    }

    let episodes = collect_episodes(&points, config);
    let counted: Vec<Episode> = episodes
        .into_iter()
        .filter(|ep| {
            let days = ep.duration().num_days();
            days >= config.promo_min_episode_days
                && config.promo_max_episode_days.is_none_or(|cap| days <= cap)
        })
        .collect();

    let total_ms = (points[points.len() - 1].0 - points[0].0).num_milliseconds();
    let frequency_pct = if total_ms > 0 {
        let promo_ms: i64 = counted.iter().map(|ep| ep.duration().num_milliseconds()).sum();
        Some(round1(
            (promo_ms as f64 / total_ms as f64 * 100.0).clamp(0.0, 100.0),
        ))
    } else {
        None
    };

    let avg_drop_pct = if counted.is_empty() {
        None
    } else {
        let mean_depth = counted.iter().map(|ep| ep.depth).sum::<f64>() / counted.len() as f64;
        Some(round1(mean_depth * 100.0))
    };

    let mut signals = PromotionSignals {
        frequency_pct,
        avg_drop_pct,
    };

    // Deal flags are ground truth for frequency when any activity exists
    let deal_active = |p: &SignalPoint| p.value.is_some_and(|v| v > 0.0);
    if lightning.iter().any(deal_active) {
        if let Some(pct) = active_time_pct(lightning, deal_active) {
            log::debug!("[Promotion] lightning-deal flags supersede frequency estimate: {pct}%");
            signals.frequency_pct = Some(pct);
        }
    }
    signals
}

/// Walk the series merging contiguous below-baseline points into episodes
fn collect_episodes(points: &[(Timestamp, f64)], config: &AnalyticsConfig) -> Vec<Episode> {
    let window = Duration::days(config.promo_window_days);
    let mut episodes = Vec::new();
    let mut current: Option<Episode> = None;

    for (i, &(ts, price)) in points.iter().enumerate() {
        let window_start = ts - window;
        // Strictly preceding points inside the trailing window
        let preceding: Vec<f64> = points[..i]
            .iter()
            .filter(|(t, _)| *t >= window_start)
            .map(|&(_, v)| v)
            .collect();
        if preceding.len() < config.promo_min_window_points {
            // No baseline yet; the point is skipped, not "not in promo"
            continue;
        }

        let baseline = median(preceding);
        if baseline > 0.0 && price <= baseline * (1.0 - config.promo_drop_threshold) {
            match current.as_mut() {
                Some(episode) => episode.end = ts,
                None => {
                    current = Some(Episode {
                        start: ts,
                        end: ts,
                        depth: (baseline - price) / baseline,
                    })
                }
            }
        } else if let Some(episode) = current.take() {
            episodes.push(episode);
        }
    }
    if let Some(episode) = current.take() {
        episodes.push(episode);
    }
    episodes
}

/// Median of an unordered sample; even lengths average the middle pair
fn median(mut values: Vec<f64>) -> f64 {
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argus_core::values::timestamp_from_offset;

    const DAY_MIN: i64 = 1440;

    fn prices(entries: &[(i64, f64)]) -> Vec<SignalPoint> {
        entries
            .iter()
            .map(|&(day, v)| SignalPoint::new(timestamp_from_offset(day * DAY_MIN).unwrap(), v))
            .collect()
    }

    /// Daily baseline at 20.00 for `baseline_days`, then a dip of
    /// `drop` relative depth lasting `dip_days`, then recovery
    fn dip_series(baseline_days: i64, dip_days: i64, drop: f64) -> Vec<SignalPoint> {
        let mut entries = Vec::new();
        for day in 0..baseline_days {
            entries.push((day, 20.0));
        }
        for day in baseline_days..baseline_days + dip_days {
            entries.push((day, 20.0 * (1.0 - drop)));
        }
        for day in baseline_days + dip_days..baseline_days + dip_days + 20 {
            entries.push((day, 20.0));
        }
        prices(&entries)
    }

    #[test]
    fn test_short_dip_below_episode_floor_not_counted() {
        let series = dip_series(40, 3, 0.20);
        let signals = detect(&series, &[], &AnalyticsConfig::default());

        assert_eq!(signals.avg_drop_pct, None);
        assert_eq!(signals.frequency_pct, Some(0.0));
    }

    #[test]
    fn test_six_day_dip_counted() {
        let series = dip_series(40, 6, 0.20);
        let signals = detect(&series, &[], &AnalyticsConfig::default());

        let drop = signals.avg_drop_pct.expect("episode should be counted");
        assert!((drop - 20.0).abs() < 1.0, "got {drop}");
        let freq = signals.frequency_pct.expect("frequency should exist");
        assert!(freq > 0.0);
    }

    #[test]
    fn test_shallow_dip_not_flagged() {
        // 5% below baseline: under the 10% threshold
        let series = dip_series(40, 10, 0.05);
        let signals = detect(&series, &[], &AnalyticsConfig::default());
        assert_eq!(signals.frequency_pct, Some(0.0));
        assert_eq!(signals.avg_drop_pct, None);
    }

    #[test]
    fn test_minimum_price_points() {
        let series = prices(&[(0, 20.0), (10, 10.0), (20, 20.0)]);
        let signals = detect(&series, &[], &AnalyticsConfig::default());
        assert_eq!(signals, PromotionSignals::default());
    }

    #[test]
    fn test_cold_start_window_registers_nothing() {
        // The dip sits entirely inside the first few points, where no
        // baseline exists yet
        let mut entries = vec![(0, 20.0), (1, 16.0), (2, 16.0), (3, 16.0)];
        for day in 4..40 {
            entries.push((day, 20.0));
        }
        let signals = detect(&prices(&entries), &[], &AnalyticsConfig::default());
        assert_eq!(signals.frequency_pct, Some(0.0));
        assert_eq!(signals.avg_drop_pct, None);
    }

    #[test]
    fn test_episode_cap_excludes_clearance() {
        let series = dip_series(40, 30, 0.20);
        let capped = AnalyticsConfig {
            promo_max_episode_days: Some(14),
            ..AnalyticsConfig::default()
        };
        let signals = detect(&series, &[], &capped);
        assert_eq!(signals.avg_drop_pct, None);

        // Without the cap the same episode counts
        let signals = detect(&series, &[], &AnalyticsConfig::default());
        assert!(signals.avg_drop_pct.is_some());
    }

    #[test]
    fn test_lightning_deal_overrides_frequency() {
        let series = dip_series(40, 6, 0.20);
        // Deal live for 10% of its own span
        let deals = prices(&[(0, -1.0), (30, 15.0), (36, -1.0), (60, -1.0)]);

        let baseline = detect(&series, &[], &AnalyticsConfig::default());
        let with_deals = detect(&series, &deals, &AnalyticsConfig::default());

        assert_eq!(with_deals.frequency_pct, Some(10.0));
        // Depth still comes from the rolling-median method
        assert_eq!(with_deals.avg_drop_pct, baseline.avg_drop_pct);
    }

    #[test]
    fn test_inactive_lightning_series_ignored() {
        let series = dip_series(40, 6, 0.20);
        let deals = prices(&[(0, -1.0), (60, -1.0)]);

        let baseline = detect(&series, &[], &AnalyticsConfig::default());
        let with_deals = detect(&series, &deals, &AnalyticsConfig::default());
        assert_eq!(with_deals.frequency_pct, baseline.frequency_pct);
    }
}
