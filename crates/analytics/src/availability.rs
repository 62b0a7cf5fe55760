//! Availability / Stockout Analyzer
//!
//! Infers out-of-stock exposure either from an explicit availability-flag
//! series (a caller-supplied predicate marks the "unavailable" points) or,
//! when no flag series exists, from suspicious gaps in an observation
//! series (a feed that records price changes goes quiet while a product
//! cannot be bought).
//!
//! All figures are time-weighted over elapsed wall-clock time, never point
//! counts: sampling is sparse and irregular, so point-counting would
//! misrepresent real downtime.

use argus_core::StockSignals;
use argus_core::values::SignalPoint;

use crate::stats::round1;

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Out-of-stock exposure from an explicit flag series.
///
/// Each inter-point interval is owned by its left endpoint: the series is
/// event-driven, so a point's state holds until the next observation. The
/// final point closes no interval. `None` under 2 points or a degenerate
/// span.
pub fn from_flags<F>(points: &[SignalPoint], is_unavailable: F) -> Option<StockSignals>
where
    F: Fn(&SignalPoint) -> bool,
{
    let (down_ms, longest_ms, span_ms) = flagged_time(points, is_unavailable)?;
    Some(signals(down_ms, longest_ms, span_ms))
}

/// Out-of-stock exposure implied by gaps in an observation series.
///
/// Any inter-point gap longer than `gap_days` is treated as a stockout
/// spanning the whole gap. `None` under 2 points or a degenerate span.
pub fn from_gaps(points: &[SignalPoint], gap_days: i64) -> Option<StockSignals> {
    if points.len() < 2 {
        return None;
    }
    let span_ms = span_ms(points)?;
    let threshold_ms = gap_days * MS_PER_DAY;

    let mut down_ms = 0i64;
    let mut longest_ms = 0i64;
    for pair in points.windows(2) {
        let gap = (pair[1].timestamp - pair[0].timestamp).num_milliseconds();
        if gap > threshold_ms {
            down_ms += gap;
            longest_ms = longest_ms.max(gap);
        }
    }
    Some(signals(down_ms, longest_ms, span_ms))
}

/// Share of observed time for which `is_active` holds, time-weighted the
/// same way as [`from_flags`]. Used for lightning-deal activity.
pub fn active_time_pct<F>(points: &[SignalPoint], is_active: F) -> Option<f64>
where
    F: Fn(&SignalPoint) -> bool,
{
    let (active_ms, _, span_ms) = flagged_time(points, is_active)?;
    Some(round1(
        (active_ms as f64 / span_ms as f64 * 100.0).clamp(0.0, 100.0),
    ))
}

/// Total flagged duration, longest contiguous flagged run, and full span,
/// all in milliseconds
fn flagged_time<F>(points: &[SignalPoint], flagged: F) -> Option<(i64, i64, i64)>
where
    F: Fn(&SignalPoint) -> bool,
{
    if points.len() < 2 {
        return None;
    }
    let span_ms = span_ms(points)?;

    let mut total_ms = 0i64;
    let mut run_ms = 0i64;
    let mut longest_ms = 0i64;
    for pair in points.windows(2) {
        let interval = (pair[1].timestamp - pair[0].timestamp).num_milliseconds();
        if flagged(&pair[0]) {
            total_ms += interval;
            run_ms += interval;
            longest_ms = longest_ms.max(run_ms);
        } else {
            run_ms = 0;
        }
    }
    Some((total_ms, longest_ms, span_ms))
}

fn span_ms(points: &[SignalPoint]) -> Option<i64> {
    let span = (points.last()?.timestamp - points.first()?.timestamp).num_milliseconds();
    (span > 0).then_some(span)
}

fn signals(down_ms: i64, longest_ms: i64, span_ms: i64) -> StockSignals {
    let oos = (down_ms as f64 / span_ms as f64 * 100.0).clamp(0.0, 100.0);
    StockSignals {
        oos_percent: Some(round1(oos)),
        // Whole elapsed days, floored, so the streak never overstates the span
        longest_oos_days: Some((longest_ms / MS_PER_DAY) as u32),
    }
}
