//! Sparse Series Decoder
//!
//! Raw histories arrive as flat alternating `[offset, value]` integer
//! arrays, where the offset is whole minutes since the series epoch. The
//! decoder turns them into timestamp-ordered [`SignalPoint`] sequences,
//! applying the per-field sentinel rules:
//!
//! - `-1` survives as a value only when `allow_negative_one` is set
//!   (explicit "unavailable" marker); otherwise it resolves to absent
//! - `0` is a value only when `allow_zero` is set (zero live offers is
//!   meaningful, a zero price is "no data")
//! - absent values are dropped unless `include_nulls` asks for gap markers
//!
//! Malformed input never fails: a trailing odd element is ignored,
//! negative offsets are skipped, and the output is re-sorted because the
//! input pair order is not trusted.

use argus_core::values::{SignalPoint, timestamp_from_offset};
use argus_core::{FieldSemantics, TrackedField};

/// Normalization options for one decode pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// A raw `0` is a legitimate value rather than "no data"
    pub allow_zero: bool,
    /// A raw `-1` is a meaningful sentinel that survives decoding
    pub allow_negative_one: bool,
    /// Retain absent-valued points as gap markers
    pub include_nulls: bool,
}

impl From<FieldSemantics> for DecodeOptions {
    fn from(semantics: FieldSemantics) -> Self {
        Self {
            allow_zero: semantics.allow_zero,
            allow_negative_one: semantics.allow_negative_one,
            include_nulls: false,
        }
    }
}

/// Resolve one raw value under the sentinel rules; `None` means absent
fn normalize(raw: i64, options: DecodeOptions) -> Option<f64> {
    if raw == -1 {
        return options.allow_negative_one.then_some(-1.0);
    }
    if raw < -1 {
        return None;
    }
    if raw == 0 {
        return options.allow_zero.then_some(0.0);
    }
    Some(raw as f64)
}

/// Decode a flat `[offset, value]` array into a timestamp-ordered series.
///
/// Total: malformed entries degrade to a partial or empty series, never an
/// error.
pub fn decode_series(raw: &[i64], options: DecodeOptions) -> Vec<SignalPoint> {
    if raw.len() % 2 != 0 {
        log::debug!(
            "[Decoder] odd-length raw array ({} entries), dropping trailing element",
            raw.len()
        );
    }

    let mut points = Vec::with_capacity(raw.len() / 2);
    for pair in raw.chunks_exact(2) {
        let Some(timestamp) = timestamp_from_offset(pair[0]) else {
            // Negative offset: malformed entry, skip silently
            continue;
        };
        match normalize(pair[1], options) {
            Some(value) => points.push(SignalPoint::new(timestamp, value)),
            None if options.include_nulls => points.push(SignalPoint::absent(timestamp)),
            None => {}
        }
    }

    // Input pair order is not trusted
    points.sort_by_key(|p| p.timestamp);
    points
}

/// Decode a field's raw array under its own sentinel table, scaling price
/// fields from integer cents to dollars.
pub fn decode_field(raw: &[i64], field: TrackedField) -> Vec<SignalPoint> {
    let semantics = field.semantics();
    let mut points = decode_series(raw, DecodeOptions::from(semantics));

    if semantics.is_price {
        for point in &mut points {
            // The -1 sentinel is a marker, not a price; leave it unscaled
            if let Some(v) = point.value {
                if v > 0.0 {
                    point.value = Some(v / 100.0);
                }
            }
        }
    }
    points
}

/// Decode a price array as an availability view: the `-1` "no offer"
/// sentinel and the gap markers are retained so stockout inference can
/// see the full timeline shape. Values stay in raw cents because the
/// availability predicate only reads their sign.
pub fn decode_availability_view(raw: &[i64]) -> Vec<SignalPoint> {
    decode_series(
        raw,
        DecodeOptions {
            allow_zero: false,
            allow_negative_one: true,
            include_nulls: true,
        },
    )
}
