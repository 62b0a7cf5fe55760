//! Market Aggregator
//!
//! Rolls a list of per-product bundles up into market-level signals:
//! average out-of-stock exposure, threshold-bucketed price-war risk and
//! stockout pressure, and a market-wide seasonality built from every
//! product's full rank history pooled together (one builder pass over the
//! pool, not an average of per-product indices).

use argus_core::values::{SignalPoint, Timestamp};
use argus_core::{MarketSignalBundle, ProductSignalBundle, RawProductRecord, RiskLevel, TrackedField};
use chrono::Utc;

use crate::config::AnalyticsConfig;
use crate::decode::decode_field;
use crate::seasonality;
use crate::stats::round1;

/// Aggregate product bundles into one market bundle, against the current
/// clock
pub fn aggregate(
    products: &[ProductSignalBundle],
    records: &[RawProductRecord],
    config: &AnalyticsConfig,
) -> MarketSignalBundle {
    aggregate_at(products, records, config, Utc::now())
}

/// Aggregate against an explicit clock.
///
/// `records` supplies the raw rank histories for the pooled market
/// seasonality; the per-product bundles only carry windowed series.
pub fn aggregate_at(
    products: &[ProductSignalBundle],
    records: &[RawProductRecord],
    config: &AnalyticsConfig,
    now: Timestamp,
) -> MarketSignalBundle {
    let avg_oos_percent = average_oos(products);

    let bundle = MarketSignalBundle {
        product_count: products.len(),
        avg_oos_percent,
        price_war_risk: price_war_risk(products, config),
        stockout_pressure: stockout_pressure(avg_oos_percent, config),
        seasonality: seasonality::build(&pooled_rank(records), config.seasonality_min_months),
        analyzed_at: now,
    };
    log::debug!(
        "[Market] {} products: avg oos {:?}, price war {:?}, stockout {:?}",
        bundle.product_count,
        bundle.avg_oos_percent,
        bundle.price_war_risk,
        bundle.stockout_pressure
    );
    bundle
}

/// Mean OOS percentage across products with a computed value
fn average_oos(products: &[ProductSignalBundle]) -> Option<f64> {
    let values: Vec<f64> = products
        .iter()
        .filter_map(|p| p.stock.oos_percent)
        .collect();
    if values.is_empty() {
        return None;
    }
    Some(round1(values.iter().sum::<f64>() / values.len() as f64))
}

/// Share of products simultaneously discounting heavily and holding
/// unstable prices, among products where both figures are computable
fn price_war_risk(products: &[ProductSignalBundle], config: &AnalyticsConfig) -> RiskLevel {
    let computable: Vec<(f64, f64)> = products
        .iter()
        .filter_map(|p| Some((p.promotion.frequency_pct?, p.price.stability?)))
        .collect();
    if computable.is_empty() {
        return RiskLevel::Unknown;
    }

    let at_risk = computable
        .iter()
        .filter(|&&(freq, stability)| {
            freq >= config.promo_heavy_pct && stability <= config.low_stability
        })
        .count();
    let share = at_risk as f64 / computable.len() as f64;

    if share >= config.price_war_high_share {
        RiskLevel::High
    } else if share >= config.price_war_medium_share {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Bucket the average OOS percentage directly
fn stockout_pressure(avg_oos: Option<f64>, config: &AnalyticsConfig) -> RiskLevel {
    match avg_oos {
        None => RiskLevel::Unknown,
        Some(oos) if oos >= config.stockout_high_pct => RiskLevel::High,
        Some(oos) if oos >= config.stockout_medium_pct => RiskLevel::Medium,
        Some(_) => RiskLevel::Low,
    }
}

/// Every product's full rank history decoded and pooled
fn pooled_rank(records: &[RawProductRecord]) -> Vec<SignalPoint> {
    let mut pool: Vec<SignalPoint> = records
        .iter()
        .filter_map(|r| r.history.as_ref())
        .flat_map(|h| decode_field(h.get(TrackedField::SalesRank), TrackedField::SalesRank))
        .collect();
    pool.sort_by_key(|p| p.timestamp);
    pool
}
