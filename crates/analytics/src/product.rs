//! Per-Product Aggregator
//!
//! Composes the full signal bundle for one product: decode every tracked
//! field, window it, and run the statistical, trend, availability,
//! promotion and seasonality analyzers over the result.
//!
//! Only structurally invalid input (no identifier, no history container)
//! produces an error-status bundle; every insufficient-data condition
//! degrades to absent fields under a `complete` status. Analysis is a pure
//! function of the record and the clock, so batching callers can map it
//! over products in parallel without coordination.

use argus_core::values::{SignalPoint, Timestamp, present_values};
use argus_core::{
    PriceSignals, ProductSignalBundle, RankSignals, RawHistoryMap, RawProductRecord, SeriesBundle,
    StockSignals, TrackedField,
};
use chrono::Utc;

use crate::availability;
use crate::config::AnalyticsConfig;
use crate::decode::{decode_availability_view, decode_field};
use crate::error::{AnalyticsError, Result};
use crate::promotion;
use crate::seasonality;
use crate::stats::{money, rank_stability_score, rank_volatility_pct, round1, series_stats,
    stability_score, volatility_pct};
use crate::trend::{price_trend, rank_trend};
use crate::window::{downsample, trim_to_months};

/// Rank-trend confidence tiers by sample count
const CONFIDENCE_HIGH_SAMPLES: usize = 30;
const CONFIDENCE_MEDIUM_SAMPLES: usize = 10;
const CONFIDENCE_HIGH: f64 = 0.8;
const CONFIDENCE_MEDIUM: f64 = 0.6;
const CONFIDENCE_LOW: f64 = 0.4;

/// Analyzes one product record into a [`ProductSignalBundle`]
#[derive(Debug, Clone, Default)]
pub struct ProductAnalyzer {
    config: AnalyticsConfig,
}

impl ProductAnalyzer {
    pub fn new(config: AnalyticsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Analyze against the current clock
    pub fn analyze(&self, record: &RawProductRecord) -> ProductSignalBundle {
        self.analyze_at(record, Utc::now())
    }

    /// Analyze against an explicit clock, for deterministic windows
    pub fn analyze_at(&self, record: &RawProductRecord, now: Timestamp) -> ProductSignalBundle {
        let (asin, history) = match validate(record) {
            Ok(parts) => parts,
            Err(error) => {
                log::warn!("[Product] structural error: {error}");
                return ProductSignalBundle::structural_error(
                    record.asin.clone(),
                    error.to_string(),
                    now,
                    self.config.lookback_months,
                );
            }
        };

        let series = self.build_series(history, now);
        // Seasonality pools the full multi-year history, so it reads the
        // untrimmed rank series rather than the windowed one
        let full_rank = decode_field(history.get(TrackedField::SalesRank), TrackedField::SalesRank);

        let price = self.price_signals(&series);
        let rank = self.rank_signals(&series);
        let stock = self.stock_signals(&series);
        let promotion = promotion::detect(series.primary_price(), &series.lightning_deal, &self.config);
        let seasonality = seasonality::build(&full_rank, self.config.seasonality_min_months);
        let (position_score, position_factors) = position(&rank);

        log::debug!(
            "[Product] {asin}: price vol {:?}, rank trend {:?}, oos {:?}",
            price.volatility_pct,
            rank.trend,
            stock.oos_percent
        );

        ProductSignalBundle {
            asin: Some(asin.to_string()),
            title: record.title.clone(),
            brand: record.brand.clone(),
            status: argus_core::AnalysisStatus::Complete,
            error: None,
            series,
            price,
            rank,
            stock,
            promotion,
            seasonality,
            position_score,
            position_factors,
            analyzed_at: now,
            lookback_months: self.config.lookback_months,
        }
    }

    /// Decode, trim and downsample every tracked field
    fn build_series(&self, history: &RawHistoryMap, now: Timestamp) -> SeriesBundle {
        let window = |points: Vec<SignalPoint>| {
            let trimmed = trim_to_months(&points, self.config.lookback_months, now);
            downsample(&trimmed, self.config.max_points)
        };
        let field = |f: TrackedField| window(decode_field(history.get(f), f));

        let availability_view = decode_availability_view(history.get(TrackedField::BuyBoxPrice));

        SeriesBundle {
            sales_rank: field(TrackedField::SalesRank),
            buy_box_price: field(TrackedField::BuyBoxPrice),
            new_price: field(TrackedField::NewPrice),
            amazon_price: field(TrackedField::AmazonPrice),
            used_price: field(TrackedField::UsedPrice),
            new_offer_count: field(TrackedField::NewOfferCount),
            buy_box_availability: window(availability_view),
            lightning_deal: field(TrackedField::LightningDeal),
        }
    }

    fn price_signals(&self, series: &SeriesBundle) -> PriceSignals {
        let points = series.primary_price();
        let stats = series_stats(points);
        let values = present_values(points);
        let volatility = volatility_pct(&values, self.config.volatility_min_points);

        PriceSignals {
            current: stats.current.and_then(money),
            avg: stats.avg.and_then(money),
            min: stats.min.and_then(money),
            max: stats.max.and_then(money),
            volatility_pct: volatility,
            stability: stability_score(volatility),
            trend: price_trend(&values, self.config.trend_min_points, self.config.trend_threshold),
        }
    }

    fn rank_signals(&self, series: &SeriesBundle) -> RankSignals {
        let stats = series_stats(&series.sales_rank);
        let values = present_values(&series.sales_rank);
        let volatility = rank_volatility_pct(&values, self.config.volatility_min_points);

        let trend_confidence = if values.len() > CONFIDENCE_HIGH_SAMPLES {
            CONFIDENCE_HIGH
        } else if values.len() >= CONFIDENCE_MEDIUM_SAMPLES {
            CONFIDENCE_MEDIUM
        } else {
            CONFIDENCE_LOW
        };

        RankSignals {
            current: stats.current,
            avg: stats.avg,
            min: stats.min,
            max: stats.max,
            volatility_pct: volatility,
            stability: rank_stability_score(volatility),
            trend: rank_trend(&values, self.config.trend_min_points, self.config.trend_threshold),
            trend_confidence,
        }
    }

    /// Fallback hierarchy: explicit buy-box availability flags, then zero
    /// offer counts, then implied gaps in the price series, then gaps in
    /// the rank series
    fn stock_signals(&self, series: &SeriesBundle) -> StockSignals {
        let gap_days = self.config.stockout_gap_days;

        if let Some(stock) = availability::from_flags(&series.buy_box_availability, |p| {
            p.value.is_none_or(|v| v < 0.0)
        }) {
            log::debug!("[Availability] source: buy-box flags");
            return stock;
        }
        if let Some(stock) =
            availability::from_flags(&series.new_offer_count, |p| p.value == Some(0.0))
        {
            log::debug!("[Availability] source: offer-count flags");
            return stock;
        }
        if let Some(stock) = availability::from_gaps(series.primary_price(), gap_days) {
            log::debug!("[Availability] source: price gaps");
            return stock;
        }
        if let Some(stock) = availability::from_gaps(&series.sales_rank, gap_days) {
            log::debug!("[Availability] source: rank gaps");
            return stock;
        }
        StockSignals::unavailable()
    }
}

/// Structural validation: identifier and history container are the only
/// hard requirements
fn validate(record: &RawProductRecord) -> Result<(&str, &RawHistoryMap)> {
    let asin = record
        .asin
        .as_deref()
        .filter(|a| !a.trim().is_empty())
        .ok_or(AnalyticsError::MissingIdentifier)?;
    let history = record.history.as_ref().ok_or_else(|| AnalyticsError::MissingHistory {
        asin: asin.to_string(),
    })?;
    Ok((asin, history))
}

/// Competitive position from average rank: `10 - log10(rank)` clamped to
/// [1, 10]; 0.0 when the average rank is unknown
fn position(rank: &RankSignals) -> (f64, Vec<String>) {
    match rank.avg {
        Some(avg) if avg > 0.0 => {
            let score = round1((10.0 - avg.log10()).clamp(1.0, 10.0));
            let factors = vec![format!("average sales rank {:.0}", avg)];
            (score, factors)
        }
        _ => (0.0, vec!["no sales rank history".to_string()]),
    }
}
