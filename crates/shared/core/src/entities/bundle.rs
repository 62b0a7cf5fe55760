use serde::{Deserialize, Serialize};

use super::{
    PriceSignals, PromotionSignals, RankSignals, RiskLevel, SeasonalitySignals, SeriesBundle,
    StockSignals,
};
use crate::values::Timestamp;

/// Outcome of one product analysis.
///
/// `Error` is reserved for structurally invalid input (missing identifier
/// or history container). Insufficient data is not an error: it degrades to
/// absent signal fields under `Complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Complete,
    Error,
}

/// Every derived signal for one product, computed in a single pass.
///
/// Created fresh on each analysis invocation; nothing here is ever mutated
/// or persisted by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSignalBundle {
    /// Marketplace identifier; absent only on identifier-missing errors
    pub asin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub status: AnalysisStatus,
    /// Populated only when `status` is `Error`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Decoded, trimmed, downsampled series for charting
    pub series: SeriesBundle,
    pub price: PriceSignals,
    pub rank: RankSignals,
    pub stock: StockSignals,
    pub promotion: PromotionSignals,
    pub seasonality: SeasonalitySignals,
    /// Coarse competitive position from average rank: 10 - log10(rank),
    /// clamped to [1, 10]; 0.0 when average rank is unknown
    pub position_score: f64,
    /// Human-readable notes behind the position score
    pub position_factors: Vec<String>,
    /// Instant this bundle was computed
    pub analyzed_at: Timestamp,
    /// Trailing window the window-based signals were computed over
    pub lookback_months: u32,
}

impl ProductSignalBundle {
    /// Empty bundle for a structurally invalid record; signal groups stay
    /// at their absent defaults so consumers can render uniformly
    pub fn structural_error(
        asin: Option<String>,
        message: impl Into<String>,
        analyzed_at: Timestamp,
        lookback_months: u32,
    ) -> Self {
        Self {
            asin,
            title: None,
            brand: None,
            status: AnalysisStatus::Error,
            error: Some(message.into()),
            series: SeriesBundle::default(),
            price: PriceSignals::default(),
            rank: RankSignals::default(),
            stock: StockSignals::unavailable(),
            promotion: PromotionSignals::default(),
            seasonality: SeasonalitySignals::insufficient_history(),
            position_score: 0.0,
            position_factors: Vec::new(),
            analyzed_at,
            lookback_months,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status == AnalysisStatus::Complete
    }
}

/// Market-level rollup across a list of product bundles.
///
/// Computed on demand from the full list; not incrementally updatable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSignalBundle {
    /// Products the rollup was computed from (error bundles included)
    pub product_count: usize,
    /// Mean OOS percentage across products with a computed value
    pub avg_oos_percent: Option<f64>,
    /// Share of products showing both heavy promotion and low price
    /// stability, bucketed
    pub price_war_risk: RiskLevel,
    /// Average OOS percentage, bucketed
    pub stockout_pressure: RiskLevel,
    /// Seasonality over every product's rank history pooled together --
    /// a market-wide pattern, not an average of per-product patterns
    pub seasonality: SeasonalitySignals,
    pub analyzed_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_structural_error_bundle() {
        let bundle = ProductSignalBundle::structural_error(
            Some("B00TEST".to_string()),
            "missing raw history container",
            Utc::now(),
            12,
        );

        assert_eq!(bundle.status, AnalysisStatus::Error);
        assert!(!bundle.is_complete());
        assert_eq!(
            bundle.error.as_deref(),
            Some("missing raw history container")
        );
        assert!(bundle.series.is_empty());
        assert!(bundle.price.current.is_none());
        assert_eq!(bundle.position_score, 0.0);
    }

    #[test]
    fn test_status_wire_form() {
        assert_eq!(
            serde_json::to_string(&AnalysisStatus::Complete).unwrap(),
            "\"complete\""
        );
        assert_eq!(
            serde_json::to_string(&AnalysisStatus::Error).unwrap(),
            "\"error\""
        );
    }
}
