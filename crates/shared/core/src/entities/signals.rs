use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a price series over the observed window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTrend {
    Up,
    Down,
    #[default]
    Stable,
}

/// Direction of a rank series; polarity is inverted because a rising
/// sales rank means the product is selling worse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankTrend {
    Improving,
    Declining,
    #[default]
    Flat,
}

/// Categorical risk bucket used by market-level rollups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    #[default]
    Unknown,
}

/// Price signal summary for one product.
///
/// Monetary figures are `Decimal` rounded to 2 dp; dispersion figures stay
/// `f64`. Volatility and stability are either both present or both absent:
/// stability is only defined when volatility was computable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceSignals {
    /// Latest present price, scanning from the end of the series backward
    pub current: Option<Decimal>,
    pub avg: Option<Decimal>,
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
    /// Coefficient of variation as a percentage, 1 dp
    pub volatility_pct: Option<f64>,
    /// `1 - volatility/100`, clamped to [0, 1]
    pub stability: Option<f64>,
    pub trend: PriceTrend,
}

/// Sales-rank signal summary for one product
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankSignals {
    pub current: Option<f64>,
    pub avg: Option<f64>,
    /// Best (lowest) rank observed
    pub min: Option<f64>,
    /// Worst (highest) rank observed
    pub max: Option<f64>,
    /// Log-domain dispersion percentage, clamped to [0, 150]
    pub volatility_pct: Option<f64>,
    pub stability: Option<f64>,
    pub trend: RankTrend,
    /// Descriptive confidence in the trend label, by sample count.
    /// Annotation only; it never gates computation.
    pub trend_confidence: f64,
}

/// Out-of-stock exposure for one product
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StockSignals {
    /// Share of observed wall-clock time spent unavailable, 0-100
    pub oos_percent: Option<f64>,
    /// Longest single unavailable stretch, whole elapsed days
    pub longest_oos_days: Option<u32>,
}

impl StockSignals {
    /// Both fields absent: fewer than 2 usable points or a degenerate span
    pub const fn unavailable() -> Self {
        Self {
            oos_percent: None,
            longest_oos_days: None,
        }
    }
}

/// Promotional cadence for one product
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PromotionSignals {
    /// Share of observed time spent in promotion, percent, 1 dp.
    /// Lightning-deal flags supersede the rolling-median estimate when any
    /// deal activity exists.
    pub frequency_pct: Option<f64>,
    /// Mean episode discount depth, percent, 1 dp (always rolling-median)
    pub avg_drop_pct: Option<f64>,
}

/// Recurring calendar-month demand pattern pooled across all years
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalitySignals {
    /// Spread of the monthly index (max - min); absent under 2 valid slots
    pub score: Option<f64>,
    /// Up to 3 strongest calendar months, 1-12
    pub peak_months: Vec<u32>,
    /// Up to 3 weakest calendar months, 1-12
    pub trough_months: Vec<u32>,
    /// Demand index per calendar month, 100 = average across months;
    /// all-null when the history gate is not met
    pub monthly_index: [Option<f64>; 12],
}

impl Default for SeasonalitySignals {
    fn default() -> Self {
        Self::insufficient_history()
    }
}

impl SeasonalitySignals {
    /// The gated result: fewer distinct months of history than required
    pub fn insufficient_history() -> Self {
        Self {
            score: None,
            peak_months: Vec::new(),
            trough_months: Vec::new(),
            monthly_index: [None; 12],
        }
    }

    /// True when the history gate was met and an index exists
    pub fn is_available(&self) -> bool {
        self.monthly_index.iter().any(Option::is_some)
    }
}
