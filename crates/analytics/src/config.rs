//! Engine Configuration
//!
//! Every threshold the engine uses lives here as a named constant, with an
//! `AnalyticsConfig` carrying the tunable subset. The magic numbers are
//! deliberate simplifications inherited from the signal definitions (coarse,
//! explainable heuristics) and are not meant to be statistically optimal.

/// Trailing analysis window, in approximate 30-day months
pub const DEFAULT_LOOKBACK_MONTHS: u32 = 12;

/// Point budget per decoded series after downsampling
pub const DEFAULT_MAX_POINTS: usize = 500;

/// Minimum present values before any volatility figure is reported
pub const DEFAULT_VOLATILITY_MIN_POINTS: usize = 10;

/// Minimum values before the trend classifier leaves its neutral label
pub const DEFAULT_TREND_MIN_POINTS: usize = 4;

/// Relative half-over-half change needed to call a trend
pub const DEFAULT_TREND_THRESHOLD: f64 = 0.05;

/// Inter-point gap treated as an implied stockout span
pub const DEFAULT_STOCKOUT_GAP_DAYS: i64 = 7;

/// Trailing window the rolling promotion baseline is computed over
pub const DEFAULT_PROMO_WINDOW_DAYS: i64 = 30;

/// Minimum preceding points inside the window before a baseline exists
pub const DEFAULT_PROMO_MIN_WINDOW_POINTS: usize = 4;

/// Relative drop below baseline that marks a point as in promotion
pub const DEFAULT_PROMO_DROP_THRESHOLD: f64 = 0.10;

/// Shortest price-drop episode that counts as a promotion
pub const DEFAULT_PROMO_MIN_EPISODE_DAYS: i64 = 5;

/// Minimum present price points before promotion cadence is reported
pub const DEFAULT_PROMO_MIN_PRICE_POINTS: usize = 10;

/// Distinct calendar months of history required for a seasonality index
pub const DEFAULT_SEASONALITY_MIN_MONTHS: usize = 6;

/// Promotion frequency (percent) that counts as heavy discounting
pub const DEFAULT_PROMO_HEAVY_PCT: f64 = 15.0;

/// Price stability at or below this counts as unstable pricing
pub const DEFAULT_LOW_STABILITY: f64 = 0.6;

/// Share of at-risk products that buckets price-war risk as High
pub const DEFAULT_PRICE_WAR_HIGH_SHARE: f64 = 0.5;

/// Share of at-risk products that buckets price-war risk as Medium
pub const DEFAULT_PRICE_WAR_MEDIUM_SHARE: f64 = 0.25;

/// Average OOS percentage that buckets stockout pressure as High
pub const DEFAULT_STOCKOUT_HIGH_PCT: f64 = 15.0;

/// Average OOS percentage that buckets stockout pressure as Medium
pub const DEFAULT_STOCKOUT_MEDIUM_PCT: f64 = 7.0;

/// Configuration for the signal-extraction engine
#[derive(Debug, Clone)]
pub struct AnalyticsConfig {
    /// Trailing window for the window-based signals (30-day months)
    pub lookback_months: u32,
    /// Downsampling budget per series
    pub max_points: usize,
    /// Minimum present values for volatility/stability
    pub volatility_min_points: usize,
    /// Minimum values for a trend label
    pub trend_min_points: usize,
    /// Relative change threshold for a trend label
    pub trend_threshold: f64,
    /// Gap treated as an implied stockout (days)
    pub stockout_gap_days: i64,
    /// Rolling promotion baseline window (days)
    pub promo_window_days: i64,
    /// Minimum preceding points for a promotion baseline
    pub promo_min_window_points: usize,
    /// Relative drop below baseline marking a promotion point
    pub promo_drop_threshold: f64,
    /// Episode duration floor (days)
    pub promo_min_episode_days: i64,
    /// Optional episode duration cap (days); excludes long clearance
    /// events from promotion cadence when set
    pub promo_max_episode_days: Option<i64>,
    /// Minimum present price points for promotion cadence
    pub promo_min_price_points: usize,
    /// Distinct calendar months required for seasonality
    pub seasonality_min_months: usize,
    /// Promotion frequency counting toward price-war risk (percent)
    pub promo_heavy_pct: f64,
    /// Stability at or below this counts toward price-war risk
    pub low_stability: f64,
    /// At-risk share bucketing price-war risk as High
    pub price_war_high_share: f64,
    /// At-risk share bucketing price-war risk as Medium
    pub price_war_medium_share: f64,
    /// Average OOS bucketing stockout pressure as High (percent)
    pub stockout_high_pct: f64,
    /// Average OOS bucketing stockout pressure as Medium (percent)
    pub stockout_medium_pct: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            lookback_months: DEFAULT_LOOKBACK_MONTHS,
            max_points: DEFAULT_MAX_POINTS,
            volatility_min_points: DEFAULT_VOLATILITY_MIN_POINTS,
            trend_min_points: DEFAULT_TREND_MIN_POINTS,
            trend_threshold: DEFAULT_TREND_THRESHOLD,
            stockout_gap_days: DEFAULT_STOCKOUT_GAP_DAYS,
            promo_window_days: DEFAULT_PROMO_WINDOW_DAYS,
            promo_min_window_points: DEFAULT_PROMO_MIN_WINDOW_POINTS,
            promo_drop_threshold: DEFAULT_PROMO_DROP_THRESHOLD,
            promo_min_episode_days: DEFAULT_PROMO_MIN_EPISODE_DAYS,
            promo_max_episode_days: None,
            promo_min_price_points: DEFAULT_PROMO_MIN_PRICE_POINTS,
            seasonality_min_months: DEFAULT_SEASONALITY_MIN_MONTHS,
            promo_heavy_pct: DEFAULT_PROMO_HEAVY_PCT,
            low_stability: DEFAULT_LOW_STABILITY,
            price_war_high_share: DEFAULT_PRICE_WAR_HIGH_SHARE,
            price_war_medium_share: DEFAULT_PRICE_WAR_MEDIUM_SHARE,
            stockout_high_pct: DEFAULT_STOCKOUT_HIGH_PCT,
            stockout_medium_pct: DEFAULT_STOCKOUT_MEDIUM_PCT,
        }
    }
}
