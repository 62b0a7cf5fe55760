//! Argus Analytics Engine
//!
//! Derives viability signals from raw marketplace telemetry:
//! - Sparse `[offset, value]` series decoding with per-field sentinel rules
//! - Trailing-window trimming and bounded downsampling
//! - Price and rank statistics (summary, volatility, stability, trend)
//! - Out-of-stock inference from flags or observation gaps
//! - Rolling-baseline promotion detection with deal-flag override
//! - Calendar-month seasonality pooled across years
//! - Per-product and market-level aggregation
//!
//! Every stage is a pure, synchronous transformation over immutable input:
//! no I/O, no shared state, no panics on malformed data. Structural input
//! errors surface as error-status bundles; everything else degrades to
//! absent fields.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use argus_analytics::{AnalyticsConfig, ProductAnalyzer, market};
//!
//! let analyzer = ProductAnalyzer::new(AnalyticsConfig::default());
//! let bundles: Vec<_> = records.iter().map(|r| analyzer.analyze(r)).collect();
//! let market = market::aggregate(&bundles, &records, analyzer.config());
//! ```

pub mod availability;
pub mod config;
pub mod decode;
pub mod error;
pub mod market;
pub mod product;
pub mod promotion;
pub mod seasonality;
pub mod stats;
pub mod trend;
pub mod window;

// Re-export main types
pub use config::AnalyticsConfig;
pub use decode::{DecodeOptions, decode_availability_view, decode_field, decode_series};
pub use error::{AnalyticsError, Result};
pub use product::ProductAnalyzer;
pub use stats::SeriesStats;
pub use trend::Trend;
