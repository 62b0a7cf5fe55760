//! Argus Core Domain
//!
//! Pure domain types for the Argus marketplace signal engine.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    AnalysisStatus,
    FieldSemantics,
    MarketSignalBundle,
    PriceSignals,
    PriceTrend,
    ProductSignalBundle,
    PromotionSignals,
    RankSignals,
    RankTrend,
    // Input contract
    RawHistoryMap,
    RawProductRecord,
    RiskLevel,
    SeasonalitySignals,
    // Decoded chart series
    SeriesBundle,
    StockSignals,
    TrackedField,
};
pub use values::{
    SERIES_EPOCH_UNIX_SECS, SignalPoint, Timestamp, present_points, present_values,
    timestamp_from_offset,
};
