mod bundle;
mod field;
mod record;
mod series;
mod signals;

pub use bundle::{AnalysisStatus, MarketSignalBundle, ProductSignalBundle};
pub use field::{FieldSemantics, TrackedField};
pub use record::{RawHistoryMap, RawProductRecord};
pub use series::SeriesBundle;
pub use signals::{
    PriceSignals, PriceTrend, PromotionSignals, RankSignals, RankTrend, RiskLevel,
    SeasonalitySignals, StockSignals,
};
