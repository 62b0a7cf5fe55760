//! Batch run records

use argus_core::values::Timestamp;
use argus_core::{MarketSignalBundle, ProductSignalBundle};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bookkeeping for one batch analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRun {
    /// Run identifier
    pub run_id: Uuid,
    pub started_at: Timestamp,
    pub finished_at: Timestamp,
    /// Products submitted to the run
    pub product_count: usize,
    /// Products that ended with an error status
    pub error_count: usize,
}

impl AnalysisRun {
    /// Wall-clock duration of the run
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// Full output of one batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub run: AnalysisRun,
    /// Per-product bundles, in input order (one per distinct asin)
    pub products: Vec<ProductSignalBundle>,
    /// Market rollup across the whole batch
    pub market: MarketSignalBundle,
}
