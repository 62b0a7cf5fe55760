//! Argus Batch Orchestration
//!
//! The only async crate in the workspace. Maps the pure per-product
//! analyzer over a batch of records in parallel (the engine is stateless,
//! so products need no coordination), then rolls the results up into one
//! market bundle.

pub mod report;
pub mod run;

// Re-export main types
pub use report::{AnalysisRun, BatchReport};
pub use run::{BatchAnalyzer, BatchConfig};
