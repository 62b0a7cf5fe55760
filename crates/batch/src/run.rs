//! Batch Analyzer
//!
//! Runs the per-product analysis as an embarrassingly parallel map: one
//! blocking task per product, bounded by a semaphore, results collected in
//! a concurrent map keyed by asin. Structural failures stay local to their
//! product; a batch never aborts.

use argus_analytics::{AnalyticsConfig, ProductAnalyzer, market};
use argus_core::{AnalysisStatus, ProductSignalBundle, RawProductRecord};
use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use uuid::Uuid;

use crate::report::{AnalysisRun, BatchReport};

/// Configuration for batch analysis
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Engine configuration shared by every product
    pub analytics: AnalyticsConfig,
    /// Products analyzed concurrently
    pub max_concurrency: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            analytics: AnalyticsConfig::default(),
            max_concurrency: 8,
        }
    }
}

/// Orchestrates parallel per-product analysis and the market rollup
#[derive(Debug, Clone, Default)]
pub struct BatchAnalyzer {
    config: BatchConfig,
}

impl BatchAnalyzer {
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    /// Analyze a batch of product records into a [`BatchReport`].
    ///
    /// Products keep their input order in the report. Duplicate asins
    /// collapse to a single bundle (last write wins, logged).
    pub async fn analyze_products(&self, records: Vec<RawProductRecord>) -> BatchReport {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        log::info!(
            "[Batch] run {run_id}: analyzing {} products (concurrency {})",
            records.len(),
            self.config.max_concurrency
        );

        let records = Arc::new(records);
        let analyzer = Arc::new(ProductAnalyzer::new(self.config.analytics.clone()));
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrency.max(1)));
        let results: Arc<DashMap<String, (usize, ProductSignalBundle)>> = Arc::new(DashMap::new());

        let mut tasks = JoinSet::new();
        for index in 0..records.len() {
            let records = Arc::clone(&records);
            let analyzer = Arc::clone(&analyzer);
            let semaphore = Arc::clone(&semaphore);
            let results = Arc::clone(&results);

            tasks.spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return; // semaphore closed: run is shutting down
                };
                let joined =
                    tokio::task::spawn_blocking(move || analyzer.analyze(&records[index])).await;
                let bundle = match joined {
                    Ok(bundle) => bundle,
                    Err(e) => {
                        log::error!("[Batch] analysis task for product {index} failed: {e}");
                        return;
                    }
                };

                let key = bundle
                    .asin
                    .clone()
                    .unwrap_or_else(|| format!("unidentified-{index}"));
                if results.insert(key.clone(), (index, bundle)).is_some() {
                    log::warn!("[Batch] duplicate asin {key}: keeping the later analysis");
                }
            });
        }
        while tasks.join_next().await.is_some() {}

        let mut products: Vec<(usize, ProductSignalBundle)> = results
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        products.sort_by_key(|(index, _)| *index);
        let products: Vec<ProductSignalBundle> =
            products.into_iter().map(|(_, bundle)| bundle).collect();

        let finished_at = Utc::now();
        let market = market::aggregate_at(&products, &records, &self.config.analytics, finished_at);
        let error_count = products
            .iter()
            .filter(|p| p.status == AnalysisStatus::Error)
            .count();
        log::info!(
            "[Batch] run {run_id}: {} bundles, {error_count} errors",
            products.len()
        );

        BatchReport {
            run: AnalysisRun {
                run_id,
                started_at,
                finished_at,
                product_count: records.len(),
                error_count,
            },
            products,
            market,
        }
    }
}
