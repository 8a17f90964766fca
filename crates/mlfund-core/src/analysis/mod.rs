//! Derived analysis over cached financial records.
//!
//! Nothing here touches the store or the network: every function takes a
//! record (or a set of per-company metrics) and returns plain values, so
//! the same snapshot always yields the same analysis.
//!
//! | Step | Function |
//! |------|----------|
//! | Clean labels and numeric text | [`clean_metric_name`], [`parse_amount`] |
//! | One average per metric | [`metric_means`] |
//! | Pros / cons around a threshold | [`categorize`] |
//! | Relative score across companies | [`financial_scores`] |

pub mod cleaning;
pub mod metrics;
pub mod scoring;
mod stats;

use serde::Serialize;

use crate::{FinancialRecord, ValidationError};

pub use cleaning::{clean_metric_name, parse_amount};
pub use metrics::{categorize, metric_means, Metric, MetricCategories, DEFAULT_THRESHOLD};
pub use scoring::{financial_scores, FinancialScore, MIN_COMPANIES};

/// Counts reported next to the categories.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    pub total_metrics: usize,
    pub pros_count: usize,
    pub cons_count: usize,
    /// Relative score in `0..=100`; `None` when the company could not be
    /// compared with at least one other cached company.
    pub financial_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyAnalysis {
    pub threshold: f64,
    pub categories: MetricCategories,
    pub summary: AnalysisSummary,
}

/// Reject thresholds that would make every comparison meaningless.
pub fn validate_threshold(threshold: f64) -> Result<f64, ValidationError> {
    if threshold.is_finite() {
        Ok(threshold)
    } else {
        Err(ValidationError::InvalidThreshold {
            value: threshold.to_string(),
        })
    }
}

/// Categorise one record and attach its relative score, if any.
pub fn analyze_record(
    record: &FinancialRecord,
    threshold: f64,
    financial_score: Option<f64>,
) -> CompanyAnalysis {
    let metrics = metric_means(record);
    let categories = categorize(&metrics, threshold);
    let summary = AnalysisSummary {
        total_metrics: metrics.len(),
        pros_count: categories.pros.len(),
        cons_count: categories.cons.len(),
        financial_score,
    };

    CompanyAnalysis {
        threshold,
        categories,
        summary,
    }
}
