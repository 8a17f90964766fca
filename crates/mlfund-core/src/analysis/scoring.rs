//! Relative financial health score across cached companies.
//!
//! Every metric shared by all scored companies is standardised, the
//! companies are projected onto the first principal component of those
//! standardised metrics, and the projections are rescaled to `0..=100`.

use std::collections::BTreeMap;

use serde::Serialize;

use super::stats::{dot, norm, z_scores};
use crate::Symbol;

/// Below this many companies there is no population to compare against.
pub const MIN_COMPANIES: usize = 2;

const MAX_ITERATIONS: usize = 500;
const TOLERANCE: f64 = 1e-10;
/// Score given to every company when the projection cannot separate them.
const MIDPOINT: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialScore {
    pub symbol: Symbol,
    pub score: f64,
}

/// Score each company relative to the others.
///
/// Empty when fewer than [`MIN_COMPANIES`] are given or when they share no
/// metric. The component is oriented so that higher metrics raise the
/// score on balance.
pub fn financial_scores(companies: &[(Symbol, BTreeMap<String, f64>)]) -> Vec<FinancialScore> {
    if companies.len() < MIN_COMPANIES {
        return Vec::new();
    }

    let features: Vec<&String> = companies[0]
        .1
        .keys()
        .filter(|name| companies[1..].iter().all(|(_, m)| m.contains_key(*name)))
        .collect();
    if features.is_empty() {
        log::debug!(
            "no metric shared by {} companies; skipping scores",
            companies.len()
        );
        return Vec::new();
    }

    // rows are companies, columns are features
    let columns: Vec<Vec<f64>> = features
        .iter()
        .map(|name| {
            let raw: Vec<f64> = companies.iter().map(|(_, m)| m[*name]).collect();
            z_scores(&raw)
        })
        .collect();
    let rows: Vec<Vec<f64>> = (0..companies.len())
        .map(|row| columns.iter().map(|column| column[row]).collect())
        .collect();

    let projections: Vec<f64> = match first_component(&columns) {
        Some(component) => rows.iter().map(|row| dot(row, &component)).collect(),
        None => vec![0.0; rows.len()],
    };

    rescale(&projections)
        .into_iter()
        .zip(companies)
        .map(|(score, (symbol, _))| FinancialScore {
            symbol: symbol.clone(),
            score,
        })
        .collect()
}

/// Leading eigenvector of the covariance of standardised `columns`, found
/// by power iteration. `None` when every column is constant.
fn first_component(columns: &[Vec<f64>]) -> Option<Vec<f64>> {
    let dims = columns.len();
    let samples = columns.first().map_or(0, Vec::len) as f64;
    let covariance: Vec<Vec<f64>> = columns
        .iter()
        .map(|a| columns.iter().map(|b| dot(a, b) / samples).collect())
        .collect();

    // uneven start so it is not orthogonal to a symmetric component
    let mut vector: Vec<f64> = (1..=dims).map(|i| i as f64).collect();
    let start_norm = norm(&vector);
    vector.iter_mut().for_each(|v| *v /= start_norm);

    for _ in 0..MAX_ITERATIONS {
        let mut next: Vec<f64> = covariance.iter().map(|row| dot(row, &vector)).collect();
        let length = norm(&next);
        if length < TOLERANCE {
            return None;
        }
        next.iter_mut().for_each(|v| *v /= length);

        let delta: f64 = next
            .iter()
            .zip(&vector)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max);
        vector = next;
        if delta < TOLERANCE {
            break;
        }
    }

    if vector.iter().sum::<f64>() < 0.0 {
        vector.iter_mut().for_each(|v| *v = -*v);
    }
    Some(vector)
}

fn rescale(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    if !range.is_finite() || range < TOLERANCE {
        return vec![MIDPOINT; values.len()];
    }
    values.iter().map(|v| (v - min) / range * 100.0).collect()
}
