//! Per-company metric extraction and pro/con categorisation.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use super::cleaning::{clean_metric_name, parse_amount};
use super::stats::mean;
use crate::FinancialRecord;

/// Cut-off between a weak and a strong metric, in percent-like units.
pub const DEFAULT_THRESHOLD: f64 = 10.0;

/// A named metric and the value it was judged on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub name: String,
    pub value: f64,
}

/// Metrics split around a threshold.
///
/// `pros` are ordered strongest first, `cons` weakest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricCategories {
    pub pros: Vec<Metric>,
    pub cons: Vec<Metric>,
    pub neutral: Vec<Metric>,
}

/// Average every numeric field of a record into one value per metric.
///
/// Series average over their points, numeric text is cleaned first and
/// anything non-numeric is skipped. Names are snake_case; when two sections
/// share a field name the first section in statement order wins.
pub fn metric_means(record: &FinancialRecord) -> BTreeMap<String, f64> {
    let mut metrics = BTreeMap::new();
    let sections = [
        &record.income_statement,
        &record.balance_sheet,
        &record.cash_flow,
    ];
    for statement in sections.into_iter().flatten() {
        collect_fields(&statement.fields, &mut metrics);
    }

    for (name, value) in &record.extra {
        match value {
            Value::Object(section) => collect_fields(section, &mut metrics),
            other => insert_metric(name, other, &mut metrics),
        }
    }
    metrics
}

fn collect_fields(fields: &Map<String, Value>, metrics: &mut BTreeMap<String, f64>) {
    for (name, value) in fields {
        insert_metric(name, value, metrics);
    }
}

fn insert_metric(name: &str, value: &Value, metrics: &mut BTreeMap<String, f64>) {
    let key = clean_metric_name(name);
    if key.is_empty() || metrics.contains_key(&key) {
        return;
    }
    if let Some(average) = value_mean(value) {
        metrics.insert(key, average);
    }
}

fn value_mean(value: &Value) -> Option<f64> {
    match value {
        Value::Array(items) => {
            let values: Vec<f64> = items.iter().filter_map(point_value).collect();
            mean(&values)
        }
        other => scalar(other),
    }
}

/// A series element is either a bare scalar or a `{year, value}` point.
fn point_value(item: &Value) -> Option<f64> {
    match item {
        Value::Object(point) => point.get("value").and_then(scalar),
        other => scalar(other),
    }
}

fn scalar(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64().filter(|v| v.is_finite()),
        Value::String(text) => parse_amount(text),
        _ => None,
    }
}

/// Split metrics into pros, cons and neutral around `threshold`.
///
/// Zero averages carry no signal and are skipped. Fractions (magnitude
/// below one) are read as ratios and scaled to percent before comparison.
pub fn categorize(metrics: &BTreeMap<String, f64>, threshold: f64) -> MetricCategories {
    let mut categories = MetricCategories::default();

    for (name, &raw) in metrics {
        if raw == 0.0 || !raw.is_finite() {
            continue;
        }
        let value = if raw.abs() < 1.0 { raw * 100.0 } else { raw };
        let metric = Metric {
            name: name.clone(),
            value,
        };
        match value.partial_cmp(&threshold) {
            Some(Ordering::Greater) => categories.pros.push(metric),
            Some(Ordering::Less) => categories.cons.push(metric),
            Some(Ordering::Equal) => categories.neutral.push(metric),
            None => {}
        }
    }

    categories.pros.sort_by(|a, b| b.value.total_cmp(&a.value));
    categories.cons.sort_by(|a, b| a.value.total_cmp(&b.value));
    categories
}
