//! Slice statistics shared by the analysis routines.

/// Mean of a slice, `None` when empty.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation, `None` when empty.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    let mean_val = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - mean_val).powi(2)).sum();
    Some((sum_sq / values.len() as f64).sqrt())
}

/// Standardise to zero mean and unit variance.
///
/// A constant column carries no information and becomes all zeros.
pub fn z_scores(values: &[f64]) -> Vec<f64> {
    match (mean(values), std_dev(values)) {
        (Some(mean_val), Some(std)) if std > f64::EPSILON => {
            values.iter().map(|v| (v - mean_val) / std).collect()
        }
        _ => vec![0.0; values.len()],
    }
}

pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

pub fn norm(values: &[f64]) -> f64 {
    dot(values, values).sqrt()
}
