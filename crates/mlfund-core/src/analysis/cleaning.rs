//! Normalisation of statement labels and numeric cells.
//!
//! Statement exports mix plain numbers with spreadsheet text such as
//! `"₹1,200.50"`, `"15%"` or `"3.2 crore"`; these helpers turn both into
//! comparable `f64`s under snake_case names.

/// Indian and western magnitude suffixes, checked as whole words.
const UNIT_MULTIPLIERS: [(&str, f64); 6] = [
    ("crore", 1e7),
    ("cr", 1e7),
    ("lakh", 1e5),
    ("lac", 1e5),
    ("thousand", 1e3),
    ("k", 1e3),
];

const CURRENCY_MARKERS: [&str; 3] = ["₹", "rs.", "inr"];

/// `"Net Profit Margin (%)"` becomes `"net_profit_margin"`.
pub fn clean_metric_name(raw: &str) -> String {
    let mut name = String::with_capacity(raw.len());
    for ch in raw.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            name.push(ch.to_ascii_lowercase());
        } else if !name.is_empty() && !name.ends_with('_') {
            name.push('_');
        }
    }
    while name.ends_with('_') {
        name.pop();
    }
    name
}

/// Parse a numeric cell; `None` when the text is not a finite amount.
///
/// Percentages become fractions (`"15%"` is `0.15`), magnitude words are
/// multiplied out and currency markers and thousands separators dropped.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let mut text = raw.trim().to_lowercase();
    for marker in CURRENCY_MARKERS {
        text = text.replace(marker, "");
    }
    text.retain(|ch| ch != ',');
    let mut text = text.trim();

    let mut divisor = 1.0;
    if let Some(stripped) = text.strip_suffix('%') {
        text = stripped.trim_end();
        divisor = 100.0;
    }

    if let Ok(value) = text.parse::<f64>() {
        return finite(value / divisor);
    }

    let split = text.find(|ch: char| ch.is_alphabetic())?;
    let (number, unit) = text.split_at(split);
    let multiplier = UNIT_MULTIPLIERS
        .iter()
        .find(|(name, _)| *name == unit.trim())
        .map(|(_, multiplier)| *multiplier)?;

    let value = number.trim().parse::<f64>().ok()?;
    finite(value * multiplier / divisor)
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
