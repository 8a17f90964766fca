use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub const REVENUE_SERIES: &str = "revenue_series";

/// Financial statements for one company, as returned by `/financials/{symbol}`.
///
/// Only the section names are typed; their contents are carried through
/// as-is for the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_statement: Option<Statement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance_sheet: Option<Statement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cash_flow: Option<Statement>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FinancialRecord {
    /// Yearly revenue from the income statement, empty when absent.
    pub fn revenue_series(&self) -> Vec<SeriesPoint> {
        self.income_statement
            .as_ref()
            .map(|statement| statement.series(REVENUE_SERIES))
            .unwrap_or_default()
    }
}

/// A single statement section (income, balance sheet, cash flow).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Statement {
    pub fields: Map<String, Value>,
}

impl Statement {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Decode the named field as a `[{year, value}]` time series.
    ///
    /// A missing field yields an empty series. A field that is present but
    /// malformed also yields an empty series and is logged.
    pub fn series(&self, name: &str) -> Vec<SeriesPoint> {
        let Some(raw) = self.fields.get(name) else {
            return Vec::new();
        };

        match Vec::<SeriesPoint>::deserialize(raw) {
            Ok(points) => points,
            Err(error) => {
                log::warn!("ignoring malformed series '{name}': {error}");
                Vec::new()
            }
        }
    }
}

/// One observation of a yearly series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    #[serde(deserialize_with = "de_year")]
    pub year: i32,
    pub value: f64,
}

/// Years arrive either as integers or as the column labels of the source
/// spreadsheet, e.g. `2023` or `"2023"`.
fn de_year<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Value = Deserialize::deserialize(deserializer)?;
    match value {
        Value::Number(num) => num
            .as_i64()
            .and_then(|year| i32::try_from(year).ok())
            .ok_or_else(|| serde::de::Error::custom(format!("year out of range: {num}"))),
        Value::String(s) => s
            .trim()
            .parse::<i32>()
            .map_err(|_| serde::de::Error::custom(format!("year is not numeric: '{s}'"))),
        other => Err(serde::de::Error::custom(format!(
            "invalid type for year: {other}"
        ))),
    }
}
