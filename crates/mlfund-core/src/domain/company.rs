use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Symbol;

/// One row of the `/companies` listing.
///
/// `symbol` is kept exactly as listed; it is the key used to request the
/// company's financials.
///
/// Fields the core does not interpret are kept in `extra` and serialized
/// back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySummary {
    pub symbol: Symbol,
    pub company_name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CompanySummary {
    pub fn new(symbol: Symbol, company_name: impl Into<String>) -> Self {
        Self {
            symbol,
            company_name: company_name.into(),
            extra: Map::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.extra.insert(name.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_fields_pass_through() {
        let raw = json!({
            "symbol": "infy.ns",
            "company_name": "Infosys",
            "sector": "IT",
            "weight": 5.2
        });

        let company: CompanySummary = serde_json::from_value(raw).expect("valid company");
        assert_eq!(company.symbol.as_str(), "infy.ns");
        assert_eq!(company.extra.get("sector"), Some(&json!("IT")));

        let back = serde_json::to_value(&company).expect("serializable");
        assert_eq!(back["weight"], json!(5.2));
        assert_eq!(back["symbol"], json!("infy.ns"));
    }

    #[test]
    fn missing_company_name_is_rejected() {
        let result = serde_json::from_value::<CompanySummary>(json!({ "symbol": "AAPL" }));
        assert!(result.is_err());
    }
}
