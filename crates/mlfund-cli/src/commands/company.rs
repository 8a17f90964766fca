use mlfund_core::analysis::validate_threshold;
use mlfund_core::store::selectors;
use mlfund_core::{
    AppState, CompanyAnalysis, Dispatcher, FinancialRecord, ResourceState, SeriesPoint, Symbol,
};
use serde::Serialize;

use crate::cli::CompanyArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct CompanyResponseData<'a> {
    symbol: &'a Symbol,
    #[serde(flatten)]
    resource: ResourceState,
    revenue_series: Vec<SeriesPoint>,
    financials: Option<&'a FinancialRecord>,
    analysis: Option<CompanyAnalysis>,
}

pub async fn run(args: &CompanyArgs, dispatcher: &Dispatcher) -> Result<CommandResult, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let threshold = validate_threshold(args.threshold)?;
    let state = dispatcher.fetch_financials(symbol.clone()).await;
    response(&state, &symbol, threshold)
}

fn response(
    state: &AppState,
    symbol: &Symbol,
    threshold: f64,
) -> Result<CommandResult, CliError> {
    let resource = selectors::financials_status(state, symbol);
    let record = selectors::financials(state, symbol);
    let status = resource.status;
    let data = serde_json::to_value(CompanyResponseData {
        symbol,
        resource,
        revenue_series: record
            .as_deref()
            .map(FinancialRecord::revenue_series)
            .unwrap_or_default(),
        financials: record.as_deref(),
        analysis: selectors::company_analysis(state, symbol, threshold),
    })?;

    Ok(CommandResult { status, data })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mlfund_core::store::FetchMeta;
    use mlfund_core::{reduce, Action, FetchError, FetchStatus, DEFAULT_THRESHOLD};
    use serde_json::json;

    fn symbol() -> Symbol {
        Symbol::parse("INFY.NS").expect("valid symbol")
    }

    #[test]
    fn fulfilled_record_exposes_revenue_series() {
        let record: FinancialRecord = serde_json::from_value(json!({
            "income_statement": { "revenue_series": [{ "year": "2024", "value": 153670.0 }] }
        }))
        .expect("valid record");
        let state = reduce(
            &AppState::default(),
            &Action::financials_fulfilled(FetchMeta::new(), symbol(), record),
        );

        let result =
            response(&state, &symbol(), DEFAULT_THRESHOLD).expect("response should serialize");

        assert_eq!(result.status, FetchStatus::Succeeded);
        assert_eq!(result.data["symbol"], json!("INFY.NS"));
        assert_eq!(
            result.data["revenue_series"],
            json!([{ "year": 2024, "value": 153670.0 }])
        );
        assert!(result.data["financials"]["income_statement"].is_object());
    }

    #[test]
    fn rejected_fetch_has_no_record() {
        let state = reduce(
            &AppState::default(),
            &Action::financials_rejected(FetchMeta::new(), symbol(), FetchError::response(404)),
        );

        let result =
            response(&state, &symbol(), DEFAULT_THRESHOLD).expect("response should serialize");

        assert_eq!(result.status, FetchStatus::Failed);
        assert_eq!(result.data["financials"], json!(null));
        assert_eq!(result.data["analysis"], json!(null));
        assert_eq!(result.data["revenue_series"], json!([]));
        assert_eq!(
            result.data["error"]["message"],
            json!("request failed with status code 404")
        );
    }

    #[test]
    fn cached_record_is_categorised_around_the_threshold() {
        let record: FinancialRecord = serde_json::from_value(json!({
            "ratios": { "Net Margin (%)": "18%", "Debt to Equity": 0.04 }
        }))
        .expect("valid record");
        let state = reduce(
            &AppState::default(),
            &Action::financials_fulfilled(FetchMeta::new(), symbol(), record),
        );

        let result = response(&state, &symbol(), 5.0).expect("response should serialize");

        let analysis = &result.data["analysis"];
        assert_eq!(analysis["threshold"], json!(5.0));
        assert_eq!(analysis["categories"]["pros"][0]["name"], json!("net_margin"));
        assert_eq!(analysis["categories"]["cons"][0]["name"], json!("debt_to_equity"));
        assert_eq!(analysis["summary"]["total_metrics"], json!(2));
        assert_eq!(analysis["summary"]["financial_score"], json!(null));
    }
}
