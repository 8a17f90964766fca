//! Behavior-driven tests for the derived analysis.
//!
//! Records reach the store through the dispatcher exactly as the dashboard
//! loads them; the analysis is then read back from the snapshot.

use std::sync::Arc;

use mlfund_core::analysis::{clean_metric_name, parse_amount};
use mlfund_core::store::selectors;
use mlfund_core::{
    AppState, Dispatcher, GatewayConfig, HttpClient, HttpError, HttpGateway, HttpResponse, Store,
    DEFAULT_THRESHOLD,
};
use mlfund_tests::{symbol, ScriptedHttpClient};
use serde_json::{json, Value};

fn dispatcher(bodies: &[Value]) -> Dispatcher {
    scripted(
        bodies
            .iter()
            .map(|body| Ok(HttpResponse::ok_json(body.to_string())))
            .collect(),
    )
}

fn scripted(responses: Vec<Result<HttpResponse, HttpError>>) -> Dispatcher {
    let transport: Arc<dyn HttpClient> = ScriptedHttpClient::new(responses);
    let config = GatewayConfig::new("http://backend.test/api").expect("valid base url");
    Dispatcher::new(
        Arc::new(Store::new()),
        Arc::new(HttpGateway::with_http_client(config, transport)),
    )
}

// =============================================================================
// Cleaning
// =============================================================================

#[test]
fn spreadsheet_cells_become_comparable_numbers() {
    assert_eq!(parse_amount("₹ 4,520 Cr"), Some(4.52e10));
    assert_eq!(parse_amount("Rs. 12.5 lakh"), Some(1_250_000.0));
    assert_eq!(parse_amount("21%"), Some(0.21));
    assert_eq!(parse_amount("--"), None);
    assert_eq!(clean_metric_name("Operating Profit Margin (%)"), "operating_profit_margin");
}

// =============================================================================
// Single company
// =============================================================================

#[tokio::test]
async fn fetched_record_is_split_into_pros_and_cons() {
    // Given: a record mixing series, percentages and plain ratios
    let dispatcher = dispatcher(&[json!({
        "income_statement": {
            "revenue_series": [
                { "year": 2022, "value": 1200.0 },
                { "year": 2023, "value": 1400.0 }
            ],
            "Net Profit Margin": "14%"
        },
        "balance_sheet": { "Debt Equity": "0.03" },
        "currency": "INR"
    })]);

    // When: it is fetched and analysed
    let state = dispatcher.fetch_financials(symbol("TCS.NS")).await;
    let analysis = selectors::company_analysis(&state, &symbol("TCS.NS"), DEFAULT_THRESHOLD)
        .expect("record should be cached");

    // Then: strong metrics lead the pros and weak ones lead the cons
    let pros: Vec<&str> = analysis
        .categories
        .pros
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(pros, ["revenue_series", "net_profit_margin"]);
    assert_eq!(analysis.categories.pros[0].value, 1300.0);
    assert!((analysis.categories.pros[1].value - 14.0).abs() < 1e-9);
    assert_eq!(analysis.categories.cons.len(), 1);
    assert_eq!(analysis.categories.cons[0].name, "debt_equity");
    assert_eq!(analysis.summary.total_metrics, 3);
    assert_eq!(analysis.summary.financial_score, None);
}

#[tokio::test]
async fn failed_fetch_has_nothing_to_analyse() {
    let dispatcher = scripted(vec![Ok(HttpResponse::with_status(500, ""))]);

    let state = dispatcher.fetch_financials(symbol("AAPL")).await;

    assert!(selectors::company_analysis(&state, &symbol("AAPL"), DEFAULT_THRESHOLD).is_none());
    assert!(selectors::financial_scores(&state).is_empty());
}

// =============================================================================
// Relative scores
// =============================================================================

#[tokio::test]
async fn scores_rank_every_cached_company() {
    // Given: three companies sharing the same ratios
    let dispatcher = dispatcher(&[
        json!({ "ratios": { "roe": "18%", "margin": "22%" } }),
        json!({ "ratios": { "roe": "6%", "margin": "4%" } }),
        json!({ "ratios": { "roe": "12%", "margin": "13%" } }),
    ]);

    // When: all three are fetched
    for ticker in ["HIGH", "LOW", "MID"] {
        dispatcher.fetch_financials(symbol(ticker)).await;
    }
    let state = dispatcher.store().get_state();
    let scores = selectors::financial_scores(&state);

    // Then: the extremes pin the range and the middle falls between
    let score = |ticker: &str| {
        scores
            .iter()
            .find(|s| s.symbol == symbol(ticker))
            .map(|s| s.score)
            .expect("every cached company is scored")
    };
    assert_eq!(scores.len(), 3);
    assert!((score("HIGH") - 100.0).abs() < 1e-9);
    assert!(score("LOW").abs() < 1e-9);
    assert!(score("MID") > 0.0 && score("MID") < 100.0);
    assert_eq!(
        selectors::company_analysis(&state, &symbol("LOW"), DEFAULT_THRESHOLD)
            .and_then(|analysis| analysis.summary.financial_score)
            .map(f64::round),
        Some(0.0)
    );
}

#[tokio::test]
async fn analysis_follows_the_latest_cached_record() {
    let dispatcher = dispatcher(&[
        json!({ "ratios": { "margin": "4%" } }),
        json!({ "ratios": { "margin": "40%" } }),
    ]);

    let before = dispatcher.fetch_financials(symbol("INFY.NS")).await;
    let after = dispatcher.fetch_financials(symbol("INFY.NS")).await;

    let pros = |state: &AppState| {
        selectors::company_analysis(state, &symbol("INFY.NS"), DEFAULT_THRESHOLD)
            .map(|analysis| analysis.summary.pros_count)
    };
    assert_eq!(pros(&before), Some(0));
    assert_eq!(pros(&after), Some(1));
}
