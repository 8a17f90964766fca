//! Read helpers over a snapshot.

use std::sync::Arc;

use crate::store::companies::{FetchStatus, ResourceState};
use crate::store::state::AppState;
use crate::store::ui::UiState;
use crate::analysis::{self, CompanyAnalysis, FinancialScore};
use crate::{CompanySummary, FinancialRecord, Symbol};

pub fn companies(state: &AppState) -> &[CompanySummary] {
    &state.companies.list
}

pub fn company_list_status(state: &AppState) -> &ResourceState {
    &state.companies.list_status
}

pub fn is_loading_companies(state: &AppState) -> bool {
    state.companies.list_status.status == FetchStatus::Loading
}

pub fn company<'a>(state: &'a AppState, symbol: &Symbol) -> Option<&'a CompanySummary> {
    state
        .companies
        .list
        .iter()
        .find(|company| &company.symbol == symbol)
}

/// `None` until a fetch for `symbol` has been fulfilled.
pub fn financials(state: &AppState, symbol: &Symbol) -> Option<Arc<FinancialRecord>> {
    state.companies.financials.get(symbol).cloned()
}

/// Status of the financials for `symbol`; `idle` when never requested.
pub fn financials_status(state: &AppState, symbol: &Symbol) -> ResourceState {
    state
        .companies
        .financials_status
        .get(symbol)
        .cloned()
        .unwrap_or_default()
}

pub fn ui(state: &AppState) -> UiState {
    state.ui
}

/// Relative scores of every cached record, in symbol order.
pub fn financial_scores(state: &AppState) -> Vec<FinancialScore> {
    let companies: Vec<_> = state
        .companies
        .financials
        .iter()
        .map(|(symbol, record)| (symbol.clone(), analysis::metric_means(record)))
        .collect();
    analysis::financial_scores(&companies)
}

/// Pros, cons and score for a cached record; `None` until it is fetched.
pub fn company_analysis(
    state: &AppState,
    symbol: &Symbol,
    threshold: f64,
) -> Option<CompanyAnalysis> {
    let record = state.companies.financials.get(symbol)?;
    let score = financial_scores(state)
        .into_iter()
        .find(|scored| &scored.symbol == symbol)
        .map(|scored| scored.score);
    Some(analysis::analyze_record(record, threshold, score))
}
