use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::store::action::{CompaniesAction, Lifecycle};
use crate::{CompanySummary, FetchError, FinancialRecord, Symbol};

/// Lifecycle status of one resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl FetchStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// Status plus the error of the last failed attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceState {
    pub status: FetchStatus,
    pub error: Option<FetchError>,
}

impl ResourceState {
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(FetchError::message)
    }

    fn loading(&self) -> Self {
        Self {
            status: FetchStatus::Loading,
            error: self.error.clone(),
        }
    }

    fn succeeded() -> Self {
        Self {
            status: FetchStatus::Succeeded,
            error: None,
        }
    }

    fn failed(error: &FetchError) -> Self {
        Self {
            status: FetchStatus::Failed,
            error: Some(error.clone()),
        }
    }
}

/// Entity cache: the company list and per-symbol financial records.
///
/// `financials` only ever gains a key through a fulfilled fetch for that
/// symbol, so a missing key means "not loaded yet". `financials_status`
/// tracks every symbol that has been requested, loaded or not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompaniesState {
    pub list: Vec<CompanySummary>,
    #[serde(flatten)]
    pub list_status: ResourceState,
    pub financials: BTreeMap<Symbol, Arc<FinancialRecord>>,
    pub financials_status: BTreeMap<Symbol, ResourceState>,
}

pub fn reduce_companies(state: &CompaniesState, action: &CompaniesAction) -> CompaniesState {
    let mut next = state.clone();

    match action {
        CompaniesAction::FetchCompanies { phase, .. } => match phase {
            Lifecycle::Pending => {
                next.list_status = state.list_status.loading();
            }
            Lifecycle::Fulfilled(companies) => {
                next.list = dedup_by_symbol(companies);
                next.list_status = ResourceState::succeeded();
            }
            Lifecycle::Rejected(error) => {
                next.list_status = ResourceState::failed(error);
            }
        },
        CompaniesAction::FetchFinancials { symbol, phase, .. } => {
            let prior = state
                .financials_status
                .get(symbol)
                .cloned()
                .unwrap_or_default();

            let status = match phase {
                Lifecycle::Pending => prior.loading(),
                Lifecycle::Fulfilled(record) => {
                    next.financials.insert(symbol.clone(), Arc::clone(record));
                    ResourceState::succeeded()
                }
                Lifecycle::Rejected(error) => ResourceState::failed(error),
            };
            next.financials_status.insert(symbol.clone(), status);
        }
    }

    next
}

/// Keeps the first occurrence of each symbol, preserving server order.
fn dedup_by_symbol(companies: &[CompanySummary]) -> Vec<CompanySummary> {
    let mut seen = HashSet::with_capacity(companies.len());
    let mut list = Vec::with_capacity(companies.len());

    for company in companies {
        if seen.insert(&company.symbol) {
            list.push(company.clone());
        } else {
            log::warn!(
                "dropping duplicate company entry for {} ({})",
                company.symbol,
                company.company_name
            );
        }
    }

    list
}
