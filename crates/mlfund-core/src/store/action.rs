use std::fmt::{Display, Formatter};
use std::sync::Arc;

use uuid::Uuid;

use crate::store::ui::Theme;
use crate::{CompanySummary, FetchError, FinancialRecord, Symbol};

/// Correlates the phases of one fetch invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchMeta {
    pub request_id: Uuid,
}

impl FetchMeta {
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
        }
    }
}

impl Default for FetchMeta {
    fn default() -> Self {
        Self::new()
    }
}

/// One phase of an asynchronous fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum Lifecycle<T> {
    Pending,
    Fulfilled(T),
    Rejected(FetchError),
}

impl<T> Lifecycle<T> {
    pub const fn phase(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fulfilled(_) => "fulfilled",
            Self::Rejected(_) => "rejected",
        }
    }
}

/// A fetchable resource tracked with its own status.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceKey {
    CompanyList,
    Financials(Symbol),
}

impl Display for ResourceKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CompanyList => f.write_str("companies"),
            Self::Financials(symbol) => write!(f, "financials/{symbol}"),
        }
    }
}

/// Entity cache transitions, emitted only by the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub enum CompaniesAction {
    FetchCompanies {
        meta: FetchMeta,
        phase: Lifecycle<Vec<CompanySummary>>,
    },
    FetchFinancials {
        meta: FetchMeta,
        symbol: Symbol,
        phase: Lifecycle<Arc<FinancialRecord>>,
    },
}

impl CompaniesAction {
    pub fn resource(&self) -> ResourceKey {
        match self {
            Self::FetchCompanies { .. } => ResourceKey::CompanyList,
            Self::FetchFinancials { symbol, .. } => ResourceKey::Financials(symbol.clone()),
        }
    }

    pub const fn meta(&self) -> FetchMeta {
        match self {
            Self::FetchCompanies { meta, .. } | Self::FetchFinancials { meta, .. } => *meta,
        }
    }
}

/// UI toggles, dispatched directly by views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    ToggleSidebar,
    SetTheme(Theme),
}

/// Anything the store accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Companies(CompaniesAction),
    Ui(UiAction),
}

impl Action {
    pub fn companies_pending(meta: FetchMeta) -> Self {
        Self::Companies(CompaniesAction::FetchCompanies {
            meta,
            phase: Lifecycle::Pending,
        })
    }

    pub fn companies_fulfilled(meta: FetchMeta, companies: Vec<CompanySummary>) -> Self {
        Self::Companies(CompaniesAction::FetchCompanies {
            meta,
            phase: Lifecycle::Fulfilled(companies),
        })
    }

    pub fn companies_rejected(meta: FetchMeta, error: FetchError) -> Self {
        Self::Companies(CompaniesAction::FetchCompanies {
            meta,
            phase: Lifecycle::Rejected(error),
        })
    }

    pub fn financials_pending(meta: FetchMeta, symbol: Symbol) -> Self {
        Self::Companies(CompaniesAction::FetchFinancials {
            meta,
            symbol,
            phase: Lifecycle::Pending,
        })
    }

    pub fn financials_fulfilled(meta: FetchMeta, symbol: Symbol, record: FinancialRecord) -> Self {
        Self::Companies(CompaniesAction::FetchFinancials {
            meta,
            symbol,
            phase: Lifecycle::Fulfilled(Arc::new(record)),
        })
    }

    pub fn financials_rejected(meta: FetchMeta, symbol: Symbol, error: FetchError) -> Self {
        Self::Companies(CompaniesAction::FetchFinancials {
            meta,
            symbol,
            phase: Lifecycle::Rejected(error),
        })
    }

    pub const fn toggle_sidebar() -> Self {
        Self::Ui(UiAction::ToggleSidebar)
    }

    pub const fn set_theme(theme: Theme) -> Self {
        Self::Ui(UiAction::SetTheme(theme))
    }

    /// Action type in `slice/name[/phase]` form, used for logging.
    pub fn type_name(&self) -> String {
        match self {
            Self::Companies(CompaniesAction::FetchCompanies { phase, .. }) => {
                format!("companies/fetchCompanies/{}", phase.phase())
            }
            Self::Companies(CompaniesAction::FetchFinancials { phase, .. }) => {
                format!("companies/fetchCompanyFinancials/{}", phase.phase())
            }
            Self::Ui(UiAction::ToggleSidebar) => String::from("ui/toggleSidebar"),
            Self::Ui(UiAction::SetTheme(_)) => String::from("ui/setTheme"),
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.type_name())
    }
}

impl From<CompaniesAction> for Action {
    fn from(value: CompaniesAction) -> Self {
        Self::Companies(value)
    }
}

impl From<UiAction> for Action {
    fn from(value: UiAction) -> Self {
        Self::Ui(value)
    }
}
