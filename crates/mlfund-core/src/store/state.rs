use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::store::action::Action;
use crate::store::companies::{reduce_companies, CompaniesState};
use crate::store::ui::{reduce_ui, UiState};

/// Root state. Snapshots share the entity cache through an `Arc` so a UI
/// transition never copies it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub companies: Arc<CompaniesState>,
    pub ui: UiState,
}

/// Root transition function.
pub fn reduce(state: &AppState, action: &Action) -> AppState {
    match action {
        Action::Companies(action) => AppState {
            companies: Arc::new(reduce_companies(&state.companies, action)),
            ui: state.ui,
        },
        Action::Ui(action) => AppState {
            companies: Arc::clone(&state.companies),
            ui: reduce_ui(state.ui, *action),
        },
    }
}
