use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::store::action::UiAction;
use crate::ValidationError;

/// Colour scheme identifier; rendering is the presentation layer's concern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(ValidationError::InvalidTheme {
                value: value.to_owned(),
            }),
        }
    }
}

/// Transient view toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    pub sidebar_open: bool,
    pub theme: Theme,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            sidebar_open: true,
            theme: Theme::Light,
        }
    }
}

pub fn reduce_ui(state: UiState, action: UiAction) -> UiState {
    match action {
        UiAction::ToggleSidebar => UiState {
            sidebar_open: !state.sidebar_open,
            ..state
        },
        UiAction::SetTheme(theme) => UiState { theme, ..state },
    }
}
