use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Company ticker, the key of every per-company resource.
///
/// Tickers are opaque: whatever the backend lists (`^NSEI`, `BRK B`,
/// lower case or not) is stored and requested back byte for byte. Only text
/// typed by a user goes through [`Symbol::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Longest ticker a user may type.
    pub const MAX_INPUT_LEN: usize = 32;

    /// Wrap a ticker received from the backend without inspecting it.
    pub fn from_server(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Read a ticker from user input.
    ///
    /// Surrounding whitespace is dropped and case is preserved. The result
    /// must fit in a single path segment.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }

        let len = trimmed.chars().count();
        if len > Self::MAX_INPUT_LEN {
            return Err(ValidationError::SymbolTooLong {
                len,
                max: Self::MAX_INPUT_LEN,
            });
        }

        let offending = trimmed
            .chars()
            .enumerate()
            .find(|(_, ch)| ch.is_whitespace() || ch.is_control() || matches!(ch, '/' | '\\'));
        if let Some((index, ch)) = offending {
            return Err(ValidationError::SymbolInvalidChar { ch, index });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Symbol {
    type Err = ValidationError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::parse(input)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}
