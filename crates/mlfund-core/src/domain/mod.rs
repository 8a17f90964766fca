//! # Domain Models
//!
//! Payload types exchanged with the API and held in the entity cache.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Company ticker (verbatim from the server, validated from users) |
//! | [`CompanySummary`] | One entry of the company list |
//! | [`FinancialRecord`] | Statements for one company |
//! | [`Statement`] | One statement section with pass-through fields |
//! | [`SeriesPoint`] | `{year, value}` observation used for charting |
//!
//! Required fields are typed and validated on deserialization; anything
//! else the server sends is preserved in a flattened map.

mod company;
mod financials;
mod symbol;

pub use company::CompanySummary;
pub use financials::{FinancialRecord, SeriesPoint, Statement, REVENUE_SERIES};
pub use symbol::Symbol;
