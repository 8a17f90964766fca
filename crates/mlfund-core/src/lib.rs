//! # MLFund Core
//!
//! Client-side state container for the MLFund fundamentals dashboard.
//!
//! ## Overview
//!
//! This crate tracks asynchronous fetches of the company list and of
//! per-symbol financial records, and keeps UI state consistent while those
//! fetches complete in any order:
//!
//! - **Domain models** for companies and financial statements
//! - **API gateway** over a pluggable HTTP transport
//! - **Store** holding immutable snapshots updated by pure reducers
//! - **Dispatcher** turning gateway calls into pending/fulfilled/rejected actions
//! - **Analysis** deriving pros, cons and relative scores from cached records
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`analysis`] | Metric cleaning, categorisation and scoring |
//! | [`config`] | Gateway base URL and timeout |
//! | [`dispatcher`] | Async fetch lifecycle |
//! | [`domain`] | Symbol, company and financial record types |
//! | [`error`] | Validation and fetch errors |
//! | [`gateway`] | Backend contract and HTTP implementation |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`store`] | State, actions, reducers, selectors |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use mlfund_core::{Dispatcher, GatewayConfig, HttpGateway, Store, Symbol};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(Store::new());
//!     let gateway = HttpGateway::new(GatewayConfig::from_env()?);
//!     let dispatcher = Dispatcher::new(store.clone(), Arc::new(gateway));
//!
//!     let state = dispatcher.fetch_financials(Symbol::parse("AAPL")?).await;
//!     println!("{:?}", state.companies.financials_status);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐   dispatch(action)   ┌──────────────────┐
//! │  View           │─────────────────────▶│ Store            │
//! └────────┬────────┘◀─────────────────────│ (reduce, notify) │
//!          │ fetch intent    snapshot      └──────────────────┘
//!          ▼                                        ▲
//! ┌─────────────────┐  pending / fulfilled /        │
//! │  Dispatcher     │───────── rejected ────────────┘
//! └────────┬────────┘
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ API Gateway     │────▶│ HTTP Client      │
//! └─────────────────┘     └──────────────────┘
//! ```

pub mod analysis;
pub mod config;
pub mod dispatcher;
pub mod domain;
pub mod error;
pub mod gateway;
pub mod http_client;
pub mod store;

pub use analysis::{
    AnalysisSummary, CompanyAnalysis, FinancialScore, Metric, MetricCategories, DEFAULT_THRESHOLD,
};

pub use config::{GatewayConfig, API_BASE_ENV, DEFAULT_API_BASE, DEFAULT_TIMEOUT_MS};

pub use dispatcher::Dispatcher;

pub use domain::{CompanySummary, FinancialRecord, SeriesPoint, Statement, Symbol};

pub use error::{CoreError, FetchError, FetchErrorKind, ValidationError};

pub use gateway::{ApiGateway, GatewayFuture, HttpGateway};

pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

pub use store::{
    reduce, Action, AppState, CompaniesState, FetchStatus, ResourceState, Snapshot, Store, Theme,
    UiState, Unsubscribe,
};
