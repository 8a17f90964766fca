//! Async task dispatcher.
//!
//! Bridges a gateway call into the three-phase protocol understood by the
//! store: `pending` is dispatched before the call starts, then exactly one of
//! `fulfilled` or `rejected` once it settles.
//!
//! Requests are neither deduplicated nor cancelled. Two fetches for the same
//! symbol both run to completion and whichever settles last owns the cache
//! slot, regardless of the order they were issued in.

use std::sync::Arc;

use crate::gateway::ApiGateway;
use crate::store::{Action, FetchMeta, Snapshot, Store};
use crate::Symbol;

/// Issues fetches against a gateway and feeds their outcomes into a store.
#[derive(Clone)]
pub struct Dispatcher {
    store: Arc<Store>,
    gateway: Arc<dyn ApiGateway>,
}

impl Dispatcher {
    pub fn new(store: Arc<Store>, gateway: Arc<dyn ApiGateway>) -> Self {
        Self { store, gateway }
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    /// Load the company list; returns the snapshot of the settling dispatch.
    pub async fn fetch_companies(&self) -> Snapshot {
        let meta = FetchMeta::new();
        self.store.dispatch(Action::companies_pending(meta));

        match self.gateway.fetch_companies().await {
            Ok(companies) => {
                log::info!(
                    "[{}] fetched {} companies",
                    meta.request_id,
                    companies.len()
                );
                self.store
                    .dispatch(Action::companies_fulfilled(meta, companies))
            }
            Err(error) => {
                log::warn!(
                    "[{}] company list fetch failed ({}): {error}",
                    meta.request_id,
                    error.code()
                );
                self.store.dispatch(Action::companies_rejected(meta, error))
            }
        }
    }

    /// Load the financial record for `symbol`; returns the snapshot of the
    /// settling dispatch.
    pub async fn fetch_financials(&self, symbol: Symbol) -> Snapshot {
        let meta = FetchMeta::new();
        self.store
            .dispatch(Action::financials_pending(meta, symbol.clone()));

        match self.gateway.fetch_financials(&symbol).await {
            Ok(record) => {
                log::info!("[{}] fetched financials for {symbol}", meta.request_id);
                self.store
                    .dispatch(Action::financials_fulfilled(meta, symbol, record))
            }
            Err(error) => {
                log::warn!(
                    "[{}] financials fetch for {symbol} failed ({}): {error}",
                    meta.request_id,
                    error.code()
                );
                self.store
                    .dispatch(Action::financials_rejected(meta, symbol, error))
            }
        }
    }
}
