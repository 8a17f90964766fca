//! API gateway: the only component that talks to the backend.
//!
//! | Endpoint | Payload |
//! |----------|---------|
//! | `GET {base}/companies` | `[CompanySummary]` |
//! | `GET {base}/financials/{symbol}` | [`FinancialRecord`] |
//!
//! Every failure is reported as a [`FetchError`] tagged with its
//! [`FetchErrorKind`](crate::FetchErrorKind); the dispatcher turns it into a
//! `rejected` transition.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::config::GatewayConfig;
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::{CompanySummary, FetchError, FinancialRecord, Symbol};

pub type GatewayFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, FetchError>> + Send + 'a>>;

/// Backend contract consumed by the dispatcher.
///
/// Implementations must be `Send + Sync`; the dispatcher shares one gateway
/// across every in-flight fetch.
pub trait ApiGateway: Send + Sync {
    /// Fetches the company list in server order.
    fn fetch_companies(&self) -> GatewayFuture<'_, Vec<CompanySummary>>;

    /// Fetches the financial statements for one symbol.
    fn fetch_financials<'a>(&'a self, symbol: &'a Symbol) -> GatewayFuture<'a, FinancialRecord>;
}

/// Gateway speaking JSON over an [`HttpClient`].
#[derive(Clone)]
pub struct HttpGateway {
    config: GatewayConfig,
    http_client: Arc<dyn HttpClient>,
}

impl HttpGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self::with_http_client(config, Arc::new(ReqwestHttpClient::default()))
    }

    pub fn with_http_client(config: GatewayConfig, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            config,
            http_client,
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let request = HttpRequest::get(self.config.url(path))
            .with_header("Accept", "application/json")
            .with_timeout_ms(self.config.timeout_ms());

        log::debug!("GET {}", request.url);
        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|error| FetchError::transport(error.message()))?;

        if !response.is_success() {
            return Err(FetchError::response(response.status));
        }

        serde_json::from_str(&response.body).map_err(FetchError::from)
    }
}

impl ApiGateway for HttpGateway {
    fn fetch_companies(&self) -> GatewayFuture<'_, Vec<CompanySummary>> {
        Box::pin(self.get_json("/companies"))
    }

    fn fetch_financials<'a>(&'a self, symbol: &'a Symbol) -> GatewayFuture<'a, FinancialRecord> {
        Box::pin(async move {
            let path = format!("/financials/{}", urlencoding::encode(symbol.as_str()));
            self.get_json(&path).await
        })
    }
}
