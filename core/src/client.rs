//! Generic typed dispatch shared by every resource client.
//!
//! # Design
//! `GatewayClient` holds only the base URL and a transport. Each call is split
//! the way the resource clients need it: `build` turns a typed request into
//! an `HttpRequest`, `send` performs exactly one transport round-trip, and
//! `parse_one` / `parse_list` turn the raw response into typed entities.
//! Nothing is cached or retried; every failure surfaces to the caller.

use std::time::Duration;

use tracing::{debug, warn};

use crate::clients::{AccountsClient, CardsClient, DocumentsClient, OperationsClient, UsersClient};
use crate::error::{ApiError, TransportError};
use crate::http::{HttpRequest, HttpResponse};
use crate::routes::Route;
use crate::schema::{encode, Shape};
use crate::transport::{Transport, UreqTransport};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8003";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the gateway lives and how long a single call may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Stateless client for the gateway service.
///
/// One instance is meant for one caller at a time; construct one per thread
/// or virtual user rather than sharing it.
#[derive(Debug, Clone)]
pub struct GatewayClient<T = UreqTransport> {
    base_url: String,
    transport: T,
}

impl GatewayClient<UreqTransport> {
    pub fn connect(config: &ClientConfig) -> Self {
        Self::new(&config.base_url, UreqTransport::new(config))
    }
}

impl<T: Transport> GatewayClient<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn build<Q: Shape>(&self, route: &Route, request: &Q) -> Result<HttpRequest, ApiError> {
        route.request(&self.base_url, encode(request)?)
    }

    /// Build and send one request, returning the response untouched.
    pub fn send<Q: Shape>(&self, route: &Route, request: &Q) -> Result<HttpResponse, ApiError> {
        let http_request = self.build(route, request)?;
        debug!(
            route = route.name,
            method = http_request.method.as_str(),
            url = %http_request.url,
            "sending gateway request"
        );
        let response = self.transport.send(http_request)?;
        debug!(route = route.name, status = response.status, "gateway responded");
        Ok(response)
    }

    pub fn parse_one<R: Shape>(&self, route: &Route, response: HttpResponse) -> Result<R, ApiError> {
        check_status(response)
            .and_then(|body| route.envelope.open(&body))
            .inspect_err(|e| report(route, e))
    }

    pub fn parse_list<R: Shape>(&self, route: &Route, response: HttpResponse) -> Result<Vec<R>, ApiError> {
        check_status(response)
            .and_then(|body| route.envelope.open_list(&body))
            .inspect_err(|e| report(route, e))
    }

    pub fn users(&self) -> UsersClient<'_, T> {
        UsersClient::new(self)
    }

    pub fn accounts(&self) -> AccountsClient<'_, T> {
        AccountsClient::new(self)
    }

    pub fn cards(&self) -> CardsClient<'_, T> {
        CardsClient::new(self)
    }

    pub fn operations(&self) -> OperationsClient<'_, T> {
        OperationsClient::new(self)
    }

    pub fn documents(&self) -> DocumentsClient<'_, T> {
        DocumentsClient::new(self)
    }
}

/// Non-2xx responses are the transport's failure signal; pass the body on
/// otherwise.
fn check_status(response: HttpResponse) -> Result<String, ApiError> {
    if response.is_success() {
        return Ok(response.body);
    }
    Err(TransportError::Status {
        status: response.status,
        body: response.body,
    }
    .into())
}

fn report(route: &Route, error: &ApiError) {
    if let ApiError::SchemaValidation { field, reason, .. } = error {
        warn!(route = route.name, field = %field, reason = %reason, "response failed validation");
    }
}
