//! # Service Clients
//!
//! Authenticated HTTP client for calls between campus services. Before each
//! outbound call the client mints a service-identity token through the
//! calling service's own issuer and attaches it as the bearer credential;
//! the peer verifies it on the exact same path it uses for human callers.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;

use auth_core::{AuthError, Role, TokenIssuer};

/// Bound on every peer call. A peer that does not answer in time is reported
/// as unavailable, never waited on indefinitely.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(5);

/// Failures of an outbound service call.
#[derive(Debug, Error)]
pub enum ServiceCallError {
    /// The service token could not be signed.
    #[error("failed to sign service-identity token")]
    Token(#[from] AuthError),

    /// Network failure or timeout reaching the peer.
    #[error("peer unreachable: {url}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The peer answered with a non-success status.
    #[error("peer rejected the call with status {status}")]
    Rejected { status: u16 },

    /// The peer answered 2xx but the body did not deserialize.
    #[error("peer returned an unreadable body")]
    InvalidBody(#[source] reqwest::Error),
}

/// One service's view of its peers.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    http: reqwest::Client,
    issuer: Arc<TokenIssuer>,
    service_name: String,
    service_role: Role,
    call_timeout: Duration,
}

impl ServiceClient {
    /// `service_name` becomes the token subject; `service_role` is the single
    /// fixed role peers authorize against.
    pub fn new(issuer: Arc<TokenIssuer>, service_name: impl Into<String>, service_role: Role) -> Self {
        Self {
            http: reqwest::Client::new(),
            issuer,
            service_name: service_name.into(),
            service_role,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// GET a JSON resource from a peer, authenticated as this service.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ServiceCallError> {
        let token = self
            .issuer
            .issue_service_token(&self.service_name, self.service_role)?;

        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .timeout(self.call_timeout)
            .send()
            .await
            .map_err(|source| {
                tracing::warn!(url, error = %source, "peer call failed");
                ServiceCallError::Unreachable {
                    url: url.to_string(),
                    source,
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url, status = status.as_u16(), "peer rejected service call");
            return Err(ServiceCallError::Rejected {
                status: status.as_u16(),
            });
        }

        response.json().await.map_err(ServiceCallError::InvalidBody)
    }
}
