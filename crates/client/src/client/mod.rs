//! HTTP client for the Layer Platform API.

pub mod announcements;
pub mod conversations;
pub mod messages;
pub mod notifications;
pub mod resource;

use std::fmt;
use std::sync::Arc;

use layer_core::api::classify;
use layer_core::resource::{Method, MESSAGE};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{ApiError, ConfigError, Result};
use crate::transport::{HttpRequest, HttpTransport, Transport};

use announcements::Announcements;
use conversations::Conversations;
use messages::Messages;
use notifications::Notifications;
use resource::{ParentRef, ResourceClient};

/// Entry point to the platform API.
///
/// Cloning is cheap; clones share the same configuration and transport.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Create a client that talks to the configured host over HTTPS.
    pub fn new(config: ClientConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        let transport = HttpTransport::new(config.api_root()?, config.timeout)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create from environment (see [`ClientConfig::from_env`]).
    pub fn from_env() -> std::result::Result<Self, ConfigError> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Create a client on top of a custom transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            inner: Arc::new(ClientInner { config, transport }),
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Returns true if both handles come from the same [`Client::new`] call.
    pub fn same_client(&self, other: &Client) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn conversations(&self) -> ResourceClient<Conversations> {
        ResourceClient::new(self.clone(), None)
    }

    /// Messages of the conversation with the given id (short or fully qualified).
    pub fn messages(&self, conversation_id: &str) -> ResourceClient<Messages> {
        let scope = MESSAGE
            .parent
            .map(|parent| ParentRef::for_kind(parent, conversation_id));
        ResourceClient::new(self.clone(), scope)
    }

    pub fn announcements(&self) -> ResourceClient<Announcements> {
        ResourceClient::new(self.clone(), None)
    }

    pub fn notifications(&self) -> ResourceClient<Notifications> {
        ResourceClient::new(self.clone(), None)
    }

    /// Send one request and classify its response.
    ///
    /// Returns the status and parsed body on success. This is the only path
    /// from a resource operation to the transport.
    pub(crate) async fn dispatch(
        &self,
        method: Method,
        path: String,
        query: Vec<(String, String)>,
        body: Option<Value>,
    ) -> Result<(u16, Value)> {
        let request = HttpRequest {
            method,
            path,
            query,
            headers: self.headers(body.is_some()),
            body,
        };

        tracing::debug!(method = %request.method, path = %request.path, "Sending request");
        let (method, path) = (request.method, request.path.clone());

        let response = self
            .inner
            .transport
            .send(request)
            .await
            .map_err(ApiError::from)
            .inspect_err(|e| tracing::warn!(%method, %path, error = %e, "Transport failure"))?;

        let status = response.status;
        tracing::debug!(%method, %path, status, "Received response");

        classify(status, &response.body)
            .map(|body| (status, body))
            .inspect_err(|e| {
                tracing::warn!(%method, %path, status, kind = ?e.kind(), error = %e, "Request failed")
            })
    }

    fn headers(&self, has_body: bool) -> Vec<(String, String)> {
        let config = self.config();
        let mut headers = vec![
            ("Accept".to_string(), config.accept_header()),
            ("Authorization".to_string(), config.authorization_header()),
        ];
        if has_body {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        headers
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use super::Client;
    use crate::config::ClientConfig;
    use crate::transport::MockTransport;

    pub const APP_ID: &str = "24f43c32-4d95-11e4-b3a2-0fd00000020d";

    /// A client backed by a fresh in-memory platform.
    pub fn mock_client() -> (Client, Arc<MockTransport>) {
        let mock = Arc::new(MockTransport::new());
        let client = Client::with_transport(ClientConfig::new(APP_ID, "test-token"), mock.clone());
        (client, mock)
    }
}
