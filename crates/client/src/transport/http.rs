//! reqwest-backed transport.

use std::time::Duration;

use async_trait::async_trait;
use layer_core::resource::Method;
use url::Url;

use super::{HttpRequest, HttpResponse, Transport, TransportError};
use crate::error::ConfigError;

/// Transport that sends requests over HTTPS with a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    root: Url,
}

impl HttpTransport {
    /// Create a transport rooted at `root` (must end with a slash).
    pub fn new(root: Url, timeout: Duration) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self { client, root })
    }

    /// Get the root URL.
    pub fn root(&self) -> &Url {
        &self.root
    }

    fn url(&self, path: &str) -> Result<Url, TransportError> {
        self.root
            .join(path)
            .map_err(|e| TransportError::Request(format!("invalid path {path:?}: {e}")))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = self.url(&request.path)?;
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(from_reqwest)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await.map_err(from_reqwest)?.to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn from_reqwest(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout(error.to_string())
    } else if error.is_connect() {
        TransportError::Connection(error.to_string())
    } else {
        TransportError::Request(error.to_string())
    }
}
