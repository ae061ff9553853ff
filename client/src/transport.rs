//! Executes `HttpRequest` values over the network.
//!
//! # Design
//! `RestClient` only builds requests and folds responses; the round trip
//! itself sits behind the `Transport` trait. Unit tests plug in scripted
//! transports, while `UreqTransport` drives a real server. Every status code
//! comes back as an `HttpResponse`, so a 404 or 500 reaches the envelope
//! instead of surfacing as a transport error.

use std::time::Duration;

use ureq::typestate::WithBody;
use ureq::{Agent, RequestBuilder};

use crate::error::ClientError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Performs one request/response round trip.
///
/// Implementations must return non-2xx responses as data; only failures
/// that prevent a response from being read are `Err`.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ClientError>;
}

/// Blocking transport backed by a ureq agent. Never retries.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new(timeout: Option<Duration>) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ClientError> {
        let url = request.url.as_str();
        let result = match request.method {
            HttpMethod::Get => with_parts(self.agent.get(url), request).call(),
            HttpMethod::Delete => with_parts(self.agent.delete(url), request).call(),
            HttpMethod::Post => send(with_parts(self.agent.post(url), request), request),
            HttpMethod::Put => send(with_parts(self.agent.put(url), request), request),
        };
        let mut response = result.map_err(|e| ClientError::TransportError(e.to_string()))?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                let value = value.to_str().ok()?;
                Some((name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ClientError::TransportError(e.to_string()))?;

        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }
}

fn with_parts<B>(mut builder: RequestBuilder<B>, request: &HttpRequest) -> RequestBuilder<B> {
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    for (name, value) in &request.query {
        builder = builder.query(name, value);
    }
    builder
}

fn send(
    builder: RequestBuilder<WithBody>,
    request: &HttpRequest,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match &request.body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}
