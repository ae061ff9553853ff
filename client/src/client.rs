//! Generic REST client for black-box API tests.
//!
//! # Design
//! Every operation builds a fresh `HttpRequest`, hands it to the `Transport`,
//! and folds the `HttpResponse` into a `RestResponse`. A status other than
//! the operation's expected one is reported through `success == false`;
//! only transport and deserialization failures become `Err`.
//!
//! The auth cookie is the only state shared between calls. It sits behind an
//! `RwLock`, so a concurrent `authenticate` cannot tear it, but requests
//! already in flight keep whatever cookie they were built with.

use std::sync::{PoisonError, RwLock};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};
use ureq::http::Uri;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::normalize::{is_jsonp_call, normalize_json_body};
use crate::response::RestResponse;
use crate::transport::{Transport, UreqTransport};

/// Sent with every request.
pub const ACCEPT_HEADER: &str = "text/html, application/xhtml+xml, */*";

pub const USERNAME_PLACEHOLDER: &str = "{username}";
pub const PASSWORD_PLACEHOLDER: &str = "{password}";

/// Session cookie captured by `RestClient::authenticate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCookie {
    pub name: String,
    pub value: String,
}

impl AuthCookie {
    fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.value.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteOp {
    Create,
    Update,
    Delete,
}

impl WriteOp {
    fn expected_status(self) -> u16 {
        match self {
            WriteOp::Create => 201,
            WriteOp::Update | WriteOp::Delete => 200,
        }
    }

    fn reads_location(self) -> bool {
        self != WriteOp::Delete
    }

    /// Create failures surface the server's error detail instead of the
    /// status description.
    fn failure_reason_from_body(self) -> bool {
        self == WriteOp::Create
    }
}

pub struct RestClient<T: Transport = UreqTransport> {
    config: ClientConfig,
    transport: T,
    auth: RwLock<Option<AuthCookie>>,
}

impl RestClient<UreqTransport> {
    pub fn new(base_url: &str) -> Self {
        Self::from_config(ClientConfig::new(base_url))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        let transport = UreqTransport::new(config.timeout);
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> RestClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            auth: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn auth_cookie(&self) -> Option<AuthCookie> {
        self.auth
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear_auth(&self) {
        *self.auth.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Builds the request for `path` relative to the base URL.
    ///
    /// The auth cookie is attached only when the client requires auth and
    /// both cookie name and value are non-empty.
    pub fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(&str, &str)],
        body: Option<String>,
    ) -> HttpRequest {
        let mut headers = vec![("Accept".to_string(), ACCEPT_HEADER.to_string())];
        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        if self.config.requires_auth {
            if let Some(cookie) = self.auth_cookie().filter(AuthCookie::is_complete) {
                headers.push((
                    "Cookie".to_string(),
                    format!("{}={}", cookie.name, cookie.value),
                ));
            }
        }

        HttpRequest {
            method,
            url: format!(
                "{}/{}",
                self.config.base_url,
                path.trim_start_matches('/')
            ),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            headers,
            body,
        }
    }

    /// GET `path` and parse the body as a sequence, in server order.
    pub fn list_all<P: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<RestResponse<Vec<P>>, ClientError> {
        let request = self.build_request(HttpMethod::Get, path, &[], None);
        let response = self.dispatch(&request)?;
        read_outcome(&request, response)
    }

    /// GET `path` with `query` as query-string pairs and parse one object.
    ///
    /// A `null` body gives `payload == None` without an error.
    pub fn get_one<P: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<RestResponse<P>, ClientError> {
        let request = self.build_request(HttpMethod::Get, path, query, None);
        let response = self.dispatch(&request)?;
        read_outcome(&request, response)
    }

    /// POST `entity` as JSON. Succeeds on 201 and reports the `Location`.
    pub fn create<B: Serialize + ?Sized>(
        &self,
        path: &str,
        entity: &B,
    ) -> Result<RestResponse, ClientError> {
        let request = self.build_request(HttpMethod::Post, path, &[], Some(to_json(entity)?));
        let response = self.dispatch(&request)?;
        write_outcome(WriteOp::Create, &request, response)
    }

    /// PUT `entity` as JSON. Succeeds on 200.
    pub fn update<B: Serialize + ?Sized>(
        &self,
        path: &str,
        entity: &B,
    ) -> Result<RestResponse, ClientError> {
        let request = self.build_request(HttpMethod::Put, path, &[], Some(to_json(entity)?));
        let response = self.dispatch(&request)?;
        write_outcome(WriteOp::Update, &request, response)
    }

    /// DELETE `path`. The caller appends the id to `path`; `id` is only
    /// used for logging.
    pub fn delete(&self, path: &str, id: i64) -> Result<RestResponse, ClientError> {
        debug!(id, "deleting {}", path);
        let request = self.build_request(HttpMethod::Delete, path, &[], None);
        let response = self.dispatch(&request)?;
        write_outcome(WriteOp::Delete, &request, response)
    }

    /// Logs in by GETting `path_template` with `{username}` and `{password}`
    /// substituted, then keeps the first cookie of the response.
    ///
    /// Fails with `MissingAuthCookie` when the first cookie of the response is
    /// missing, malformed or empty; the previous auth state is kept in that
    /// case.
    pub fn authenticate(
        &self,
        username: &str,
        password: &str,
        path_template: &str,
    ) -> Result<(), ClientError> {
        let path = path_template
            .replace(USERNAME_PLACEHOLDER, &urlencoding::encode(username))
            .replace(PASSWORD_PLACEHOLDER, &urlencoding::encode(password));
        let request = self.build_request(HttpMethod::Get, &path, &[], None);
        let response = self.dispatch(&request)?;

        let Some(cookie) = first_cookie(&response).filter(AuthCookie::is_complete) else {
            warn!(
                status = response.status,
                "authentication for {} returned no cookie", username
            );
            return Err(ClientError::MissingAuthCookie);
        };
        debug!(cookie = %cookie.name, "captured auth cookie");
        *self.auth.write().unwrap_or_else(PoisonError::into_inner) = Some(cookie);
        Ok(())
    }

    fn dispatch(&self, request: &HttpRequest) -> Result<HttpResponse, ClientError> {
        debug!(method = request.method.as_str(), url = %request.url, "sending request");
        match self.transport.execute(request) {
            Ok(response) => {
                debug!(status = response.status, "received response");
                Ok(response)
            }
            Err(e) => {
                warn!(url = %request.url, "request failed: {}", e);
                Err(e)
            }
        }
    }
}

fn to_json<B: Serialize + ?Sized>(entity: &B) -> Result<String, ClientError> {
    serde_json::to_string(entity).map_err(|e| ClientError::SerializationError(e.to_string()))
}

fn read_outcome<P: DeserializeOwned>(
    request: &HttpRequest,
    response: HttpResponse,
) -> Result<RestResponse<P>, ClientError> {
    let success = response.status == 200;
    let outcome = RestResponse::new(success, response.status, response.reason);
    if !success {
        return Ok(outcome);
    }
    if is_jsonp_call(request) {
        debug!("JSONP request, leaving payload unset");
        return Ok(outcome);
    }
    Ok(outcome.with_payload(parse_payload(&response.body)?))
}

fn parse_payload<P: DeserializeOwned>(body: &str) -> Result<Option<P>, ClientError> {
    let json = normalize_json_body(body);
    if json.is_empty() {
        return Ok(None);
    }
    serde_json::from_str::<Option<P>>(json)
        .map_err(|e| ClientError::DeserializationError(e.to_string()))
}

fn write_outcome(
    op: WriteOp,
    request: &HttpRequest,
    response: HttpResponse,
) -> Result<RestResponse, ClientError> {
    if response.status != op.expected_status() {
        let reason = if op.failure_reason_from_body() {
            response.body
        } else {
            response.reason
        };
        return Ok(RestResponse::new(false, response.status, reason));
    }

    let location = if op.reads_location() {
        response
            .header("location")
            .and_then(|value| resolve_location(&request.url, value))
    } else {
        None
    };
    let outcome = RestResponse::new(true, response.status, response.reason);
    Ok(match location {
        Some(location) => outcome.with_location(location),
        None => outcome,
    })
}

/// Resolves a `Location` value against the request URL. Relative values
/// replace the last segment of the request path, absolute paths keep only the
/// request's scheme and authority.
fn resolve_location(request_url: &str, value: &str) -> Option<Uri> {
    if let Ok(uri) = value.parse::<Uri>() {
        if uri.scheme().is_some() {
            return Some(uri);
        }
    }

    let resolved = request_url.parse::<Uri>().ok().and_then(|base| {
        let scheme = base.scheme_str()?;
        let authority = base.authority()?;
        let path = if value.starts_with('/') {
            value.to_string()
        } else {
            let dir = base.path().rsplit_once('/').map_or("", |(dir, _)| dir);
            format!("{dir}/{value}")
        };
        format!("{scheme}://{authority}{path}").parse::<Uri>().ok()
    });
    if resolved.is_none() {
        warn!(location = value, "ignoring unparseable Location header");
    }
    resolved
}

/// Parses the first `Set-Cookie` header only; later ones are ignored even
/// when the first is malformed.
fn first_cookie(response: &HttpResponse) -> Option<AuthCookie> {
    let header = response.header_values("set-cookie").next()?;
    let pair = header.split(';').next()?;
    let (name, value) = pair.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some(AuthCookie {
        name: name.to_string(),
        value: value.trim().to_string(),
    })
}
