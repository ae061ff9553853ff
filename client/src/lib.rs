//! Generic REST test client for black-box API tests.
//!
//! # Overview
//! `RestClient` issues typed list/get/create/update/delete requests and folds
//! every response into a `RestResponse` envelope. Read bodies are normalized
//! (noise around the JSON document is trimmed) before parsing, and JSONP
//! requests are never parsed.
//!
//! # Design
//! - Requests and responses are plain data (`HttpRequest`, `HttpResponse`);
//!   a `Transport` executes them. `UreqTransport` is the blocking default.
//! - Unexpected statuses are data (`success == false`); only transport,
//!   (de)serialization and malformed `Location` failures are `ClientError`s.
//! - DTOs in `types` are defined independently from the server crate;
//!   integration tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod normalize;
pub mod response;
pub mod transport;
pub mod types;

pub use client::{AuthCookie, RestClient, ACCEPT_HEADER};
pub use config::ClientConfig;
pub use error::ClientError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use normalize::{is_jsonp_call, normalize_json_body};
pub use response::RestResponse;
pub use transport::{Transport, UreqTransport};
pub use types::{Album, Artist};
