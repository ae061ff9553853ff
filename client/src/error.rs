//! Error types for the REST test client.
//!
//! # Design
//! Only failures that make the round trip meaningless are errors. A response
//! whose status differs from the expected one is ordinary data and comes back
//! as a `RestResponse` with `success == false`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response: connection refused, DNS,
    /// timeout, or the body could not be read.
    #[error("transport failed: {0}")]
    TransportError(String),

    /// The (normalized) response body is not valid JSON for the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request entity could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The authentication handshake answered without any cookie.
    #[error("authentication response carried no cookie")]
    MissingAuthCookie,
}
