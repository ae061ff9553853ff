//! The envelope every `RestClient` operation returns.
//!
//! # Design
//! A status the operation did not expect is recorded here as data
//! (`success == false`) rather than raised as an error, so black-box tests can
//! assert on 404s and 422s the same way they assert on successes. The payload
//! type defaults to `()` for writes, which never parse a body.

use ureq::http::Uri;

/// Uniform result of every `RestClient` operation.
///
/// `payload` is only filled by read operations, and only when the request was
/// not JSONP and the body parsed. `resource_location` is only filled when the
/// operation succeeded and the server sent a `Location` header.
#[derive(Debug, Clone, PartialEq)]
pub struct RestResponse<T = ()> {
    pub success: bool,
    pub status_code: u16,
    pub reason_phrase: String,
    pub resource_location: Option<Uri>,
    /// Last path segment of `resource_location`.
    pub parsed_resource_id: Option<String>,
    pub payload: Option<T>,
}

impl<T> RestResponse<T> {
    pub(crate) fn new(success: bool, status_code: u16, reason_phrase: String) -> Self {
        Self {
            success,
            status_code,
            reason_phrase,
            resource_location: None,
            parsed_resource_id: None,
            payload: None,
        }
    }

    pub(crate) fn with_location(mut self, location: Uri) -> Self {
        self.parsed_resource_id = location
            .path()
            .rsplit('/')
            .find(|segment| !segment.is_empty())
            .map(str::to_string);
        self.resource_location = Some(location);
        self
    }

    pub(crate) fn with_payload(mut self, payload: Option<T>) -> Self {
        self.payload = payload;
        self
    }

    /// Parses `parsed_resource_id` as an integer id.
    pub fn resource_id(&self) -> Option<i64> {
        self.parsed_resource_id.as_deref()?.parse().ok()
    }
}
