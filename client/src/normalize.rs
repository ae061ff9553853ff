//! Locating the JSON document inside a raw response body.

use crate::http::HttpRequest;

/// Query parameter that marks a request as JSONP.
pub const JSONP_CALLBACK_PARAM: &str = "callback";

/// Trims everything before the first `{` or `[` and after the last `}` or
/// `]`. Bytes between those two characters are returned untouched.
///
/// Empty input comes back unchanged. A body without structural characters
/// (`null`, plain text) is only whitespace-trimmed and left for the parser
/// to accept or reject.
pub fn normalize_json_body(body: &str) -> &str {
    if body.is_empty() {
        return body;
    }
    let start = body.find(['{', '[']);
    let end = body.rfind(['}', ']']);
    match (start, end) {
        (Some(start), Some(end)) if start <= end => &body[start..=end],
        _ => body.trim(),
    }
}

/// A request is JSONP when one of its query parameters is named exactly
/// `callback`. The match is case-sensitive.
pub fn is_jsonp_call(request: &HttpRequest) -> bool {
    request
        .query
        .iter()
        .any(|(name, _)| name == JSONP_CALLBACK_PARAM)
}
