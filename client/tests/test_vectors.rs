//! Verify normalization and write envelopes against JSON test vectors stored
//! in `test-vectors/`.
//!
//! Normalized bodies are compared both as raw strings (the normalizer must not
//! touch the document) and as parsed JSON.

use std::sync::Mutex;

use rest_test_client::{
    normalize_json_body, ClientConfig, ClientError, HttpMethod, HttpRequest, HttpResponse,
    RestClient, RestResponse, Transport,
};

const BASE_URL: &str = "http://localhost:3000";

/// Answers every request with the same simulated response.
struct CannedTransport {
    response: HttpResponse,
    seen: Mutex<Vec<HttpRequest>>,
}

impl Transport for CannedTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ClientError> {
        self.seen.lock().unwrap().push(request.clone());
        Ok(self.response.clone())
    }
}

fn simulated_response(sim: &serde_json::Value) -> HttpResponse {
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        reason: sim["reason"].as_str().unwrap().to_string(),
        headers: sim["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

// ---------------------------------------------------------------------------
// Normalize
// ---------------------------------------------------------------------------

#[test]
fn normalize_test_vectors() {
    let raw = include_str!("../../test-vectors/normalize.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let body = case["body"].as_str().unwrap();

        let trimmed = normalize_json_body(body);
        assert_eq!(trimmed, case["expected"].as_str().unwrap(), "{name}: normalized text");

        if let Some(expected_value) = case.get("value") {
            let parsed: serde_json::Value = serde_json::from_str(trimmed).unwrap();
            assert_eq!(&parsed, expected_value, "{name}: parsed value");
        }
    }
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

#[test]
fn write_test_vectors() {
    let raw = include_str!("../../test-vectors/writes.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let path = case["path"].as_str().unwrap();
        let client = RestClient::with_transport(
            ClientConfig::new(BASE_URL),
            CannedTransport {
                response: simulated_response(&case["simulated_response"]),
                seen: Mutex::new(Vec::new()),
            },
        );
        let entity = serde_json::json!({ "name": "Prince" });

        let (response, method): (RestResponse, HttpMethod) = match case["operation"].as_str().unwrap() {
            "create" => (client.create(path, &entity).unwrap(), HttpMethod::Post),
            "update" => (client.update(path, &entity).unwrap(), HttpMethod::Put),
            "delete" => (client.delete(path, 1).unwrap(), HttpMethod::Delete),
            other => panic!("{name}: unknown operation: {other}"),
        };

        let seen = client.transport().seen.lock().unwrap().clone();
        assert_eq!(seen.len(), 1, "{name}: one request per call");
        assert_eq!(seen[0].method, method, "{name}: method");
        assert_eq!(seen[0].url, format!("{BASE_URL}/{path}"), "{name}: url");

        let expected = &case["expected"];
        assert_eq!(response.success, expected["success"].as_bool().unwrap(), "{name}: success");
        assert_eq!(
            response.status_code as u64,
            expected["status_code"].as_u64().unwrap(),
            "{name}: status"
        );
        assert_eq!(
            response.reason_phrase,
            expected["reason_phrase"].as_str().unwrap(),
            "{name}: reason"
        );
        assert_eq!(
            response.resource_location.map(|uri| uri.to_string()).as_deref(),
            expected["resource_location"].as_str(),
            "{name}: location"
        );
        assert_eq!(
            response.parsed_resource_id.as_deref(),
            expected["parsed_resource_id"].as_str(),
            "{name}: parsed id"
        );
        assert!(response.payload.is_none(), "{name}: writes carry no payload");
    }
}
