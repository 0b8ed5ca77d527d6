//! Mock Distance Matrix service for the HTTP provider tests.

use serde_json::{Value, json};
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path the provider is pointed at.
pub const MATRIX_PATH: &str = "/maps/api/distancematrix/json";

/// A [`MockServer`] driven from synchronous test code.
///
/// The server answers on its own thread, so the blocking provider can be
/// called outside [`DistanceService::block_on`].
pub struct DistanceService {
    runtime: Runtime,
    server: MockServer,
}

impl DistanceService {
    pub fn start() -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("test runtime");
        let server = runtime.block_on(MockServer::start());
        Self { runtime, server }
    }

    pub fn base_url(&self) -> String {
        format!("{}{MATRIX_PATH}", self.server.uri())
    }

    /// Answer lookups of exactly `destination` with `body`.
    pub fn answer(&self, destination: &str, body: Value) {
        let mock = Mock::given(method("GET"))
            .and(path(MATRIX_PATH))
            .and(query_param("destinations", destination))
            .respond_with(ResponseTemplate::new(200).set_body_json(body));
        self.runtime.block_on(mock.mount(&self.server));
    }

    /// Answer every lookup with `body`.
    pub fn answer_all(&self, body: Value) {
        let mock = Mock::given(method("GET"))
            .and(path(MATRIX_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(body));
        self.runtime.block_on(mock.mount(&self.server));
    }

    /// `destinations` parameter of every request received, in order.
    pub fn destinations(&self) -> Vec<String> {
        self.runtime
            .block_on(self.server.received_requests())
            .expect("request recording is enabled")
            .iter()
            .filter_map(|request| {
                request
                    .url
                    .query_pairs()
                    .find(|(key, _)| key == "destinations")
                    .map(|(_, value)| value.into_owned())
            })
            .collect()
    }
}

/// Response body holding one element with `status` and optional metres.
pub fn element_body(status: &str, metres: Option<u64>) -> Value {
    let mut element = json!({ "status": status });
    if let Some(value) = metres {
        element["distance"] = json!({ "text": format!("{} km", value / 1000), "value": value });
    }
    json!({ "status": "OK", "rows": [{ "elements": [element] }] })
}

/// Response body for a request-level failure.
pub fn service_error_body(status: &str, message: &str) -> Value {
    json!({ "status": status, "error_message": message, "rows": [] })
}
