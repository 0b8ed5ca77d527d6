//! Google Distance Matrix API response types.
//!
//! The API returns one row per origin and one element per destination. The
//! provider always sends a single origin and destination, so only the first
//! element matters.
//!
//! See: <https://developers.google.com/maps/documentation/distance-matrix/distance-matrix>

use serde::Deserialize;

/// Top-level Distance Matrix response.
#[derive(Debug, Deserialize)]
pub struct DistanceMatrixResponse {
    /// Request status.
    ///
    /// Common values:
    /// - `"OK"` - the request was valid
    /// - `"INVALID_REQUEST"` - missing or malformed parameters
    /// - `"REQUEST_DENIED"` - the key was rejected
    /// - `"OVER_QUERY_LIMIT"` - quota exceeded
    pub status: String,

    /// Explanation accompanying a non-`OK` status.
    #[serde(default)]
    pub error_message: Option<String>,

    /// One row per origin.
    #[serde(default)]
    pub rows: Vec<Row>,
}

/// Results for one origin.
#[derive(Debug, Deserialize)]
pub struct Row {
    /// One element per destination.
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// Route between one origin and one destination.
#[derive(Debug, Deserialize)]
pub struct Element {
    /// `"OK"`, `"NOT_FOUND"` or `"ZERO_RESULTS"`.
    pub status: String,
    /// Present when `status` is `"OK"`.
    #[serde(default)]
    pub distance: Option<Measure>,
}

/// A measured quantity. The display text is ignored.
#[derive(Debug, Deserialize)]
pub struct Measure {
    /// Value in metres.
    pub value: u64,
}

impl DistanceMatrixResponse {
    /// Check if the request succeeded as a whole.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == "OK"
    }

    /// The element for the first origin and destination.
    #[must_use]
    pub fn first_element(&self) -> Option<&Element> {
        self.rows.first().and_then(|row| row.elements.first())
    }
}

impl Element {
    /// Check if a route was found.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == "OK"
    }
}
