use thiserror::Error;

/// Errors from [`crate::distance::DistanceProvider::round_trip_km`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistanceError {
    /// The origin or destination was blank.
    ///
    /// Callers should reject empty location names before querying.
    #[error("origin and destination must not be empty")]
    EmptyLocation,
    /// The service answered but found no route between the two places.
    #[error("no route from {origin:?} to {destination:?} ({status})")]
    NoRoute {
        /// Origin as sent to the service.
        origin: String,
        /// Destination as sent to the service.
        destination: String,
        /// Element status reported by the service.
        status: String,
    },
    /// The request could not reach the service.
    #[error("network error calling {url}: {message}")]
    NetworkError {
        /// Requested URL, without credentials.
        url: String,
        /// Underlying error message.
        message: String,
    },
    /// The request exceeded the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL, without credentials.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The service returned a non-success HTTP status.
    #[error("HTTP {status} from {url}: {message}")]
    HttpError {
        /// Requested URL, without credentials.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Underlying error message.
        message: String,
    },
    /// The service reported a request-level failure.
    #[error("distance service error {code}: {message}")]
    ServiceError {
        /// Status code reported by the service, e.g. `REQUEST_DENIED`.
        code: String,
        /// Human readable explanation, possibly empty.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse distance response: {message}")]
    ParseError {
        /// Decoder error message.
        message: String,
    },
    /// No credential is configured for a provider that requires one.
    #[error("no API key configured for the distance service")]
    MissingCredential,
}
