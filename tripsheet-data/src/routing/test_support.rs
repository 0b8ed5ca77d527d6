//! Test utilities for distance providers.
//!
//! [`StubDistanceProvider`] answers from a script of per-destination
//! responses without making HTTP requests.

use std::collections::HashMap;

use tripsheet_core::{DistanceError, DistanceProvider};

/// Stub `DistanceProvider` for testing.
///
/// Each destination can be given its own distance or error; everything else
/// gets the default response.
///
/// # Example
///
/// ```
/// use tripsheet_core::{DistanceError, DistanceProvider};
/// use tripsheet_data::routing::test_support::StubDistanceProvider;
///
/// let provider = StubDistanceProvider::with_distance(120)
///     .with_destination("Gent", Ok(340))
///     .with_destination("Atlantis", Err(DistanceError::NoRoute {
///         origin: "Den Haag".into(),
///         destination: "Atlantis".into(),
///         status: "NOT_FOUND".into(),
///     }));
///
/// assert_eq!(provider.round_trip_km("Den Haag", "Delft"), Ok(120));
/// assert_eq!(provider.round_trip_km("Den Haag", "Gent"), Ok(340));
/// assert!(provider.round_trip_km("Den Haag", "Atlantis").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct StubDistanceProvider {
    default: Result<u32, DistanceError>,
    scripted: HashMap<String, Result<u32, DistanceError>>,
}

impl StubDistanceProvider {
    /// Create a provider that returns `km` for every destination.
    #[must_use]
    pub fn with_distance(km: u32) -> Self {
        Self {
            default: Ok(km),
            scripted: HashMap::new(),
        }
    }

    /// Create a provider that fails every lookup with `error`.
    ///
    /// Blank input still returns `DistanceError::EmptyLocation`.
    #[must_use]
    pub fn with_error(error: DistanceError) -> Self {
        Self {
            default: Err(error),
            scripted: HashMap::new(),
        }
    }

    /// Script the response for one destination.
    #[must_use]
    pub fn with_destination(
        mut self,
        destination: impl Into<String>,
        response: Result<u32, DistanceError>,
    ) -> Self {
        self.scripted.insert(destination.into(), response);
        self
    }
}

impl DistanceProvider for StubDistanceProvider {
    fn round_trip_km(&self, origin: &str, destination: &str) -> Result<u32, DistanceError> {
        if origin.trim().is_empty() || destination.trim().is_empty() {
            return Err(DistanceError::EmptyLocation);
        }
        self.scripted
            .get(destination.trim())
            .unwrap_or(&self.default)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn with_distance_returns_configured_value() {
        let provider = StubDistanceProvider::with_distance(88);
        assert_eq!(provider.round_trip_km("Den Haag", "Leiden"), Ok(88));
    }

    #[rstest]
    fn with_error_returns_configured_error() {
        let provider = StubDistanceProvider::with_error(DistanceError::NetworkError {
            url: "http://example.com".to_string(),
            message: "connection refused".to_string(),
        });

        let err = provider
            .round_trip_km("Den Haag", "Leiden")
            .expect_err("should fail");

        assert!(matches!(err, DistanceError::NetworkError { .. }));
    }

    #[rstest]
    fn scripted_destination_overrides_default() {
        let provider = StubDistanceProvider::with_error(DistanceError::MissingCredential)
            .with_destination("Gouda", Ok(60));
        assert_eq!(provider.round_trip_km("Den Haag", " Gouda "), Ok(60));
        assert_eq!(
            provider.round_trip_km("Den Haag", "Delft"),
            Err(DistanceError::MissingCredential)
        );
    }

    #[rstest]
    fn empty_input_returns_empty_location_error() {
        let provider = StubDistanceProvider::with_distance(10);
        assert_eq!(
            provider.round_trip_km("Den Haag", ""),
            Err(DistanceError::EmptyLocation)
        );
    }
}
