//! Distance provider trait.

use super::error::DistanceError;

/// Fetch the round-trip driving distance between two places.
///
/// Implementers return the doubled one-way distance in whole kilometres.
/// Any failure means "unavailable" to the caller; the error explains why.
///
/// # Examples
///
/// ```rust
/// use tripsheet_core::{DistanceError, DistanceProvider};
///
/// struct FixedProvider;
///
/// impl DistanceProvider for FixedProvider {
///     fn round_trip_km(&self, origin: &str, destination: &str) -> Result<u32, DistanceError> {
///         if origin.trim().is_empty() || destination.trim().is_empty() {
///             return Err(DistanceError::EmptyLocation);
///         }
///         Ok(2 * 60)
///     }
/// }
///
/// assert_eq!(FixedProvider.round_trip_km("Den Haag", "Utrecht")?, 120);
/// # Ok::<(), DistanceError>(())
/// ```
pub trait DistanceProvider {
    /// Return the round-trip distance from `origin` to `destination`.
    ///
    /// Implementations must return `Err(DistanceError::EmptyLocation)` when
    /// either name is blank.
    fn round_trip_km(&self, origin: &str, destination: &str) -> Result<u32, DistanceError>;
}

impl<P: DistanceProvider + ?Sized> DistanceProvider for &P {
    fn round_trip_km(&self, origin: &str, destination: &str) -> Result<u32, DistanceError> {
        (**self).round_trip_km(origin, destination)
    }
}

impl<P: DistanceProvider + ?Sized> DistanceProvider for Box<P> {
    fn round_trip_km(&self, origin: &str, destination: &str) -> Result<u32, DistanceError> {
        (**self).round_trip_km(origin, destination)
    }
}
