//! Deterministic `DistanceProvider` doubles for unit and behaviour tests.
//!
//! None of these providers touch the network. They are always compiled so
//! downstream crates can use them in their own tests.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::{DistanceError, DistanceProvider};

fn check_locations(origin: &str, destination: &str) -> Result<(), DistanceError> {
    if origin.trim().is_empty() || destination.trim().is_empty() {
        return Err(DistanceError::EmptyLocation);
    }
    Ok(())
}

/// Returns the same round-trip distance for every destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantDistanceProvider {
    km: u32,
}

impl ConstantDistanceProvider {
    /// Provider answering `km` for every lookup.
    #[must_use]
    pub const fn new(km: u32) -> Self {
        Self { km }
    }
}

impl DistanceProvider for ConstantDistanceProvider {
    fn round_trip_km(&self, origin: &str, destination: &str) -> Result<u32, DistanceError> {
        check_locations(origin, destination)?;
        Ok(self.km)
    }
}

/// Fails every lookup as if the routing service were unreachable.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingDistanceProvider;

impl DistanceProvider for FailingDistanceProvider {
    fn round_trip_km(&self, origin: &str, destination: &str) -> Result<u32, DistanceError> {
        check_locations(origin, destination)?;
        Err(DistanceError::NetworkError {
            url: "stub://distance".to_owned(),
            message: "connection refused".to_owned(),
        })
    }
}

/// Looks distances up in a fixed table and records every query.
///
/// Destinations missing from the table fail with
/// [`DistanceError::NoRoute`].
///
/// # Examples
/// ```
/// use tripsheet_core::DistanceProvider;
/// use tripsheet_core::test_support::TableDistanceProvider;
///
/// let provider = TableDistanceProvider::new([("Delft", 40)]);
/// assert_eq!(provider.round_trip_km("Den Haag", "Delft"), Ok(40));
/// assert!(provider.round_trip_km("Den Haag", "Gent").is_err());
/// assert_eq!(provider.lookups(), ["Delft", "Gent"]);
/// ```
#[derive(Debug, Default)]
pub struct TableDistanceProvider {
    table: HashMap<String, u32>,
    lookups: RefCell<Vec<String>>,
}

impl TableDistanceProvider {
    /// Provider backed by `entries` of destination name and round-trip km.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        Self {
            table: entries
                .into_iter()
                .map(|(name, km)| (name.into(), km))
                .collect(),
            lookups: RefCell::default(),
        }
    }

    /// Destinations queried so far, in call order.
    #[must_use]
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.borrow().clone()
    }
}

impl DistanceProvider for TableDistanceProvider {
    fn round_trip_km(&self, origin: &str, destination: &str) -> Result<u32, DistanceError> {
        check_locations(origin, destination)?;
        self.lookups.borrow_mut().push(destination.to_owned());
        self.table
            .get(destination)
            .copied()
            .ok_or_else(|| DistanceError::NoRoute {
                origin: origin.to_owned(),
                destination: destination.to_owned(),
                status: "NOT_FOUND".to_owned(),
            })
    }
}
