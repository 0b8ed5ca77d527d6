//! Look up round-trip distances between an origin and a destination.
//!
//! The `DistanceProvider` trait abstracts the service that turns a pair of
//! place names into a driving distance. Callers supply free-form location
//! strings and receive the round-trip distance in whole kilometres.
//!
//! Lookups may fail for a single destination (unknown place, no route) or for
//! every destination (network down, missing credential). The trait does not
//! distinguish the two; the allocation engine counts failures instead.

mod error;
mod provider;

pub use error::DistanceError;
pub use provider::DistanceProvider;
