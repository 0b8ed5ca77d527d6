//! Core domain types for the tripsheet generator.
//!
//! The crate turns a distance target and a calendar quarter into a list of
//! plausible trips. Distances come from a [`DistanceProvider`]; everything
//! else (destination choice, date choice, balancing the short/medium/long
//! mix) happens here and is deterministic for a given random generator.

mod bucket;
mod catalog;
mod dates;
pub mod distance;
mod engine;
mod quarter;
mod report;
mod request;
mod selector;
mod trip;

#[doc(hidden)]
pub mod test_support;

pub use bucket::{BucketKm, DistanceBucket, MEDIUM_MAX_KM, MEDIUM_MIN_KM, most_underserved};
pub use catalog::{CatalogError, DestinationCatalog};
pub use dates::{DEFAULT_DATE_CAP, DEFAULT_SAMPLE_ATTEMPTS, DateAllocator};
pub use distance::{DistanceError, DistanceProvider};
pub use engine::{
    AllocationLimits, AllocationOutcome, AllocationState, DEFAULT_MAX_ATTEMPTS,
    DEFAULT_MAX_FAILED_DESTINATIONS, StopReason, TripAllocationEngine,
};
pub use quarter::{QuarterError, QuarterWindow};
pub use report::{DistanceSource, TripReport};
pub use request::{AllocationPlan, GenerationRequest, GenerationRequestError};
pub use selector::{DEFAULT_DESTINATION_CAP, DestinationSelector};
pub use trip::{DEFAULT_DESCRIPTION, REPORT_DATE_FORMAT, TripRecord, total_km};
