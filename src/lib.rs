//! Facade crate for the tripsheet generator.
//!
//! This crate re-exports the core domain types: the allocation engine, its
//! collaborators and the records it produces. Distance providers backed by
//! external services live in `tripsheet-data`.

#![forbid(unsafe_code)]

pub use tripsheet_core::{
    AllocationOutcome, AllocationPlan, DateAllocator, DestinationCatalog, DestinationSelector,
    DistanceBucket, DistanceError, DistanceProvider, DistanceSource, GenerationRequest,
    GenerationRequestError, QuarterError, QuarterWindow, StopReason, TripAllocationEngine,
    TripRecord, TripReport,
};
