//! Distance sources and catalogue loading for the tripsheet generator.
//!
//! Responsibilities:
//! - Implement [`tripsheet_core::DistanceProvider`] over the Google Distance
//!   Matrix API and over a seeded simulation.
//! - Resolve the API credential from its possible sources.
//! - Load destination catalogues from disk.
//!
//! Boundaries:
//! - Do not encode allocation rules (those live in `tripsheet-core`).
//! - Keep the synchronous provider interface; block on an owned runtime.

pub mod catalog_file;
pub mod credentials;
pub mod routing;
pub mod simulated;

pub use catalog_file::{CatalogFileError, load_catalog};
pub use credentials::{DistanceCredentials, GOOGLE_MAPS_API_KEY_ENV};
pub use routing::{
    AddressVariant, DEFAULT_BASE_URL, DEFAULT_USER_AGENT, HttpDistanceProvider,
    HttpDistanceProviderConfig, ProviderBuildError,
};
pub use simulated::SimulatedDistanceProvider;
