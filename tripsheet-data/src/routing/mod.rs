//! HTTP distance lookups against the Google Distance Matrix API.
//!
//! [`HttpDistanceProvider`] implements the synchronous
//! [`tripsheet_core::DistanceProvider`] trait by blocking on async `reqwest`
//! calls. Each destination is tried under a sequence of
//! [`AddressVariant`]s until one resolves.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use tripsheet_core::DistanceProvider;
//! use tripsheet_data::routing::{HttpDistanceProvider, HttpDistanceProviderConfig};
//!
//! let config = HttpDistanceProviderConfig::new("my-api-key")
//!     .with_timeout(Duration::from_secs(10))
//!     .with_user_agent("my-app/1.0");
//! let provider = HttpDistanceProvider::with_config(config)?;
//!
//! let km = provider.round_trip_km("Den Haag", "Utrecht")?;
//! println!("round trip: {km} km");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod address;
mod distance_matrix;
mod provider;

#[doc(hidden)]
pub mod test_support;

pub use address::AddressVariant;
pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_USER_AGENT, HttpDistanceProvider, HttpDistanceProviderConfig,
    ProviderBuildError,
};
