//! HTTP-based `DistanceProvider` using the Google Distance Matrix API.
//!
//! # Architecture
//!
//! The [`DistanceProvider`] trait is synchronous so the allocation engine
//! stays a plain loop. This provider bridges the async HTTP calls to the sync
//! interface by blocking on a Tokio runtime it owns.
//!
//! One lookup sends a single origin and destination with `mode=driving`,
//! `units=metric` and `avoid=tolls`. The element distance in metres is
//! rounded to whole kilometres and doubled.

use std::time::Duration;

use log::debug;
use reqwest::Client;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use tripsheet_core::{DistanceError, DistanceProvider};
use url::Url;

use super::address::AddressVariant;
use super::distance_matrix::DistanceMatrixResponse;

/// Error type for [`HttpDistanceProvider`] construction failures.
#[derive(Debug)]
pub enum ProviderBuildError {
    /// The API key was blank.
    MissingApiKey,
    /// The base URL could not be parsed.
    InvalidBaseUrl(url::ParseError),
    /// Failed to build the HTTP client.
    HttpClient(reqwest::Error),
    /// Failed to build the Tokio runtime.
    Runtime(std::io::Error),
}

impl std::fmt::Display for ProviderBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingApiKey => write!(f, "an API key is required for the distance service"),
            Self::InvalidBaseUrl(err) => write!(f, "invalid distance service URL: {err}"),
            Self::HttpClient(err) => write!(f, "failed to build HTTP client: {err}"),
            Self::Runtime(err) => write!(f, "failed to build Tokio runtime: {err}"),
        }
    }
}

impl std::error::Error for ProviderBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MissingApiKey => None,
            Self::InvalidBaseUrl(err) => Some(err),
            Self::HttpClient(err) => Some(err),
            Self::Runtime(err) => Some(err),
        }
    }
}

/// Default user agent for Distance Matrix requests.
pub const DEFAULT_USER_AGENT: &str = "tripsheet-routing/0.1";

/// Default Distance Matrix endpoint.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/distancematrix/json";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`HttpDistanceProvider`].
#[derive(Clone)]
pub struct HttpDistanceProviderConfig {
    /// Distance Matrix endpoint.
    pub base_url: String,
    /// API key sent with every request.
    pub api_key: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
    /// Address spellings tried for each destination, in order.
    pub variants: Vec<AddressVariant>,
}

impl std::fmt::Debug for HttpDistanceProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpDistanceProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("variants", &self.variants)
            .finish()
    }
}

impl HttpDistanceProviderConfig {
    /// Create a configuration for the public endpoint using `api_key`.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            variants: AddressVariant::DEFAULT.to_vec(),
        }
    }

    /// Point the provider at another endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Replace the address spellings tried per destination.
    #[must_use]
    pub fn with_variants(mut self, variants: impl Into<Vec<AddressVariant>>) -> Self {
        self.variants = variants.into();
        self
    }
}

/// Distance provider backed by the Google Distance Matrix API.
///
/// # Runtime behaviour
///
/// Outside any Tokio runtime the provider blocks on its own current-thread
/// runtime. Inside a multi-threaded runtime it uses that runtime's handle
/// with [`tokio::task::block_in_place`]. Inside a `current_thread` runtime
/// it falls back to its own runtime, which may deadlock if the caller's
/// runtime drives IO this request depends on.
///
/// # Address variants
///
/// Each destination is spelled with every configured [`AddressVariant`] in
/// turn. Only "no route" answers move on to the next spelling; transport
/// and service errors are returned straight away since another spelling
/// will not fix them.
pub struct HttpDistanceProvider {
    client: Client,
    endpoint: Url,
    config: HttpDistanceProviderConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpDistanceProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpDistanceProvider")
            .field("client", &self.client)
            .field("endpoint", &self.endpoint.as_str())
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl HttpDistanceProvider {
    /// Create a provider for the public endpoint with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is blank or the HTTP client or Tokio
    /// runtime fails to build.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpDistanceProviderConfig::new(api_key))
    }

    /// Create a provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is blank, the base URL does not parse, or
    /// the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: HttpDistanceProviderConfig) -> Result<Self, ProviderBuildError> {
        if config.api_key.trim().is_empty() {
            return Err(ProviderBuildError::MissingApiKey);
        }
        let endpoint = Url::parse(&config.base_url).map_err(ProviderBuildError::InvalidBaseUrl)?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            endpoint,
            config,
            runtime,
        })
    }

    /// The configuration this provider was built with.
    #[must_use]
    pub const fn config(&self) -> &HttpDistanceProviderConfig {
        &self.config
    }

    /// Build the request URL without the API key.
    ///
    /// This form is safe to put in error messages and logs.
    fn build_public_url(&self, origin: &str, destination: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("origins", origin)
            .append_pair("destinations", destination)
            .append_pair("mode", "driving")
            .append_pair("units", "metric")
            .append_pair("avoid", "tolls");
        url
    }

    /// Fetch the round-trip distance for one address spelling.
    async fn fetch_round_trip(&self, origin: &str, destination: &str) -> Result<u32, DistanceError> {
        let public_url = self.build_public_url(origin, destination);
        let shown = public_url.to_string();
        let mut url = public_url;
        url.query_pairs_mut().append_pair("key", &self.config.api_key);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(err, &shown))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(err, &shown))?;

        let body: DistanceMatrixResponse =
            response
                .json()
                .await
                .map_err(|err| DistanceError::ParseError {
                    message: err.without_url().to_string(),
                })?;

        convert_response(&body, origin, destination)
    }

    /// Convert a reqwest error to a `DistanceError`.
    ///
    /// The URL is stripped from the error so the key never reaches a message.
    fn convert_reqwest_error(&self, error: reqwest::Error, url: &str) -> DistanceError {
        let error = error.without_url();
        if error.is_timeout() {
            return DistanceError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return DistanceError::HttpError {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        DistanceError::NetworkError {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }

    fn lookup(&self, origin: &str, destination: &str) -> Result<u32, DistanceError> {
        let future = self.fetch_round_trip(origin, destination);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}

/// Turn a parsed response into a round-trip distance.
fn convert_response(
    response: &DistanceMatrixResponse,
    origin: &str,
    destination: &str,
) -> Result<u32, DistanceError> {
    if !response.is_ok() {
        return Err(DistanceError::ServiceError {
            code: response.status.clone(),
            message: response.error_message.clone().unwrap_or_default(),
        });
    }

    let element = response
        .first_element()
        .ok_or_else(|| DistanceError::ParseError {
            message: "Distance Matrix response has no elements".to_owned(),
        })?;
    if !element.is_ok() {
        return Err(DistanceError::NoRoute {
            origin: origin.to_owned(),
            destination: destination.to_owned(),
            status: element.status.clone(),
        });
    }

    let metres = element
        .distance
        .as_ref()
        .map(|distance| distance.value)
        .ok_or_else(|| DistanceError::ParseError {
            message: "Distance Matrix element is missing its distance".to_owned(),
        })?;
    round_trip_km_from_metres(metres)
}

/// Round one-way metres to whole kilometres (half up) and double.
fn round_trip_km_from_metres(metres: u64) -> Result<u32, DistanceError> {
    let one_way_km = metres.saturating_add(500) / 1000;
    u32::try_from(one_way_km.saturating_mul(2)).map_err(|_| DistanceError::ParseError {
        message: format!("distance of {metres} m is out of range"),
    })
}

impl DistanceProvider for HttpDistanceProvider {
    /// Look up the round trip, trying each address spelling in turn.
    ///
    /// # Runtime requirements
    ///
    /// When called from within an existing Tokio runtime, the runtime must be
    /// multi-threaded. A `current_thread` caller falls back to the internal
    /// runtime and may deadlock.
    fn round_trip_km(&self, origin: &str, destination: &str) -> Result<u32, DistanceError> {
        let origin = origin.trim();
        let destination = destination.trim();
        if origin.is_empty() || destination.is_empty() {
            return Err(DistanceError::EmptyLocation);
        }

        let mut last_error = None;
        for address in AddressVariant::candidates(&self.config.variants, destination) {
            match self.lookup(origin, &address) {
                Ok(km) => return Ok(km),
                Err(err @ DistanceError::NoRoute { .. }) => {
                    debug!("no route to {address:?}, trying the next spelling");
                    last_error = Some(err);
                }
                Err(err) => return Err(err),
            }
        }
        Err(last_error.unwrap_or_else(|| DistanceError::NoRoute {
            origin: origin.to_owned(),
            destination: destination.to_owned(),
            status: "NO_ADDRESS_VARIANTS".to_owned(),
        }))
    }
}
