//! `check-key` command: one live Distance Matrix lookup to confirm the API
//! key works before a real run depends on it.

use std::io::Write;

use clap::Parser;
use log::info;
use tripsheet_core::DistanceProvider;
use tripsheet_data::{
    DEFAULT_BASE_URL, DistanceCredentials, HttpDistanceProvider, HttpDistanceProviderConfig,
};

use crate::{
    ARG_CHECK_KEY_DESTINATION, ARG_CHECK_KEY_ORIGIN, ARG_GENERATE_DISTANCE_BASE_URL,
    ARG_GENERATE_GOOGLE_API_KEY, CliError,
};

/// Origin of the test lookup.
pub(crate) const DEFAULT_CHECK_ORIGIN: &str = "Amsterdam, Netherlands";
/// Destination of the test lookup.
pub(crate) const DEFAULT_CHECK_DESTINATION: &str = "Utrecht";

/// CLI arguments for the `check-key` subcommand.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "check-key",
    about = "Check that the Google Maps API key can look up a distance"
)]
pub(crate) struct CheckKeyArgs {
    /// Google Maps API key (falls back to `GOOGLE_MAPS_API_KEY`).
    #[arg(long = ARG_GENERATE_GOOGLE_API_KEY, value_name = "key")]
    pub(crate) google_api_key: Option<String>,
    /// Override the Distance Matrix endpoint.
    #[arg(long = ARG_GENERATE_DISTANCE_BASE_URL, value_name = "url")]
    pub(crate) distance_base_url: Option<String>,
    #[arg(long = ARG_CHECK_KEY_ORIGIN, value_name = "address", default_value = DEFAULT_CHECK_ORIGIN)]
    pub(crate) origin: String,
    #[arg(
        long = ARG_CHECK_KEY_DESTINATION,
        value_name = "address",
        default_value = DEFAULT_CHECK_DESTINATION
    )]
    pub(crate) destination: String,
}

pub(super) fn run_check_key(args: &CheckKeyArgs) -> Result<(), CliError> {
    let credentials = DistanceCredentials::resolve(args.google_api_key.as_deref(), None);
    let mut stdout = std::io::stdout().lock();
    check_key_with(args, &credentials, &mut stdout)
}

pub(super) fn check_key_with(
    args: &CheckKeyArgs,
    credentials: &DistanceCredentials,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let api_key = credentials.require().map_err(CliError::KeyCheck)?;
    let base_url = args
        .distance_base_url
        .clone()
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
    let config = HttpDistanceProviderConfig::new(api_key).with_base_url(base_url.clone());
    let provider = HttpDistanceProvider::with_config(config)
        .map_err(|source| CliError::BuildDistanceProvider { base_url, source })?;

    info!(
        "checking API key (from {:?}) with {} to {}",
        credentials.source(),
        args.origin,
        args.destination
    );
    let km = provider
        .round_trip_km(&args.origin, &args.destination)
        .map_err(CliError::KeyCheck)?;
    writeln!(
        writer,
        "API-sleutel werkt: {} - {} is {km}km heen en terug",
        args.origin, args.destination
    )
    .map_err(CliError::WriteSummary)
}
