//! Generate command implementation for the tripsheet CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use log::{info, warn};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use tripsheet_core::{
    DEFAULT_DESCRIPTION, DateAllocator, DestinationCatalog, DestinationSelector, DistanceProvider,
    DistanceSource, GenerationRequest, TripAllocationEngine, TripReport,
};
use tripsheet_data::{
    DEFAULT_BASE_URL, DistanceCredentials, GOOGLE_MAPS_API_KEY_ENV, HttpDistanceProvider,
    HttpDistanceProviderConfig, SimulatedDistanceProvider, load_catalog,
};

use crate::export::{ReportPaths, write_csv, write_json, write_summary, write_xlsx};
use crate::{
    ARG_GENERATE_CATALOG, ARG_GENERATE_DESCRIPTION, ARG_GENERATE_DISTANCE_BASE_URL,
    ARG_GENERATE_GOOGLE_API_KEY, ARG_GENERATE_JSON, ARG_GENERATE_ORIGIN, ARG_GENERATE_OUTPUT,
    ARG_GENERATE_QUARTER, ARG_GENERATE_SEED, ARG_GENERATE_TARGET_KM, ARG_GENERATE_XLSX,
    ARG_GENERATE_YEAR, CliError,
    ENV_GENERATE_ORIGIN, ENV_GENERATE_QUARTER, ENV_GENERATE_TARGET_KM, ENV_GENERATE_YEAR,
};

/// CLI arguments for the `generate` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "generate",
    long_about = "Generate trips for one calendar quarter that add up to a \
                 target distance, then write them as CSV (and optionally \
                 JSON or an Excel workbook). Every value can also come from a configuration file \
                 or TRIPSHEET_CMDS_GENERATE_* environment variables.",
    about = "Generate a quarterly trip report"
)]
#[ortho_config(prefix = "TRIPSHEET")]
pub(crate) struct GenerateArgs {
    /// Calendar year of the report.
    #[arg(value_name = ARG_GENERATE_YEAR)]
    #[serde(default)]
    pub(crate) year: Option<i32>,
    /// Quarter number (1-4).
    #[arg(value_name = ARG_GENERATE_QUARTER)]
    #[serde(default)]
    pub(crate) quarter: Option<u8>,
    /// Total round-trip kilometres to reach.
    #[arg(value_name = ARG_GENERATE_TARGET_KM)]
    #[serde(default)]
    pub(crate) target_km: Option<u32>,
    /// Address every trip starts from and returns to.
    #[arg(value_name = ARG_GENERATE_ORIGIN)]
    #[serde(default)]
    pub(crate) origin: Option<String>,
    /// CSV output path (defaults to `reisverslag_<year>_Q<quarter>.csv`).
    #[arg(long = ARG_GENERATE_OUTPUT, short = 'o', value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Also write a JSON file next to the CSV.
    #[arg(
        long = ARG_GENERATE_JSON,
        value_name = "bool",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    #[serde(default)]
    pub(crate) json: Option<bool>,
    /// Also write an Excel workbook next to the CSV.
    #[arg(
        long = ARG_GENERATE_XLSX,
        value_name = "bool",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    #[serde(default)]
    pub(crate) xlsx: Option<bool>,
    /// Seed for reproducible output.
    #[arg(long = ARG_GENERATE_SEED, value_name = "u64")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
    /// Google Maps API key (falls back to `GOOGLE_MAPS_API_KEY`).
    #[arg(long = ARG_GENERATE_GOOGLE_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) google_api_key: Option<String>,
    /// Override the Distance Matrix endpoint.
    #[arg(long = ARG_GENERATE_DISTANCE_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) distance_base_url: Option<String>,
    /// Description written on every trip.
    #[arg(long = ARG_GENERATE_DESCRIPTION, value_name = "text")]
    #[serde(default)]
    pub(crate) description: Option<String>,
    /// JSON destination catalogue replacing the built-in one.
    #[arg(long = ARG_GENERATE_CATALOG, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog: Option<Utf8PathBuf>,
}

impl GenerateArgs {
    pub(crate) fn into_config(self) -> Result<GenerateConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        GenerateConfig::try_from(merged)
    }
}

/// Resolved `generate` command configuration.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct GenerateConfig {
    /// Year, quarter, target, origin and seed.
    pub(crate) request: GenerationRequest,
    /// Explicit CSV path.
    pub(crate) output: Option<Utf8PathBuf>,
    /// Whether to write the JSON file as well.
    pub(crate) json: bool,
    /// Whether to write the Excel workbook as well.
    pub(crate) xlsx: bool,
    pub(crate) google_api_key: Option<String>,
    pub(crate) distance_base_url: Option<String>,
    pub(crate) description: String,
    pub(crate) catalog: Option<Utf8PathBuf>,
}

impl std::fmt::Debug for GenerateConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerateConfig")
            .field("request", &self.request)
            .field("output", &self.output)
            .field("json", &self.json)
            .field("xlsx", &self.xlsx)
            .field(
                "google_api_key",
                &self.google_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("distance_base_url", &self.distance_base_url)
            .field("description", &self.description)
            .field("catalog", &self.catalog)
            .finish()
    }
}

impl GenerateConfig {
    /// CSV destination for `report`.
    pub(crate) fn csv_path(&self, report: &TripReport) -> Utf8PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| Utf8PathBuf::from(format!("{}.csv", report.default_file_stem())))
    }

    fn destinations(&self) -> Result<DestinationCatalog, CliError> {
        match &self.catalog {
            Some(path) => Ok(load_catalog(path)?),
            None => Ok(DestinationCatalog::default()),
        }
    }
}

impl TryFrom<GenerateArgs> for GenerateConfig {
    type Error = CliError;

    fn try_from(args: GenerateArgs) -> Result<Self, Self::Error> {
        let year = args.year.ok_or(CliError::MissingArgument {
            field: ARG_GENERATE_YEAR,
            env: ENV_GENERATE_YEAR,
        })?;
        let quarter = args.quarter.ok_or(CliError::MissingArgument {
            field: ARG_GENERATE_QUARTER,
            env: ENV_GENERATE_QUARTER,
        })?;
        let target_km = args.target_km.ok_or(CliError::MissingArgument {
            field: ARG_GENERATE_TARGET_KM,
            env: ENV_GENERATE_TARGET_KM,
        })?;
        let origin = args.origin.ok_or(CliError::MissingArgument {
            field: ARG_GENERATE_ORIGIN,
            env: ENV_GENERATE_ORIGIN,
        })?;
        let description = args
            .description
            .map(|text| text.trim().to_owned())
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_owned());

        Ok(Self {
            request: GenerationRequest {
                year,
                quarter,
                target_km,
                origin,
                seed: args.seed,
            },
            output: args.output,
            json: args.json.unwrap_or(false),
            xlsx: args.xlsx.unwrap_or(false),
            google_api_key: args.google_api_key,
            distance_base_url: args.distance_base_url,
            description,
            catalog: args.catalog,
        })
    }
}

/// Builds the distance provider for the current generate invocation.
pub(super) trait DistanceProviderBuilder {
    fn build(
        &self,
        config: &GenerateConfig,
        seed: u64,
    ) -> Result<(Box<dyn DistanceProvider>, DistanceSource), CliError>;
}

/// Uses Google when a key is available and the simulation otherwise.
pub(super) struct DefaultDistanceProviderBuilder;

impl DistanceProviderBuilder for DefaultDistanceProviderBuilder {
    fn build(
        &self,
        config: &GenerateConfig,
        seed: u64,
    ) -> Result<(Box<dyn DistanceProvider>, DistanceSource), CliError> {
        let credentials = DistanceCredentials::resolve(None, config.google_api_key.as_deref());
        provider_for(config, &credentials, seed)
    }
}

pub(super) fn provider_for(
    config: &GenerateConfig,
    credentials: &DistanceCredentials,
    seed: u64,
) -> Result<(Box<dyn DistanceProvider>, DistanceSource), CliError> {
    let Some(api_key) = credentials.api_key() else {
        warn!(
            "no Google Maps API key (set --{ARG_GENERATE_GOOGLE_API_KEY} or \
             {GOOGLE_MAPS_API_KEY_ENV}); using simulated distances"
        );
        return Ok((
            Box::new(SimulatedDistanceProvider::new(seed)),
            DistanceSource::Simulated,
        ));
    };
    let base_url = config
        .distance_base_url
        .clone()
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
    let http_config = HttpDistanceProviderConfig::new(api_key).with_base_url(base_url.clone());
    let provider = HttpDistanceProvider::with_config(http_config)
        .map_err(|source| CliError::BuildDistanceProvider { base_url, source })?;
    info!(
        "using Google distances (key from {:?})",
        credentials.source()
    );
    Ok((Box::new(provider), DistanceSource::Google))
}

pub(super) fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultDistanceProviderBuilder;
    run_generate_with(args, &builder, &mut stdout)
}

pub(super) fn run_generate_with(
    args: GenerateArgs,
    builder: &dyn DistanceProviderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    generate_with_config(&config, builder, writer)
}

pub(super) fn generate_with_config(
    config: &GenerateConfig,
    builder: &dyn DistanceProviderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let plan = config.request.validate()?;
    let catalog = config.destinations()?;
    let seed = config.request.seed.unwrap_or_else(|| {
        let seed = rand::random();
        info!("no seed given; using {seed}");
        seed
    });
    let (provider, source) = builder.build(config, seed)?;
    info!(
        "generating {} from {} towards {} km",
        plan.window.label(),
        plan.origin,
        plan.target_km
    );
    let engine = TripAllocationEngine::with_parts(
        provider,
        DestinationSelector::new(catalog),
        DateAllocator::default(),
    )
    .with_description(config.description.as_str());
    let outcome = engine.generate_seeded(&plan, seed);
    let report = TripReport::new(&plan, outcome, source);

    let paths = ReportPaths::beside(config.csv_path(&report), config.json, config.xlsx);
    write_csv(&paths.csv, &report)?;
    if let Some(path) = &paths.json {
        write_json(path, &report)?;
    }
    if let Some(path) = &paths.xlsx {
        write_xlsx(path, &report)?;
    }
    write_summary(writer, &report, &paths).map_err(CliError::WriteSummary)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<GenerateConfig, CliError> {
    let merged = GenerateArgs::merge_from_layers(layers).map_err(CliError::from)?;
    GenerateConfig::try_from(merged)
}
