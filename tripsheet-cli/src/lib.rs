//! Command-line interface for generating quarterly trip reports.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod check_key;
mod error;
mod export;
mod generate;

pub use error::CliError;
pub use export::{
    CSV_HEADERS, ExportError, ReportPaths, XLSX_SHEET_NAME, write_csv, write_json, write_summary,
    write_xlsx,
};

use check_key::{CheckKeyArgs, run_check_key};
use generate::{GenerateArgs, run_generate};

pub(crate) const ARG_GENERATE_YEAR: &str = "year";
pub(crate) const ARG_GENERATE_QUARTER: &str = "quarter";
pub(crate) const ARG_GENERATE_TARGET_KM: &str = "target-km";
pub(crate) const ARG_GENERATE_ORIGIN: &str = "origin";
pub(crate) const ARG_GENERATE_OUTPUT: &str = "output";
pub(crate) const ARG_GENERATE_JSON: &str = "json";
pub(crate) const ARG_GENERATE_XLSX: &str = "xlsx";
pub(crate) const ARG_GENERATE_SEED: &str = "seed";
pub(crate) const ARG_GENERATE_GOOGLE_API_KEY: &str = "google-api-key";
pub(crate) const ARG_GENERATE_DISTANCE_BASE_URL: &str = "distance-base-url";
pub(crate) const ARG_GENERATE_DESCRIPTION: &str = "description";
pub(crate) const ARG_GENERATE_CATALOG: &str = "catalog";
pub(crate) const ARG_CHECK_KEY_ORIGIN: &str = "origin";
pub(crate) const ARG_CHECK_KEY_DESTINATION: &str = "destination";
pub(crate) const ENV_GENERATE_YEAR: &str = "TRIPSHEET_CMDS_GENERATE_YEAR";
pub(crate) const ENV_GENERATE_QUARTER: &str = "TRIPSHEET_CMDS_GENERATE_QUARTER";
pub(crate) const ENV_GENERATE_TARGET_KM: &str = "TRIPSHEET_CMDS_GENERATE_TARGET_KM";
pub(crate) const ENV_GENERATE_ORIGIN: &str = "TRIPSHEET_CMDS_GENERATE_ORIGIN";

/// Run the tripsheet CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::CheckKey(args) => run_check_key(&args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "tripsheet",
    about = "Generate plausible quarterly trip reports",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate trips for one quarter and write them as CSV (and JSON or Excel).
    Generate(GenerateArgs),
    /// Look up one known distance to confirm the API key works.
    CheckKey(CheckKeyArgs),
}

#[cfg(test)]
mod tests;
