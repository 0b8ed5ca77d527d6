//! Error types emitted by the tripsheet CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use thiserror::Error;
use tripsheet_core::{DistanceError, GenerationRequestError};
use tripsheet_data::{CatalogFileError, ProviderBuildError};

use crate::ExportError;

/// Errors emitted by the tripsheet CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (pass <{field}> or set {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// The merged request failed validation.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] GenerationRequestError),
    /// A custom destination catalogue could not be loaded.
    #[error(transparent)]
    Catalog(#[from] Box<CatalogFileError>),
    /// The HTTP distance provider could not be constructed.
    #[error("failed to build distance provider for {base_url}: {source}")]
    BuildDistanceProvider {
        base_url: String,
        #[source]
        source: ProviderBuildError,
    },
    /// The API key check could not complete a lookup.
    #[error("API key check failed: {0}")]
    KeyCheck(#[source] DistanceError),
    /// Writing a report file failed.
    #[error(transparent)]
    Export(#[from] ExportError),
    /// Writing to stdout failed.
    #[error("failed to write summary: {0}")]
    WriteSummary(#[source] std::io::Error),
}

impl From<CatalogFileError> for CliError {
    fn from(value: CatalogFileError) -> Self {
        Self::Catalog(Box::new(value))
    }
}
