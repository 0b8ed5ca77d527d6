//! Loading destination catalogues from JSON files.

use camino::Utf8Path;
use log::info;
use thiserror::Error;
use tripsheet_core::{CatalogError, DestinationCatalog};

/// Errors raised while loading a catalogue file.
#[derive(Debug, Error)]
pub enum CatalogFileError {
    /// The path does not point at a regular file.
    #[error("catalogue file {path} does not exist or is not a file")]
    Missing {
        /// Requested path.
        path: String,
    },
    /// The file could not be read.
    #[error("failed to read catalogue file {path}: {source}")]
    Io {
        /// Requested path.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The contents were not a valid catalogue.
    #[error("invalid catalogue in {path}: {source}")]
    Invalid {
        /// Requested path.
        path: String,
        /// Decoding or validation error.
        #[source]
        source: CatalogError,
    },
}

/// Load a catalogue of the form `{"short": [..], "medium": [..], "long": [..]}`.
pub fn load_catalog(path: &Utf8Path) -> Result<DestinationCatalog, CatalogFileError> {
    let io_error = |source| CatalogFileError::Io {
        path: path.to_string(),
        source,
    };
    if !tripsheet_fs::file_is_file(path).map_err(io_error)? {
        return Err(CatalogFileError::Missing {
            path: path.to_string(),
        });
    }
    let json = tripsheet_fs::read_to_string(path).map_err(io_error)?;
    let catalog =
        DestinationCatalog::from_json(&json).map_err(|source| CatalogFileError::Invalid {
            path: path.to_string(),
            source,
        })?;
    info!(
        "loaded {} destinations from {path}",
        catalog.all().count()
    );
    Ok(catalog)
}
