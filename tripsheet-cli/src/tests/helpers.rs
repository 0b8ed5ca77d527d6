//! Test helpers for running the generate command against stub providers.

use super::*;
use crate::generate::{DistanceProviderBuilder, GenerateConfig, provider_for};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;
use tripsheet_core::{DistanceError, DistanceProvider, DistanceSource};
use tripsheet_data::DistanceCredentials;
use tripsheet_data::routing::test_support::StubDistanceProvider;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write fixture");
}

pub(super) fn utf8_tempdir() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

/// Hands out a stub answering `km` for every destination, or one whose
/// service is unreachable when `km` is `None`.
#[derive(Debug, Clone, Copy)]
pub(super) struct StubProviderBuilder {
    pub(super) km: Option<u32>,
}

impl DistanceProviderBuilder for StubProviderBuilder {
    fn build(
        &self,
        _config: &GenerateConfig,
        _seed: u64,
    ) -> Result<(Box<dyn DistanceProvider>, DistanceSource), CliError> {
        let provider = match self.km {
            Some(km) => StubDistanceProvider::with_distance(km),
            None => StubDistanceProvider::with_error(DistanceError::NetworkError {
                url: "http://127.0.0.1:9/json".to_owned(),
                message: "connection refused".to_owned(),
            }),
        };
        Ok((Box::new(provider), DistanceSource::Simulated))
    }
}

/// Goes through the real provider selection with no API key anywhere, so
/// every run uses the seeded simulation.
#[derive(Debug, Clone, Copy)]
pub(super) struct KeylessProviderBuilder;

impl DistanceProviderBuilder for KeylessProviderBuilder {
    fn build(
        &self,
        config: &GenerateConfig,
        seed: u64,
    ) -> Result<(Box<dyn DistanceProvider>, DistanceSource), CliError> {
        provider_for(config, &DistanceCredentials::default(), seed)
    }
}

/// Data rows of a CSV report, excluding the header and the total row.
pub(super) fn csv_rows(path: &Utf8Path) -> (Vec<String>, String) {
    let text = std::fs::read_to_string(path.as_std_path()).expect("read csv report");
    let mut lines: Vec<String> = text.lines().map(str::to_owned).collect();
    let total = lines.pop().expect("total row");
    let rows = lines.split_off(1);
    (rows, total)
}
