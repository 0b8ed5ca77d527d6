//! Destination selection under reuse and failure constraints.

use std::collections::{HashMap, HashSet};

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::{DestinationCatalog, DistanceBucket};

/// Default number of times one destination may appear in a report.
pub const DEFAULT_DESTINATION_CAP: u32 = 3;

/// Chooses destinations for a requested bucket.
///
/// A destination is eligible when it has not failed a distance lookup in the
/// current run and has been used fewer than `cap` times. The requested
/// bucket's pool is tried first; when it has no eligible name the whole
/// catalogue is searched under the same rules.
///
/// # Examples
/// ```
/// use std::collections::{HashMap, HashSet};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use tripsheet_core::{DestinationCatalog, DestinationSelector, DistanceBucket};
///
/// # fn main() -> Result<(), tripsheet_core::CatalogError> {
/// let catalog = DestinationCatalog::new(vec!["Delft".into()], vec!["Breda".into()], vec![])?;
/// let selector = DestinationSelector::new(catalog);
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
///
/// let usage = HashMap::from([("Breda".to_string(), 3)]);
/// // Breda is used up, so the medium request falls back to the full catalogue.
/// let pick = selector.pick(DistanceBucket::Medium, &HashSet::new(), &usage, &mut rng);
/// assert_eq!(pick, Some("Delft"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DestinationSelector {
    catalog: DestinationCatalog,
    cap: u32,
}

impl DestinationSelector {
    /// Selector over `catalog` with the default reuse cap.
    #[must_use]
    pub const fn new(catalog: DestinationCatalog) -> Self {
        Self::with_cap(catalog, DEFAULT_DESTINATION_CAP)
    }

    /// Selector over `catalog` allowing each destination `cap` times.
    #[must_use]
    pub const fn with_cap(catalog: DestinationCatalog, cap: u32) -> Self {
        Self { catalog, cap }
    }

    /// The catalogue this selector draws from.
    #[must_use]
    pub const fn catalog(&self) -> &DestinationCatalog {
        &self.catalog
    }

    /// Maximum uses per destination.
    #[must_use]
    pub const fn cap(&self) -> u32 {
        self.cap
    }

    /// Whether `name` may still be chosen.
    #[must_use]
    pub fn is_eligible(
        &self,
        name: &str,
        failed: &HashSet<String>,
        usage: &HashMap<String, u32>,
    ) -> bool {
        !failed.contains(name) && usage.get(name).copied().unwrap_or(0) < self.cap
    }

    /// Pick a destination for `bucket`, or `None` when nothing is eligible.
    pub fn pick<R>(
        &self,
        bucket: DistanceBucket,
        failed: &HashSet<String>,
        usage: &HashMap<String, u32>,
        rng: &mut R,
    ) -> Option<&str>
    where
        R: Rng + ?Sized,
    {
        let preferred: Vec<&str> = self
            .catalog
            .pool(bucket)
            .iter()
            .map(String::as_str)
            .filter(|name| self.is_eligible(name, failed, usage))
            .collect();
        if let Some(name) = preferred.choose(rng) {
            return Some(*name);
        }

        let fallback: Vec<&str> = self
            .catalog
            .all()
            .filter(|name| self.is_eligible(name, failed, usage))
            .collect();
        let choice = fallback.choose(rng).copied();
        if choice.is_some() {
            debug!("{bucket} pool exhausted, picking from the full catalogue");
        }
        choice
    }
}
