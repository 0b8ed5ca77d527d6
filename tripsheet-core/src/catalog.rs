//! Destination catalogue partitioned by distance bucket.
//!
//! The built-in catalogue lists towns in the Netherlands and Flanders,
//! grouped by their usual round-trip distance from the western Randstad.
//! The grouping steers selection only; the distance provider has the final
//! word on which bucket a trip lands in.

use std::sync::LazyLock;

use thiserror::Error;

use crate::DistanceBucket;

const SHORT_DESTINATIONS: &[&str] = &[
    "Delft", "Leiden", "Zoetermeer", "Rijswijk", "Voorschoten", "Leidschendam",
    "Wassenaar", "Katwijk", "Noordwijk", "Oegstgeest", "Leiderdorp", "Zoeterwoude",
    "Alphen aan den Rijn", "Bodegraven", "Boskoop", "Waddinxveen", "Gouda",
    "Schiedam", "Vlaardingen", "Rotterdam", "Capelle aan den IJssel", "Barendrecht",
    "Ridderkerk", "Spijkenisse", "Lisse", "Hillegom", "Sassenheim", "Voorhout",
    "Haarlem", "Heemstede", "Hoofddorp", "Aalsmeer", "Woerden", "Nieuwkoop",
    "Dordrecht", "Papendrecht", "Hendrik-Ido-Ambacht", "Zwijndrecht", "Schoonhoven",
    "Utrecht",
];

const MEDIUM_DESTINATIONS: &[&str] = &[
    "Amsterdam", "Amstelveen", "Zaandam", "Hilversum", "Amersfoort", "Zeist",
    "Nieuwegein", "Houten", "IJsselstein", "Wijk bij Duurstede", "Doorn", "Veenendaal",
    "Culemborg", "Geldermalsen", "Zaltbommel", "Gorinchem", "Breda", "Tilburg",
    "Den Bosch", "Oss", "Oosterhout", "Roosendaal", "Bergen op Zoom", "Alkmaar",
    "Castricum", "Heiloo", "Purmerend", "Volendam", "Edam", "Monnickendam",
    "Almere", "Weesp", "Muiden", "Lelystad", "Hoorn", "Arnhem", "Ede", "Wageningen",
    "Nijmegen", "Vlissingen",
];

const LONG_DESTINATIONS: &[&str] = &[
    "Groningen", "Leeuwarden", "Assen", "Emmen", "Zwolle", "Deventer", "Apeldoorn",
    "Enschede", "Hengelo", "Almelo", "Eindhoven", "Helmond", "Venlo", "Roermond",
    "Maastricht", "Heerlen", "Sittard", "Den Helder", "Enkhuizen", "Medemblik",
    "Antwerpen", "Mechelen", "Leuven", "Gent", "Brugge", "Oostende", "Kortrijk",
    "Hasselt", "Genk", "Turnhout", "Knokke-Heist", "Blankenberge", "Ieper",
    "Sint-Niklaas", "Aalst",
];

static DEFAULT_CATALOG: LazyLock<DestinationCatalog> = LazyLock::new(|| DestinationCatalog {
    short: to_owned(SHORT_DESTINATIONS),
    medium: to_owned(MEDIUM_DESTINATIONS),
    long: to_owned(LONG_DESTINATIONS),
});

fn to_owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_owned()).collect()
}

/// Errors returned when building a [`DestinationCatalog`].
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Every pool was empty after dropping blank names.
    #[error("destination catalogue must contain at least one destination")]
    Empty,
    /// The catalogue JSON could not be decoded.
    #[cfg(feature = "serde")]
    #[error("failed to parse destination catalogue: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Destination names split into short, medium and long candidate pools.
///
/// Pools are expected to be disjoint, but a name appearing in two pools is
/// tolerated; [`DestinationCatalog::all`] lists each name once.
///
/// # Examples
/// ```
/// use tripsheet_core::{DestinationCatalog, DistanceBucket};
///
/// # fn main() -> Result<(), tripsheet_core::CatalogError> {
/// let catalog = DestinationCatalog::new(
///     vec!["Delft".into()],
///     vec!["Breda".into()],
///     vec!["Gent".into(), "Delft".into()],
/// )?;
/// assert_eq!(catalog.pool(DistanceBucket::Medium), ["Breda".to_string()]);
/// assert_eq!(catalog.all().count(), 3);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DestinationCatalog {
    #[cfg_attr(feature = "serde", serde(default))]
    short: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    medium: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    long: Vec<String>,
}

impl DestinationCatalog {
    /// Build a catalogue from three pools, dropping blank names.
    pub fn new(
        short: Vec<String>,
        medium: Vec<String>,
        long: Vec<String>,
    ) -> Result<Self, CatalogError> {
        let clean = |names: Vec<String>| -> Vec<String> {
            names
                .into_iter()
                .map(|name| name.trim().to_owned())
                .filter(|name| !name.is_empty())
                .collect()
        };
        let catalog = Self {
            short: clean(short),
            medium: clean(medium),
            long: clean(long),
        };
        if catalog.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(catalog)
    }

    /// Decode a catalogue from JSON of the form
    /// `{"short": [..], "medium": [..], "long": [..]}`.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: Self = serde_json::from_str(json)?;
        Self::new(raw.short, raw.medium, raw.long)
    }

    /// The built-in Dutch and Flemish catalogue.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &DEFAULT_CATALOG
    }

    /// Candidate names for `bucket`.
    #[must_use]
    pub fn pool(&self, bucket: DistanceBucket) -> &[String] {
        match bucket {
            DistanceBucket::Short => &self.short,
            DistanceBucket::Medium => &self.medium,
            DistanceBucket::Long => &self.long,
        }
    }

    /// Every distinct name across all pools, short pool first.
    pub fn all(&self) -> impl Iterator<Item = &str> + '_ {
        let mut seen = std::collections::HashSet::new();
        DistanceBucket::ALL
            .into_iter()
            .flat_map(|bucket| self.pool(bucket).iter())
            .map(String::as_str)
            .filter(move |name| seen.insert(*name))
    }

    /// Whether every pool is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.short.is_empty() && self.medium.is_empty() && self.long.is_empty()
    }
}

impl Default for DestinationCatalog {
    fn default() -> Self {
        Self::builtin().clone()
    }
}
