//! Generated trip records.

use chrono::NaiveDate;

use crate::DistanceBucket;

/// Description attached to every trip unless configured otherwise.
pub const DEFAULT_DESCRIPTION: &str = "klant bezoeken";

/// Date format used in reports, e.g. `07-02-2025`.
pub const REPORT_DATE_FORMAT: &str = "%d-%m-%Y";

/// One visit to a destination on a given day.
///
/// Records are created by the allocation engine and never modified after
/// they are appended to a run's trip list.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use tripsheet_core::{DistanceBucket, TripRecord};
///
/// let date = NaiveDate::from_ymd_opt(2025, 2, 7).unwrap();
/// let trip = TripRecord::new(date, "Leiden", "klant bezoeken", 40);
/// assert_eq!(trip.formatted_date(), "07-02-2025");
/// assert_eq!(trip.bucket(), DistanceBucket::Short);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripRecord {
    /// Day of travel.
    pub date: NaiveDate,
    /// Destination name from the catalogue.
    pub destination: String,
    /// Free-text purpose of the trip.
    pub description: String,
    /// Round-trip distance in whole kilometres.
    pub distance_km: u32,
}

impl TripRecord {
    /// Construct a record.
    pub fn new(
        date: NaiveDate,
        destination: impl Into<String>,
        description: impl Into<String>,
        distance_km: u32,
    ) -> Self {
        Self {
            date,
            destination: destination.into(),
            description: description.into(),
            distance_km,
        }
    }

    /// The trip date rendered as `dd-mm-yyyy`.
    #[must_use]
    pub fn formatted_date(&self) -> String {
        self.date.format(REPORT_DATE_FORMAT).to_string()
    }

    /// Bucket of this trip's distance.
    #[must_use]
    pub const fn bucket(&self) -> DistanceBucket {
        DistanceBucket::classify(self.distance_km)
    }
}

/// Total round-trip distance across `trips`.
#[must_use]
pub fn total_km(trips: &[TripRecord]) -> u64 {
    trips.iter().map(|trip| u64::from(trip.distance_km)).sum()
}
