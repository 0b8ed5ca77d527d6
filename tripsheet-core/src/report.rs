//! A finished run packaged for export.

use crate::{AllocationOutcome, AllocationPlan, QuarterWindow, StopReason, TripRecord};

/// Where the trip distances came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DistanceSource {
    /// Distances looked up through the Google Distance Matrix API.
    Google,
    /// Distances drawn by the simulated provider.
    Simulated,
}

impl DistanceSource {
    /// Lowercase label used in summaries.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Simulated => "simulated",
        }
    }
}

impl std::fmt::Display for DistanceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trips for one quarter with the context needed to write them out.
///
/// # Examples
/// ```
/// use tripsheet_core::test_support::ConstantDistanceProvider;
/// use tripsheet_core::{AllocationPlan, DistanceSource, QuarterWindow, TripAllocationEngine, TripReport};
///
/// # fn main() -> Result<(), tripsheet_core::QuarterError> {
/// let plan = AllocationPlan::new(200, QuarterWindow::new(2025, 3)?, "Den Haag");
/// let outcome = TripAllocationEngine::new(ConstantDistanceProvider::new(100))
///     .generate_seeded(&plan, 5);
/// let report = TripReport::new(&plan, outcome, DistanceSource::Simulated);
/// assert_eq!(report.period_label(), "2025 Q3");
/// assert_eq!(report.trip_count_label(), "2 ritten");
/// assert_eq!(report.default_file_stem(), "reisverslag_2025_Q3");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripReport {
    window: QuarterWindow,
    origin: String,
    target_km: u64,
    source: DistanceSource,
    outcome: AllocationOutcome,
}

impl TripReport {
    /// Package `outcome` produced for `plan`.
    #[must_use]
    pub fn new(plan: &AllocationPlan, outcome: AllocationOutcome, source: DistanceSource) -> Self {
        Self {
            window: plan.window,
            origin: plan.origin.clone(),
            target_km: plan.target_km,
            source,
            outcome,
        }
    }

    /// Trips in date order.
    #[must_use]
    pub fn trips(&self) -> &[TripRecord] {
        &self.outcome.trips
    }

    /// The full engine outcome.
    #[must_use]
    pub const fn outcome(&self) -> &AllocationOutcome {
        &self.outcome
    }

    /// Quarter the trips fall in.
    #[must_use]
    pub const fn window(&self) -> &QuarterWindow {
        &self.window
    }

    /// Origin address of every trip.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Requested distance.
    #[must_use]
    pub const fn target_km(&self) -> u64 {
        self.target_km
    }

    /// Distance actually covered.
    #[must_use]
    pub const fn total_km(&self) -> u64 {
        self.outcome.total_km
    }

    /// Why the engine stopped.
    #[must_use]
    pub const fn stop_reason(&self) -> StopReason {
        self.outcome.stop_reason
    }

    /// Provider that supplied the distances.
    #[must_use]
    pub const fn source(&self) -> DistanceSource {
        self.source
    }

    /// `"<year> Q<quarter>"`.
    #[must_use]
    pub fn period_label(&self) -> String {
        self.window.label()
    }

    /// `"<n> ritten"`.
    #[must_use]
    pub fn trip_count_label(&self) -> String {
        format!("{} ritten", self.outcome.trips.len())
    }

    /// `reisverslag_<year>_Q<quarter>`, without extension.
    #[must_use]
    pub fn default_file_stem(&self) -> String {
        format!(
            "reisverslag_{}_Q{}",
            self.window.year(),
            self.window.quarter()
        )
    }
}
