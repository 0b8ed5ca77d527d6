//! Trip allocation engine.
//!
//! Builds a list of trips whose round-trip distances add up to a target
//! within a quarter. Each iteration asks for the bucket furthest behind its
//! share of the target, picks a destination and a free date, and looks up
//! the distance. The run stops at the first of:
//!
//! - the target is reached (the last trip is kept whole, never trimmed);
//! - no destination is eligible;
//! - no date has room;
//! - too many destinations failed their distance lookup;
//! - the attempt budget is spent.
//!
//! None of these is an error. The outcome carries the trips collected so
//! far together with a [`StopReason`].

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use log::{debug, error, info, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
    AllocationPlan, BucketKm, DEFAULT_DESCRIPTION, DateAllocator, DestinationSelector,
    DistanceBucket, DistanceProvider, TripRecord, most_underserved,
};

/// Default iteration budget for one run.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;
/// Default number of failed destinations tolerated before giving up.
pub const DEFAULT_MAX_FAILED_DESTINATIONS: usize = 50;

/// Safety valves bounding a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationLimits {
    /// Maximum loop iterations, successful or not.
    pub max_attempts: u32,
    /// The run is abandoned once more destinations than this have failed.
    pub max_failed_destinations: usize,
}

impl Default for AllocationLimits {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            max_failed_destinations: DEFAULT_MAX_FAILED_DESTINATIONS,
        }
    }
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StopReason {
    /// Accumulated distance reached the target.
    TargetReached,
    /// Every destination was used up or had failed.
    DestinationsExhausted,
    /// Every day in the window carried its maximum number of trips.
    DatesExhausted,
    /// The iteration budget ran out.
    AttemptsExhausted,
    /// Distance lookups failed systemically.
    ProviderUnavailable,
}

impl StopReason {
    /// Whether the run reached its target.
    #[must_use]
    pub const fn is_complete(self) -> bool {
        matches!(self, Self::TargetReached)
    }

    /// Short human readable description.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::TargetReached => "target reached",
            Self::DestinationsExhausted => "no eligible destinations left",
            Self::DatesExhausted => "every day in the quarter is full",
            Self::AttemptsExhausted => "attempt limit reached",
            Self::ProviderUnavailable => "distance provider unavailable",
        }
    }
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}

/// Mutable bookkeeping for a single run.
///
/// Created at the start of [`TripAllocationEngine::generate`] (or handed to
/// [`TripAllocationEngine::resume`]) and consumed into an
/// [`AllocationOutcome`] when the run ends.
#[derive(Debug, Clone, Default)]
pub struct AllocationState {
    targets: BucketKm,
    totals: BucketKm,
    destination_usage: HashMap<String, u32>,
    date_usage: HashMap<NaiveDate, u32>,
    failed: HashSet<String>,
    attempts: u32,
    trips: Vec<TripRecord>,
}

impl AllocationState {
    /// Fresh state aiming for `target_km`.
    #[must_use]
    pub fn new(target_km: u64) -> Self {
        Self {
            targets: BucketKm::targets_for(target_km),
            ..Self::default()
        }
    }

    /// Kilometres accumulated so far.
    #[must_use]
    pub const fn total_km(&self) -> u64 {
        self.totals.total()
    }

    /// Destinations that failed a lookup in this run.
    #[must_use]
    pub const fn failed(&self) -> &HashSet<String> {
        &self.failed
    }

    /// Per-destination usage counts.
    #[must_use]
    pub const fn destination_usage(&self) -> &HashMap<String, u32> {
        &self.destination_usage
    }

    /// Per-day trip counts.
    #[must_use]
    pub const fn date_usage(&self) -> &HashMap<NaiveDate, u32> {
        &self.date_usage
    }

    /// Exclude `destination` for the rest of the run, as if its lookup
    /// had failed.
    pub fn mark_failed(&mut self, destination: impl Into<String>) {
        self.failed.insert(destination.into());
    }

    fn record(&mut self, trip: TripRecord) {
        self.totals
            .add(DistanceBucket::classify(trip.distance_km), u64::from(trip.distance_km));
        *self
            .destination_usage
            .entry(trip.destination.clone())
            .or_default() += 1;
        *self.date_usage.entry(trip.date).or_default() += 1;
        self.trips.push(trip);
    }

    /// Exhaustion caused purely by lookup failures counts as a provider outage.
    fn exhaustion_reason(&self, cap: u32) -> StopReason {
        let any_capped = self.destination_usage.values().any(|count| *count >= cap);
        if !self.failed.is_empty() && !any_capped {
            StopReason::ProviderUnavailable
        } else {
            StopReason::DestinationsExhausted
        }
    }

    fn finish(mut self, stop_reason: StopReason) -> AllocationOutcome {
        // Stable, so same-day trips keep the order they were generated in.
        self.trips.sort_by_key(|trip| trip.date);
        let mut failed_destinations: Vec<String> = self.failed.into_iter().collect();
        failed_destinations.sort_unstable();
        AllocationOutcome {
            trips: self.trips,
            stop_reason,
            total_km: self.totals.total(),
            bucket_totals: self.totals,
            bucket_targets: self.targets,
            attempts: self.attempts,
            failed_destinations,
        }
    }
}

/// Result of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllocationOutcome {
    /// Trips in ascending date order.
    pub trips: Vec<TripRecord>,
    /// Why the run ended.
    pub stop_reason: StopReason,
    /// Sum of all trip distances.
    pub total_km: u64,
    /// Distance accumulated per bucket.
    pub bucket_totals: BucketKm,
    /// Per-bucket targets the run steered towards.
    pub bucket_targets: BucketKm,
    /// Loop iterations used.
    pub attempts: u32,
    /// Destinations whose lookup failed, sorted by name.
    pub failed_destinations: Vec<String>,
}

/// Orchestrates destination, date and distance lookups into a trip list.
///
/// # Examples
/// ```
/// use tripsheet_core::test_support::ConstantDistanceProvider;
/// use tripsheet_core::{AllocationPlan, QuarterWindow, StopReason, TripAllocationEngine};
///
/// # fn main() -> Result<(), tripsheet_core::QuarterError> {
/// let engine = TripAllocationEngine::new(ConstantDistanceProvider::new(100));
/// let plan = AllocationPlan::new(300, QuarterWindow::new(2025, 1)?, "Den Haag");
/// let outcome = engine.generate_seeded(&plan, 1);
/// assert_eq!(outcome.trips.len(), 3);
/// assert_eq!(outcome.total_km, 300);
/// assert_eq!(outcome.stop_reason, StopReason::TargetReached);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TripAllocationEngine<P>
where
    P: DistanceProvider,
{
    provider: P,
    selector: DestinationSelector,
    dates: DateAllocator,
    limits: AllocationLimits,
    description: String,
}

impl<P> TripAllocationEngine<P>
where
    P: DistanceProvider,
{
    /// Engine over the built-in catalogue with default caps and limits.
    pub fn new(provider: P) -> Self {
        Self::with_parts(
            provider,
            DestinationSelector::new(crate::DestinationCatalog::default()),
            DateAllocator::default(),
        )
    }

    /// Engine with an explicit selector and date allocator.
    pub fn with_parts(provider: P, selector: DestinationSelector, dates: DateAllocator) -> Self {
        Self {
            provider,
            selector,
            dates,
            limits: AllocationLimits::default(),
            description: DEFAULT_DESCRIPTION.to_owned(),
        }
    }

    /// Replace the safety limits.
    #[must_use]
    pub const fn with_limits(mut self, limits: AllocationLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Replace the description stamped on every trip.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The distance provider backing this engine.
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Run with a generator seeded from `seed`.
    pub fn generate_seeded(&self, plan: &AllocationPlan, seed: u64) -> AllocationOutcome {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.generate(plan, &mut rng)
    }

    /// Build a trip list for `plan`, drawing randomness from `rng`.
    pub fn generate<R>(&self, plan: &AllocationPlan, rng: &mut R) -> AllocationOutcome
    where
        R: Rng + ?Sized,
    {
        self.resume(plan, AllocationState::new(plan.target_km), rng)
    }

    /// Continue a run from `state`, honouring its usage counts and failed
    /// destinations.
    pub fn resume<R>(
        &self,
        plan: &AllocationPlan,
        mut state: AllocationState,
        rng: &mut R,
    ) -> AllocationOutcome
    where
        R: Rng + ?Sized,
    {
        let stop_reason = loop {
            if state.total_km() >= plan.target_km {
                break StopReason::TargetReached;
            }
            if state.attempts >= self.limits.max_attempts {
                break StopReason::AttemptsExhausted;
            }
            state.attempts += 1;

            let bucket = most_underserved(&state.totals, &state.targets);
            let Some(destination) =
                self.selector
                    .pick(bucket, &state.failed, &state.destination_usage, rng)
            else {
                break state.exhaustion_reason(self.selector.cap());
            };
            let Some(date) = self.dates.pick(&plan.window, &state.date_usage, rng) else {
                break StopReason::DatesExhausted;
            };

            match self.provider.round_trip_km(&plan.origin, destination) {
                Ok(distance_km) => {
                    debug!("{date}: {destination} ({distance_km} km, wanted {bucket})");
                    state.record(TripRecord::new(
                        date,
                        destination,
                        self.description.as_str(),
                        distance_km,
                    ));
                }
                Err(err) => {
                    warn!("skipping {destination}: {err}");
                    state.failed.insert(destination.to_owned());
                    if state.failed.len() > self.limits.max_failed_destinations {
                        error!(
                            "{} destinations failed distance lookup, giving up",
                            state.failed.len()
                        );
                        break StopReason::ProviderUnavailable;
                    }
                }
            }
        };

        info!(
            "generated {} trips totalling {} of {} km ({stop_reason})",
            state.trips.len(),
            state.total_km(),
            plan.target_km
        );
        state.finish(stop_reason)
    }
}
