//! Distance buckets used to balance the trip mix.
//!
//! Every round-trip distance falls into exactly one bucket. The engine uses
//! buckets twice: to steer destination selection towards the bucket that is
//! furthest behind its target, and to record progress once a distance is
//! known. Classification depends only on the distance itself.
//!
//! # Examples
//! ```
//! use tripsheet_core::DistanceBucket;
//!
//! assert_eq!(DistanceBucket::classify(149), DistanceBucket::Short);
//! assert_eq!(DistanceBucket::classify(150), DistanceBucket::Medium);
//! assert_eq!(DistanceBucket::classify(301), DistanceBucket::Long);
//! assert_eq!(DistanceBucket::Medium.to_string(), "medium");
//! ```

/// Lower bound (inclusive) of the medium bucket in kilometres.
pub const MEDIUM_MIN_KM: u32 = 150;
/// Upper bound (inclusive) of the medium bucket in kilometres.
pub const MEDIUM_MAX_KM: u32 = 300;

/// Share of the target assigned to short trips, in percent.
const SHORT_SHARE_PERCENT: u64 = 40;
/// Share of the target assigned to medium trips, in percent.
const MEDIUM_SHARE_PERCENT: u64 = 40;

/// Round-trip distance class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DistanceBucket {
    /// Under 150 km.
    Short,
    /// 150 km to 300 km inclusive.
    Medium,
    /// Over 300 km.
    Long,
}

impl DistanceBucket {
    /// Buckets in tie-break priority order.
    pub const ALL: [Self; 3] = [Self::Short, Self::Medium, Self::Long];

    /// Classify a round-trip distance.
    #[must_use]
    pub const fn classify(distance_km: u32) -> Self {
        if distance_km < MEDIUM_MIN_KM {
            Self::Short
        } else if distance_km <= MEDIUM_MAX_KM {
            Self::Medium
        } else {
            Self::Long
        }
    }

    /// Return the bucket as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }
}

impl std::fmt::Display for DistanceBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DistanceBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "short" => Ok(Self::Short),
            "medium" => Ok(Self::Medium),
            "long" => Ok(Self::Long),
            _ => Err(format!("unknown distance bucket '{s}'")),
        }
    }
}

/// Per-bucket kilometre amounts.
///
/// Used both for the targets derived from the overall goal and for the
/// running totals accumulated during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BucketKm {
    /// Kilometres in the short bucket.
    pub short: u64,
    /// Kilometres in the medium bucket.
    pub medium: u64,
    /// Kilometres in the long bucket.
    pub long: u64,
}

impl BucketKm {
    /// Split `target_km` into the 40/40/20 short/medium/long targets.
    ///
    /// The long bucket takes whatever the integer split leaves over, so the
    /// three targets always sum to `target_km`.
    ///
    /// # Examples
    /// ```
    /// use tripsheet_core::BucketKm;
    ///
    /// let targets = BucketKm::targets_for(1000);
    /// assert_eq!((targets.short, targets.medium, targets.long), (400, 400, 200));
    /// ```
    #[must_use]
    pub const fn targets_for(target_km: u64) -> Self {
        let short = share_of(target_km, SHORT_SHARE_PERCENT);
        let medium = share_of(target_km, MEDIUM_SHARE_PERCENT);
        Self {
            short,
            medium,
            long: target_km - short - medium,
        }
    }

    /// Kilometres recorded for `bucket`.
    #[must_use]
    pub const fn get(&self, bucket: DistanceBucket) -> u64 {
        match bucket {
            DistanceBucket::Short => self.short,
            DistanceBucket::Medium => self.medium,
            DistanceBucket::Long => self.long,
        }
    }

    /// Add `km` to `bucket`.
    pub const fn add(&mut self, bucket: DistanceBucket, km: u64) {
        match bucket {
            DistanceBucket::Short => self.short += km,
            DistanceBucket::Medium => self.medium += km,
            DistanceBucket::Long => self.long += km,
        }
    }

    /// Sum across all buckets.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.short + self.medium + self.long
    }
}

/// `percent`% of `km`, rounded down, without overflowing for any `km`.
const fn share_of(km: u64, percent: u64) -> u64 {
    km / 100 * percent + km % 100 * percent / 100
}

/// Pick the bucket furthest behind its target.
///
/// Each bucket is scored by `current / target`; a zero target scores as a
/// ratio of one so it is never preferred over a bucket with real demand.
/// Ties resolve in [`DistanceBucket::ALL`] order (short, medium, long).
///
/// Ratios are compared by cross-multiplication to stay in integer maths.
///
/// # Examples
/// ```
/// use tripsheet_core::{BucketKm, DistanceBucket, most_underserved};
///
/// let targets = BucketKm::targets_for(1000);
/// let current = BucketKm { short: 400, medium: 100, long: 0 };
/// assert_eq!(most_underserved(&current, &targets), DistanceBucket::Long);
/// ```
#[must_use]
pub fn most_underserved(current: &BucketKm, targets: &BucketKm) -> DistanceBucket {
    let ratio = |bucket: DistanceBucket| -> (u128, u128) {
        match targets.get(bucket) {
            0 => (1, 1),
            target => (u128::from(current.get(bucket)), u128::from(target)),
        }
    };

    let mut best = DistanceBucket::Short;
    let mut best_ratio = ratio(best);
    for bucket in [DistanceBucket::Medium, DistanceBucket::Long] {
        let (num, den) = ratio(bucket);
        // Strictly lower only, so earlier buckets win ties.
        if num * best_ratio.1 < best_ratio.0 * den {
            best = bucket;
            best_ratio = (num, den);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case(0, DistanceBucket::Short)]
    #[case(149, DistanceBucket::Short)]
    #[case(150, DistanceBucket::Medium)]
    #[case(300, DistanceBucket::Medium)]
    #[case(301, DistanceBucket::Long)]
    #[case(800, DistanceBucket::Long)]
    fn classifies_boundaries(#[case] km: u32, #[case] expected: DistanceBucket) {
        assert_eq!(DistanceBucket::classify(km), expected);
    }

    #[rstest]
    fn parses_case_insensitively() {
        assert_eq!(DistanceBucket::from_str("LONG"), Ok(DistanceBucket::Long));
        assert!(DistanceBucket::from_str("far").is_err());
    }

    #[rstest]
    #[case(300, 120, 120, 60)]
    #[case(5, 2, 2, 1)]
    #[case(0, 0, 0, 0)]
    #[case(
        u64::MAX,
        7_378_697_629_483_820_646,
        7_378_697_629_483_820_646,
        3_689_348_814_741_910_323
    )]
    fn targets_sum_to_goal(
        #[case] goal: u64,
        #[case] short: u64,
        #[case] medium: u64,
        #[case] long: u64,
    ) {
        let targets = BucketKm::targets_for(goal);
        assert_eq!(targets, BucketKm { short, medium, long });
        assert_eq!(targets.total(), goal);
    }

    #[rstest]
    fn empty_totals_prefer_short() {
        let targets = BucketKm::targets_for(1000);
        assert_eq!(
            most_underserved(&BucketKm::default(), &targets),
            DistanceBucket::Short
        );
    }

    #[rstest]
    fn ties_prefer_medium_over_long() {
        let targets = BucketKm::targets_for(1000);
        let current = BucketKm {
            short: 400,
            medium: 0,
            long: 0,
        };
        assert_eq!(most_underserved(&current, &targets), DistanceBucket::Medium);
    }

    #[rstest]
    fn zero_target_is_never_most_needed() {
        let targets = BucketKm {
            short: 100,
            medium: 100,
            long: 0,
        };
        let current = BucketKm {
            short: 90,
            medium: 95,
            long: 0,
        };
        assert_eq!(most_underserved(&current, &targets), DistanceBucket::Short);
    }

    #[rstest]
    fn overfilled_bucket_loses_to_underfilled() {
        let targets = BucketKm::targets_for(1000);
        let current = BucketKm {
            short: 900,
            medium: 390,
            long: 190,
        };
        assert_eq!(most_underserved(&current, &targets), DistanceBucket::Long);
    }
}
