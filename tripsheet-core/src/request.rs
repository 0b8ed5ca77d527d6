//! Validated inputs for a generation run.

use thiserror::Error;

use crate::{QuarterError, QuarterWindow};

/// Parameters for one report generation.
///
/// # Examples
/// ```rust
/// use tripsheet_core::GenerationRequest;
///
/// let request = GenerationRequest {
///     year: 2025,
///     quarter: 1,
///     target_km: 5000,
///     origin: "Den Haag".into(),
///     seed: Some(42),
/// };
/// let plan = request.validate().expect("valid request");
/// assert_eq!(plan.target_km, 5000);
/// assert_eq!(plan.window.label(), "2025 Q1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationRequest {
    /// Calendar year of the report.
    pub year: i32,
    /// Quarter number in `1..=4`.
    pub quarter: u8,
    /// Total round-trip kilometres to reach.
    pub target_km: u32,
    /// Start address every trip departs from and returns to.
    pub origin: String,
    /// Seed for reproducible output; `None` draws from OS entropy.
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: Option<u64>,
}

/// Validation failures for [`GenerationRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationRequestError {
    /// The year/quarter pair does not describe a valid window.
    #[error(transparent)]
    Quarter(#[from] QuarterError),
    /// The distance target was zero.
    #[error("target distance must be a positive number of kilometres")]
    ZeroTarget,
    /// The origin address was blank.
    #[error("origin address must not be empty")]
    EmptyOrigin,
}

/// A validated request, ready for the allocation engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationPlan {
    /// Kilometres to reach.
    pub target_km: u64,
    /// Days trips may fall on.
    pub window: QuarterWindow,
    /// Trimmed origin address.
    pub origin: String,
}

impl AllocationPlan {
    /// Build a plan directly from its parts.
    pub fn new(target_km: u64, window: QuarterWindow, origin: impl Into<String>) -> Self {
        Self {
            target_km,
            window,
            origin: origin.into(),
        }
    }
}

impl GenerationRequest {
    /// Check the request and derive the allocation plan.
    pub fn validate(&self) -> Result<AllocationPlan, GenerationRequestError> {
        let window = QuarterWindow::new(self.year, self.quarter)?;
        if self.target_km == 0 {
            return Err(GenerationRequestError::ZeroTarget);
        }
        let origin = self.origin.trim();
        if origin.is_empty() {
            return Err(GenerationRequestError::EmptyOrigin);
        }
        Ok(AllocationPlan::new(
            u64::from(self.target_km),
            window,
            origin,
        ))
    }
}
