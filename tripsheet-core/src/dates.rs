//! Date allocation within a quarter under a per-day trip cap.

use std::collections::HashMap;

use chrono::NaiveDate;
use rand::Rng;

use crate::QuarterWindow;

/// Default number of trips allowed on a single day.
pub const DEFAULT_DATE_CAP: u32 = 2;
/// Default number of random draws before scanning the window in order.
pub const DEFAULT_SAMPLE_ATTEMPTS: u32 = 100;

/// Picks travel dates so that no day carries more than `cap` trips.
///
/// Random sampling keeps the dates spread across the quarter; once the
/// window fills up the allocator scans it from the first day so a free day
/// is always found if one exists.
///
/// # Examples
/// ```
/// use std::collections::HashMap;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use tripsheet_core::{DateAllocator, QuarterWindow};
///
/// # fn main() -> Result<(), tripsheet_core::QuarterError> {
/// let window = QuarterWindow::new(2025, 1)?;
/// let mut rng = ChaCha8Rng::seed_from_u64(3);
/// let date = DateAllocator::default()
///     .pick(&window, &HashMap::new(), &mut rng)
///     .expect("an empty quarter has room");
/// assert!(window.contains(date));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateAllocator {
    cap: u32,
    sample_attempts: u32,
}

impl Default for DateAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_CAP, DEFAULT_SAMPLE_ATTEMPTS)
    }
}

impl DateAllocator {
    /// Allocator allowing `cap` trips per day, sampling up to
    /// `sample_attempts` random days before scanning.
    #[must_use]
    pub const fn new(cap: u32, sample_attempts: u32) -> Self {
        Self {
            cap,
            sample_attempts,
        }
    }

    /// Maximum trips per day.
    #[must_use]
    pub const fn cap(&self) -> u32 {
        self.cap
    }

    fn has_room(&self, date: NaiveDate, counts: &HashMap<NaiveDate, u32>) -> bool {
        counts.get(&date).copied().unwrap_or(0) < self.cap
    }

    /// Pick a day in `window` with fewer than `cap` trips in `counts`.
    ///
    /// Returns `None` only when every day of the window is full.
    pub fn pick<R>(
        &self,
        window: &QuarterWindow,
        counts: &HashMap<NaiveDate, u32>,
        rng: &mut R,
    ) -> Option<NaiveDate>
    where
        R: Rng + ?Sized,
    {
        let days = window.len_days();
        if days == 0 {
            return None;
        }
        for _ in 0..self.sample_attempts {
            let candidate = window.nth_day(rng.gen_range(0..days))?;
            if self.has_room(candidate, counts) {
                return Some(candidate);
            }
        }
        window.days().find(|date| self.has_room(*date, counts))
    }
}
