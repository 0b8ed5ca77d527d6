//! Calendar quarters as inclusive date windows.

use chrono::{Datelike, Days, NaiveDate};
use thiserror::Error;

/// Errors returned by [`QuarterWindow::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuarterError {
    /// The quarter number was outside `1..=4`.
    #[error("quarter must be between 1 and 4, got {quarter}")]
    InvalidQuarter {
        /// The rejected quarter number.
        quarter: u8,
    },
    /// The calendar cannot represent the requested year.
    #[error("year {year} is outside the supported calendar range")]
    YearOutOfRange {
        /// The rejected year.
        year: i32,
    },
}

/// Inclusive range of calendar days covering one quarter of a year.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use tripsheet_core::QuarterWindow;
///
/// # fn main() -> Result<(), tripsheet_core::QuarterError> {
/// let window = QuarterWindow::new(2025, 4)?;
/// assert_eq!(window.start(), NaiveDate::from_ymd_opt(2025, 10, 1).unwrap());
/// assert_eq!(window.end(), NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
/// assert_eq!(window.len_days(), 92);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuarterWindow {
    year: i32,
    quarter: u8,
    start: NaiveDate,
    end: NaiveDate,
}

impl QuarterWindow {
    /// Build the window for `quarter` of `year`.
    pub fn new(year: i32, quarter: u8) -> Result<Self, QuarterError> {
        let start_month = match quarter {
            1 => 1,
            2 => 4,
            3 => 7,
            4 => 10,
            _ => return Err(QuarterError::InvalidQuarter { quarter }),
        };
        let out_of_range = || QuarterError::YearOutOfRange { year };
        let start = NaiveDate::from_ymd_opt(year, start_month, 1).ok_or_else(out_of_range)?;
        // First day of the following quarter, rolling into the next year for Q4.
        let next_start = if start_month == 10 {
            NaiveDate::from_ymd_opt(year.checked_add(1).ok_or_else(out_of_range)?, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, start_month + 3, 1)
        }
        .ok_or_else(out_of_range)?;
        let end = next_start.pred_opt().ok_or_else(out_of_range)?;
        Ok(Self {
            year,
            quarter,
            start,
            end,
        })
    }

    /// Calendar year of the window.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Quarter number in `1..=4`.
    #[must_use]
    pub const fn quarter(&self) -> u8 {
        self.quarter
    }

    /// First day of the quarter.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the quarter.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the window, both ends included.
    #[must_use]
    pub fn len_days(&self) -> u64 {
        let span = self.end.signed_duration_since(self.start).num_days();
        u64::try_from(span).map_or(0, |days| days + 1)
    }

    /// The date `offset` days after the start, if it is still in the window.
    #[must_use]
    pub fn nth_day(&self, offset: u64) -> Option<NaiveDate> {
        self.start
            .checked_add_days(Days::new(offset))
            .filter(|date| *date <= self.end)
    }

    /// Whether `date` lies within the window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.start..=self.end).contains(&date)
    }

    /// Iterate over every day in the window in calendar order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(|date| *date <= self.end)
    }

    /// Short label such as `2025 Q1`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} Q{}", self.start.year(), self.quarter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    #[rstest]
    #[case(2025, 1, ymd(2025, 1, 1), ymd(2025, 3, 31), 90)]
    #[case(2024, 1, ymd(2024, 1, 1), ymd(2024, 3, 31), 91)]
    #[case(2025, 2, ymd(2025, 4, 1), ymd(2025, 6, 30), 91)]
    #[case(2025, 3, ymd(2025, 7, 1), ymd(2025, 9, 30), 92)]
    #[case(2025, 4, ymd(2025, 10, 1), ymd(2025, 12, 31), 92)]
    fn maps_quarters_to_month_ranges(
        #[case] year: i32,
        #[case] quarter: u8,
        #[case] start: NaiveDate,
        #[case] end: NaiveDate,
        #[case] days: u64,
    ) {
        let window = QuarterWindow::new(year, quarter).expect("valid quarter");
        assert_eq!(window.start(), start);
        assert_eq!(window.end(), end);
        assert_eq!(window.len_days(), days);
        assert_eq!(window.days().count() as u64, days);
    }

    #[rstest]
    #[case(0)]
    #[case(5)]
    fn rejects_invalid_quarter(#[case] quarter: u8) {
        let err = QuarterWindow::new(2025, quarter).expect_err("quarter should be rejected");
        assert_eq!(err, QuarterError::InvalidQuarter { quarter });
    }

    #[rstest]
    fn rejects_unrepresentable_year() {
        let err = QuarterWindow::new(i32::MAX, 4).expect_err("year should be rejected");
        assert_eq!(err, QuarterError::YearOutOfRange { year: i32::MAX });
    }

    #[rstest]
    fn nth_day_stays_inside_window() {
        let window = QuarterWindow::new(2025, 1).expect("valid quarter");
        assert_eq!(window.nth_day(0), Some(ymd(2025, 1, 1)));
        assert_eq!(window.nth_day(89), Some(ymd(2025, 3, 31)));
        assert_eq!(window.nth_day(90), None);
    }

    #[rstest]
    fn label_names_year_and_quarter() {
        let window = QuarterWindow::new(2025, 3).expect("valid quarter");
        assert_eq!(window.label(), "2025 Q3");
        assert!(window.contains(ymd(2025, 8, 15)));
        assert!(!window.contains(ymd(2025, 10, 1)));
    }
}
