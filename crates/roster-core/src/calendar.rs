//! Calendar utilities: half-open day ranges and week alignment.
//!
//! All ranges are half-open `[start, end)`. Week windows are anchored on a
//! configurable weekday (Saturday by default) so that the working week
//! Monday..Friday sits in the middle of a window and the weekend sits at its
//! edges.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use smallvec::SmallVec;

use crate::error::{Result, RosterError};

/// Number of days in a week window.
pub const DAYS_PER_WEEK: i64 = 7;

/// Days of a short range, inline for ranges up to one week.
pub type DaySet = SmallVec<[NaiveDate; 7]>;

/// Returns every date in `[start, end_exclusive)` in ascending order.
///
/// # Errors
///
/// Returns [`RosterError::InvalidRange`] if `end_exclusive <= start`.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use roster_core::calendar::days_between;
///
/// let start = NaiveDate::from_ymd_opt(2019, 12, 30).unwrap();
/// let end = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
/// let days = days_between(start, end).unwrap();
/// assert_eq!(days.len(), 3);
/// assert_eq!(days[2], NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
/// ```
pub fn days_between(start: NaiveDate, end_exclusive: NaiveDate) -> Result<DaySet> {
    if end_exclusive <= start {
        return Err(RosterError::InvalidRange {
            start,
            end: end_exclusive,
        });
    }
    Ok(start
        .iter_days()
        .take_while(|date| *date < end_exclusive)
        .collect())
}

/// Returns the 7-day window `[anchor, anchor + 7)`.
pub fn week_window(anchor: NaiveDate) -> (NaiveDate, NaiveDate) {
    (anchor, anchor + Duration::days(DAYS_PER_WEEK))
}

/// Shifts a date by a signed number of days.
#[inline]
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

/// Weekly cadence of the planning horizon.
///
/// Windows start on `week_start`. A vacation "begins" on `first_workday`
/// and "ends" on `last_workday`; the days between `last_workday` and the
/// next `first_workday` form the weekend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeekCadence {
    pub week_start: Weekday,
    pub first_workday: Weekday,
    pub last_workday: Weekday,
}

impl Default for WeekCadence {
    fn default() -> Self {
        Self {
            week_start: Weekday::Sat,
            first_workday: Weekday::Mon,
            last_workday: Weekday::Fri,
        }
    }
}

impl WeekCadence {
    pub fn new(week_start: Weekday, first_workday: Weekday, last_workday: Weekday) -> Self {
        Self {
            week_start,
            first_workday,
            last_workday,
        }
    }

    /// Days from `last_workday` forward to the next `first_workday`.
    ///
    /// Three for a Friday/Monday cadence.
    pub fn weekend_gap(&self) -> i64 {
        let diff = self.first_workday.num_days_from_monday() as i64
            - self.last_workday.num_days_from_monday() as i64;
        let gap = diff.rem_euclid(DAYS_PER_WEEK);
        if gap == 0 {
            DAYS_PER_WEEK
        } else {
            gap
        }
    }

    /// Returns true if windows start on the day after `last_workday`.
    pub fn is_consistent(&self) -> bool {
        self.last_workday.succ() == self.week_start
    }

    #[inline]
    pub fn is_first_workday(&self, date: NaiveDate) -> bool {
        date.weekday() == self.first_workday
    }

    #[inline]
    pub fn is_last_workday(&self, date: NaiveDate) -> bool {
        date.weekday() == self.last_workday
    }

    /// Returns the window start on or before `date`.
    pub fn align(&self, date: NaiveDate) -> NaiveDate {
        let back = (date.weekday().num_days_from_monday() as i64
            - self.week_start.num_days_from_monday() as i64)
            .rem_euclid(DAYS_PER_WEEK);
        add_days(date, -back)
    }

    /// Returns the week window containing `date`.
    pub fn window_containing(&self, date: NaiveDate) -> (NaiveDate, NaiveDate) {
        week_window(self.align(date))
    }
}
