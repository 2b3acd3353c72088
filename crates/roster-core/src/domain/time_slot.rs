//! Time slots tiling the planning horizon.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use super::{PlanningId, TimeSlotId};
use crate::calendar::{days_between, DaySet};
use crate::error::{Result, RosterError};

/// Lifecycle state of a time slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum TimeSlotState {
    /// Open for planning.
    #[default]
    Draft,
    /// Communicated to employees.
    Published,
    /// Closed for changes.
    Locked,
}

/// A contiguous calendar window `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    id: TimeSlotId,
    start: NaiveDateTime,
    end: NaiveDateTime,
    state: TimeSlotState,
}

impl TimeSlot {
    /// Creates a draft time slot.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::InvalidRange`] if `end <= start`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if end <= start {
            return Err(RosterError::InvalidRange {
                start: start.date(),
                end: end.date(),
            });
        }
        Ok(Self {
            id: TimeSlotId::default(),
            start,
            end,
            state: TimeSlotState::Draft,
        })
    }

    /// Generates consecutive windows of `window_days` days.
    ///
    /// The first window starts at midnight of `start`; each following window
    /// starts where the previous one ended. Windows are generated while their
    /// start is before `end`, so the last window may reach past `end`. The
    /// result has no gaps and no overlaps by construction.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use roster_core::domain::TimeSlot;
    ///
    /// let start = NaiveDate::from_ymd_opt(2019, 1, 5).unwrap();
    /// let end = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    /// let slots = TimeSlot::tile(start, end, 7).unwrap();
    /// assert_eq!(slots.len(), 52);
    /// assert_eq!(slots[0].end(), slots[1].start());
    /// ```
    pub fn tile(start: NaiveDate, end: NaiveDate, window_days: u32) -> Result<Vec<TimeSlot>> {
        if end <= start {
            return Err(RosterError::InvalidRange { start, end });
        }
        if window_days == 0 {
            return Err(RosterError::HorizonNotTiled(
                "window length must be at least one day".to_string(),
            ));
        }
        let step = Duration::days(i64::from(window_days));
        let mut slots = Vec::new();
        let mut window_start = start.and_time(chrono::NaiveTime::MIN);
        while window_start.date() < end {
            let window_end = window_start + step;
            slots.push(TimeSlot::new(window_start, window_end)?);
            window_start = window_end;
        }
        Ok(slots)
    }

    pub(crate) fn set_id(&mut self, id: TimeSlotId) {
        self.id = id;
    }

    pub fn id(&self) -> TimeSlotId {
        self.id
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    /// First date not covered by the slot.
    pub fn end_date(&self) -> NaiveDate {
        self.end.date()
    }

    /// Last date covered by the slot.
    pub fn last_date(&self) -> NaiveDate {
        self.end_date().pred_opt().unwrap_or(self.end_date())
    }

    pub fn state(&self) -> TimeSlotState {
        self.state
    }

    pub fn set_state(&mut self, state: TimeSlotState) {
        self.state = state;
    }

    /// Returns true if `date` falls within `[start_date, end_date)`.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.start_date() <= date && date < self.end_date()
    }

    /// Every date covered by the slot.
    pub fn days(&self) -> Result<DaySet> {
        days_between(self.start_date(), self.end_date())
    }

    /// Column label used by reports.
    pub fn slot_name(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }
}

impl PlanningId for TimeSlot {
    type Id = TimeSlotId;

    fn planning_id(&self) -> TimeSlotId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_tile_one_year_of_weeks() {
        let slots = TimeSlot::tile(date(2019, 1, 5), date(2020, 1, 1), 7).unwrap();
        assert_eq!(slots.len(), 52);
        assert_eq!(slots[0].start_date(), date(2019, 1, 5));
        assert_eq!(slots[0].last_date(), date(2019, 1, 11));
        assert_eq!(slots[51].start_date(), date(2019, 12, 28));
        assert_eq!(slots[51].end_date(), date(2020, 1, 4));
        for pair in slots.windows(2) {
            assert_eq!(pair[0].end(), pair[1].start());
        }
        assert!(slots.iter().all(|s| s.state() == TimeSlotState::Draft));
    }

    #[test]
    fn test_tile_rejects_bad_input() {
        assert!(TimeSlot::tile(date(2019, 1, 5), date(2019, 1, 5), 7).is_err());
        assert!(TimeSlot::tile(date(2019, 1, 5), date(2019, 2, 5), 0).is_err());
    }

    #[test]
    fn test_contains_date_is_half_open() {
        let slots = TimeSlot::tile(date(2019, 1, 5), date(2019, 1, 6), 7).unwrap();
        let slot = &slots[0];
        assert!(slot.contains_date(date(2019, 1, 5)));
        assert!(slot.contains_date(date(2019, 1, 11)));
        assert!(!slot.contains_date(date(2019, 1, 12)));
        assert_eq!(slot.days().unwrap().len(), 7);
        assert_eq!(slot.slot_name(), "2019-01-05");
    }
}
