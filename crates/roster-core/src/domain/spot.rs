//! Recurring duty spots.

use super::{PlanningId, Skill, SpotId};
use crate::error::{Result, RosterError};

/// Default duration of a spot, in days.
pub const DEFAULT_SPOT_DAYS: u32 = 7;

/// Vacation-boundary score given to extra (holiday) spots.
pub const EXTRA_SPOT_VACATION_SCORE: i32 = -50_000;

/// Prefix of the synthetic name of an extra spot.
pub const EXTRA_SPOT_PREFIX: &str = "EX_";

/// A recurring duty within a time slot.
///
/// The duty covers `days` consecutive days starting `offset` days after the
/// start of its time slot. Spots are immutable once added to a roster.
///
/// # Example
///
/// ```
/// use roster_core::domain::{Skill, Spot};
///
/// let spot = Spot::new("Night_Weekend", Skill::named("Night"))
///     .with_days(2)
///     .with_offset(0)
///     .with_unsuitable_skill(Skill::named("Trainee"));
///
/// assert_eq!(spot.shift_type(), "Night");
/// assert_eq!(spot.days(), 2);
/// assert!(!spot.is_extra());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Spot {
    id: SpotId,
    name: String,
    required_skill: Skill,
    unsuitable_skill: Option<Skill>,
    days: u32,
    offset: i64,
    score_before_vacation: i32,
    score_after_vacation: i32,
    is_extra: bool,
}

impl Spot {
    /// Creates a week-long spot starting with its time slot.
    pub fn new(name: impl Into<String>, required_skill: Skill) -> Self {
        Self {
            id: SpotId::default(),
            name: name.into(),
            required_skill,
            unsuitable_skill: None,
            days: DEFAULT_SPOT_DAYS,
            offset: 0,
            score_before_vacation: 0,
            score_after_vacation: 0,
            is_extra: false,
        }
    }

    /// Creates an extra (holiday) spot modelled on `base`.
    ///
    /// The extra spot keeps the base skills, is named `EX_<base>` and carries
    /// a heavy vacation-boundary score so it is never scheduled next to a
    /// vacation.
    pub fn extra(base: &Spot, offset: i64, days: u32) -> Self {
        Self {
            id: SpotId::default(),
            name: format!("{}{}", EXTRA_SPOT_PREFIX, base.name),
            required_skill: base.required_skill.clone(),
            unsuitable_skill: base.unsuitable_skill.clone(),
            days,
            offset,
            score_before_vacation: EXTRA_SPOT_VACATION_SCORE,
            score_after_vacation: EXTRA_SPOT_VACATION_SCORE,
            is_extra: true,
        }
    }

    pub fn with_unsuitable_skill(mut self, skill: Skill) -> Self {
        self.unsuitable_skill = Some(skill);
        self
    }

    pub fn with_days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_vacation_scores(mut self, before: i32, after: i32) -> Self {
        self.score_before_vacation = before;
        self.score_after_vacation = after;
        self
    }

    /// Checks the structural invariants of the spot.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::InvalidSpot`] for an empty name, a zero
    /// duration, or a wildcard unsuitable skill (which would disqualify
    /// every employee).
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| RosterError::InvalidSpot {
            spot: self.name.clone(),
            reason: reason.to_string(),
        };
        if self.name.trim().is_empty() {
            return Err(invalid("name is empty"));
        }
        if self.days == 0 {
            return Err(invalid("duration must be at least one day"));
        }
        if matches!(self.unsuitable_skill, Some(Skill::Wildcard)) {
            return Err(invalid("unsuitable skill cannot be the wildcard"));
        }
        Ok(())
    }

    pub(crate) fn set_id(&mut self, id: SpotId) {
        self.id = id;
    }

    pub fn id(&self) -> SpotId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name prefix before the first `_`, grouping spots of the same kind.
    pub fn shift_type(&self) -> &str {
        self.name.split('_').next().unwrap_or(&self.name)
    }

    pub fn required_skill(&self) -> &Skill {
        &self.required_skill
    }

    pub fn unsuitable_skill(&self) -> Option<&Skill> {
        self.unsuitable_skill.as_ref()
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn score_before_vacation(&self) -> i32 {
        self.score_before_vacation
    }

    pub fn score_after_vacation(&self) -> i32 {
        self.score_after_vacation
    }

    pub fn is_extra(&self) -> bool {
        self.is_extra
    }
}

impl PlanningId for Spot {
    type Id = SpotId;

    fn planning_id(&self) -> SpotId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let spot = Spot::new("Ro", Skill::named("Ro"));
        assert_eq!(spot.days(), DEFAULT_SPOT_DAYS);
        assert_eq!(spot.offset(), 0);
        assert_eq!(spot.unsuitable_skill(), None);
        assert_eq!(spot.shift_type(), "Ro");
        assert!(spot.validate().is_ok());
    }

    #[test]
    fn test_extra_spot_copies_skills() {
        let base = Spot::new("Night_A", Skill::named("Night"))
            .with_unsuitable_skill(Skill::named("Trainee"));
        let extra = Spot::extra(&base, 3, 1);

        assert_eq!(extra.name(), "EX_Night_A");
        assert_eq!(extra.shift_type(), "EX");
        assert_eq!(extra.required_skill(), &Skill::named("Night"));
        assert_eq!(extra.unsuitable_skill(), Some(&Skill::named("Trainee")));
        assert_eq!(extra.offset(), 3);
        assert_eq!(extra.days(), 1);
        assert_eq!(extra.score_before_vacation(), EXTRA_SPOT_VACATION_SCORE);
        assert!(extra.is_extra());
    }

    #[test]
    fn test_validate_rejects_zero_days() {
        let spot = Spot::new("Ro", Skill::named("Ro")).with_days(0);
        assert!(matches!(
            spot.validate(),
            Err(RosterError::InvalidSpot { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_wildcard_unsuitable_skill() {
        let spot = Spot::new("Ro", Skill::named("Ro")).with_unsuitable_skill(Skill::Wildcard);
        assert!(spot.validate().is_err());
    }
}
