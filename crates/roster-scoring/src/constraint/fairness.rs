//! Fairness constraint over employee workloads.

use std::collections::HashMap;

use roster_core::{EmployeeId, HardSoftScore, Result, Roster, RosterParametrization, ShiftId};
use tracing::debug;

use super::IncrementalConstraint;
use crate::collector::LoadLedger;

/// Penalizes employees whose workload strays from the mean.
///
/// Assigned shifts are grouped by employee with their adjusted cost as the
/// metric, so part-time employees count proportionally more per shift. The
/// soft penalty is `weight * max_deviation_exceeding(threshold)` over the
/// per-employee loads. With a spread weight set, it also adds
/// `spread_weight * mean_deviation_squared_sum_root(scale)`, truncated,
/// which penalizes every employee's distance from the mean rather than only
/// the farthest one. Employees without shifts take no part.
///
/// # Example
///
/// ```
/// use roster_scoring::constraint::{FairnessConstraint, IncrementalConstraint};
/// use roster_test::roster::sample_roster;
/// use roster_core::HardSoftScore;
///
/// let mut roster = sample_roster();
/// let anna = roster.employee_by_name("Anna").unwrap().id();
/// let first = roster.shifts()[0].id();
/// roster.set_employee(first, Some(anna));
///
/// let mut fairness = FairnessConstraint::new(1, 0);
/// // A single loaded employee is the mean
/// assert_eq!(fairness.initialize(&roster).unwrap(), HardSoftScore::ZERO);
/// ```
#[derive(Debug, Clone)]
pub struct FairnessConstraint {
    weight: i64,
    threshold: i64,
    spread_weight: i64,
    scale: f64,
    ledger: LoadLedger<EmployeeId>,
    /// Shift -> (employee, metric) as inserted, retracted verbatim.
    tracked: HashMap<ShiftId, (EmployeeId, i64)>,
}

impl FairnessConstraint {
    pub fn new(weight: i64, threshold: i64) -> Self {
        Self {
            weight,
            threshold,
            spread_weight: 0,
            scale: 1_000.0,
            ledger: LoadLedger::new(),
            tracked: HashMap::new(),
        }
    }

    pub fn from_parametrization(params: &RosterParametrization) -> Self {
        Self::new(params.fairness_weight, params.max_deviation_threshold)
            .with_spread(params.spread_weight, params.deviation_scale)
    }

    /// Adds the scaled deviation root to the penalty.
    pub fn with_spread(mut self, weight: i64, scale: f64) -> Self {
        self.spread_weight = weight;
        self.scale = scale;
        self
    }

    pub fn ledger(&self) -> &LoadLedger<EmployeeId> {
        &self.ledger
    }

    /// Score of the current ledger state.
    pub fn score(&self) -> Result<HardSoftScore> {
        self.score_of(&self.ledger)
    }

    fn score_of(&self, ledger: &LoadLedger<EmployeeId>) -> Result<HardSoftScore> {
        if ledger.is_empty() {
            return Ok(HardSoftScore::ZERO);
        }
        let stats = ledger.stats();
        let mut penalty = self.weight * stats.max_deviation_exceeding(self.threshold)?;
        if self.spread_weight != 0 {
            let spread = stats.mean_deviation_squared_sum_root(self.scale)? as i64;
            penalty += self.spread_weight * spread;
        }
        Ok(HardSoftScore::of_soft(-penalty))
    }

    fn metric(roster: &Roster, shift: ShiftId) -> Result<Option<(EmployeeId, i64)>> {
        let assignment = roster.shift(shift);
        match assignment.employee() {
            Some(employee) => Ok(Some((employee, assignment.adjusted_cost(roster)?))),
            None => Ok(None),
        }
    }
}

impl IncrementalConstraint for FairnessConstraint {
    fn evaluate(&self, roster: &Roster) -> Result<HardSoftScore> {
        let mut ledger = LoadLedger::new();
        for assignment in roster.shifts() {
            if let Some((employee, metric)) = Self::metric(roster, assignment.id())? {
                ledger.insert_load(employee, metric);
            }
        }
        self.score_of(&ledger)
    }

    fn initialize(&mut self, roster: &Roster) -> Result<HardSoftScore> {
        self.reset();
        for assignment in roster.shifts() {
            if let Some((employee, metric)) = Self::metric(roster, assignment.id())? {
                self.ledger.insert_load(employee, metric);
                self.tracked.insert(assignment.id(), (employee, metric));
            }
        }
        debug!(
            event = "fairness_initialized",
            employees = self.ledger.len(),
            shifts = self.tracked.len()
        );
        self.score()
    }

    fn on_insert(&mut self, roster: &Roster, shift: ShiftId) -> Result<HardSoftScore> {
        let Some((employee, metric)) = Self::metric(roster, shift)? else {
            return Ok(HardSoftScore::ZERO);
        };
        let old_score = self.score()?;
        self.ledger.insert_load(employee, metric);
        self.tracked.insert(shift, (employee, metric));
        Ok(self.score()? - old_score)
    }

    fn on_retract(&mut self, _roster: &Roster, shift: ShiftId) -> Result<HardSoftScore> {
        let Some(&(employee, metric)) = self.tracked.get(&shift) else {
            return Ok(HardSoftScore::ZERO);
        };
        let old_score = self.score()?;
        self.ledger.retract_load(&employee, metric)?;
        self.tracked.remove(&shift);
        Ok(self.score()? - old_score)
    }

    fn reset(&mut self) {
        self.ledger.clear();
        self.tracked.clear();
    }

    fn name(&self) -> &str {
        "Fair workload"
    }
}
