//! Read-only projections of a roster for reporting.
//!
//! [`summarize`] condenses the assignments of every employee into totals and
//! per-spot / per-shift-type buckets, alongside the derived vacation windows.

use std::collections::BTreeMap;
use std::fmt;

use roster_core::domain::{Employee, Roster};
use roster_core::{EmployeeId, Result, TimeSlotId};
use roster_scoring::collector::{sum, BucketedAccumulators, UniCollector};
use serde::Serialize;

#[cfg(test)]
mod tests;

/// Shift count and adjusted cost of one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BucketTotals {
    pub count: i64,
    pub adjusted_cost: i64,
}

/// Totals of one employee's assignments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeSummary {
    pub employee: EmployeeId,
    pub name: String,
    /// `name |skill|...|capacity|vip|`
    pub info: String,
    pub total_shifts: usize,
    pub total_days: usize,
    /// Nominal cost, ten per day.
    pub total_cost: i64,
    pub adjusted_cost: i64,
    /// Days scaled to full time: `days * 100 / effective capacity`.
    pub normalized_days: i64,
    pub extra_days: usize,
    pub extra_cost: i64,
    pub by_spot: BTreeMap<String, BucketTotals>,
    pub by_shift_type: BTreeMap<String, BucketTotals>,
    pub unavailable_slots: Vec<String>,
    pub undesirable_slots: Vec<String>,
    pub before_vacation_slots: Vec<String>,
    pub after_vacation_slots: Vec<String>,
}

impl fmt::Display for EmployeeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} shifts {} days {} ({} normalized) cost {} adjusted {}",
            self.info,
            self.total_shifts,
            self.total_days,
            self.normalized_days,
            self.total_cost,
            self.adjusted_cost
        )?;
        if self.extra_days > 0 {
            write!(f, " extra {} days cost {}", self.extra_days, self.extra_cost)?;
        }
        Ok(())
    }
}

// Per-shift figures fed into the bucket collectors.
struct ShiftFigures {
    adjusted_cost: i64,
}

/// Summarizes every employee of the roster, in roster order.
///
/// # Errors
///
/// Propagates [`RosterError`](roster_core::RosterError) from cost
/// computation; assigned shifts never fail.
pub fn summarize(roster: &Roster) -> Result<Vec<EmployeeSummary>> {
    roster
        .employees()
        .iter()
        .map(|employee| summarize_employee(roster, employee))
        .collect()
}

/// Summarizes the assignments of one employee.
pub fn summarize_employee(roster: &Roster, employee: &Employee) -> Result<EmployeeSummary> {
    let mut spot_counts = BucketedAccumulators::new(sum(|_: &ShiftFigures| 1));
    let mut spot_costs = BucketedAccumulators::new(sum(|f: &ShiftFigures| f.adjusted_cost));
    let mut type_counts = BucketedAccumulators::new(sum(|_: &ShiftFigures| 1));
    let mut type_costs = BucketedAccumulators::new(sum(|f: &ShiftFigures| f.adjusted_cost));

    let mut summary = EmployeeSummary {
        employee: employee.id(),
        name: employee.name().to_string(),
        info: employee.info(),
        total_shifts: 0,
        total_days: 0,
        total_cost: 0,
        adjusted_cost: 0,
        normalized_days: 0,
        extra_days: 0,
        extra_cost: 0,
        by_spot: BTreeMap::new(),
        by_shift_type: BTreeMap::new(),
        unavailable_slots: slot_names(roster, employee.unavailable_slots()),
        undesirable_slots: slot_names(roster, employee.undesirable_slots()),
        before_vacation_slots: slot_names(roster, employee.before_vacation_slots()),
        after_vacation_slots: slot_names(roster, employee.after_vacation_slots()),
    };

    for shift in roster.employee_assignments(employee.id()) {
        let spot = roster.spot(shift.spot());
        let figures = ShiftFigures {
            adjusted_cost: shift.adjusted_cost(roster)?,
        };
        let days = shift.covered_days().len();

        summary.total_shifts += 1;
        summary.total_days += days;
        summary.total_cost += shift.cost();
        summary.adjusted_cost += figures.adjusted_cost;
        if spot.is_extra() {
            summary.extra_days += days;
            summary.extra_cost += shift.cost();
        }

        spot_counts.insert(spot.name().to_string(), &figures);
        spot_costs.insert(spot.name().to_string(), &figures);
        type_counts.insert(spot.shift_type().to_string(), &figures);
        type_costs.insert(spot.shift_type().to_string(), &figures);
    }

    summary.normalized_days =
        (summary.total_days as f64 * 100.0 / employee.effective_capacity()) as i64;
    summary.by_spot = bucket_totals(&spot_counts, &spot_costs);
    summary.by_shift_type = bucket_totals(&type_counts, &type_costs);
    Ok(summary)
}

fn bucket_totals<C, S>(
    counts: &BucketedAccumulators<String, ShiftFigures, C>,
    costs: &BucketedAccumulators<String, ShiftFigures, S>,
) -> BTreeMap<String, BucketTotals>
where
    C: UniCollector<ShiftFigures, Result = i64>,
    S: UniCollector<ShiftFigures, Result = i64>,
{
    counts
        .results()
        .map(|(group, count)| {
            let totals = BucketTotals {
                count,
                adjusted_cost: costs.result(group).unwrap_or_default(),
            };
            (group.clone(), totals)
        })
        .collect()
}

fn slot_names<'a>(
    roster: &Roster,
    slots: impl IntoIterator<Item = &'a TimeSlotId>,
) -> Vec<String> {
    slots
        .into_iter()
        .map(|id| roster.time_slot(*id).slot_name())
        .collect()
}

/// Total adjusted cost of all assigned shifts.
pub fn total_adjusted_cost(roster: &Roster) -> Result<i64> {
    roster
        .shifts()
        .iter()
        .filter(|shift| shift.is_assigned())
        .map(|shift| shift.adjusted_cost(roster))
        .sum()
}
