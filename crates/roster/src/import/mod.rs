//! Import boundary: plain serde records turned into a validated [`Roster`].
//!
//! Records mirror the rows of the roster input tables. [`RosterImport::build`]
//! constructs the roster in dependency order and runs availability derivation
//! exactly once, after every raw date is in place.

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use roster_config::{ConfigError, RosterConfig};
use roster_core::domain::{Employee, Roster, Skill, Spot, DEFAULT_SPOT_DAYS, FULL_TIME};
use roster_core::{EmployeeId, RosterError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};


/// Errors raised while importing a roster.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Roster(#[from] RosterError),
}

/// Raw roster input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterImport {
    /// Skill names. `"any"` is implicit and ignored here.
    pub skills: Vec<String>,
    pub spots: Vec<SpotRecord>,
    pub employees: Vec<EmployeeRecord>,
    pub vacations: Vec<VacationRecord>,
    pub extra_shifts: Vec<ExtraShiftRecord>,
    pub fixed_assignments: Vec<FixedAssignmentRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotRecord {
    pub name: String,
    pub required_skill: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unsuitable_skill: Option<String>,
    #[serde(default = "default_spot_days")]
    pub days: u32,
    #[serde(default)]
    pub offset: i64,
    #[serde(default)]
    pub score_before_vacation: i32,
    #[serde(default)]
    pub score_after_vacation: i32,
}

fn default_spot_days() -> u32 {
    DEFAULT_SPOT_DAYS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub name: String,
    pub skills: Vec<String>,
    /// Working time in percent; full time when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vip: Option<f64>,
}

/// Raw vacation dates of one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VacationRecord {
    pub employee: String,
    #[serde(default)]
    pub unavailable: Vec<NaiveDate>,
    #[serde(default)]
    pub undesirable: Vec<NaiveDate>,
}

/// Holiday shifts on `date` for each listed base spot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraShiftRecord {
    pub date: NaiveDate,
    pub spots: Vec<String>,
    #[serde(default = "default_extra_days")]
    pub days: u32,
}

fn default_extra_days() -> u32 {
    1
}

/// An assignment fixed by the user before optimization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedAssignmentRecord {
    pub employee: String,
    pub spot: String,
    pub date: NaiveDate,
}

impl RosterImport {
    /// Parses an import from JSON.
    pub fn from_json_str(s: &str) -> Result<Self, ImportError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Reads and parses an import from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ImportError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Builds the roster described by this import.
    ///
    /// Order: horizon, skills, spots, employees with their raw vacation
    /// dates, regular shifts, extra shifts, availability derivation, fixed
    /// assignments.
    ///
    /// # Errors
    ///
    /// Fails on an invalid config, an unknown skill, spot or fixed-assignment
    /// employee, or any rejected entity. Vacation rows naming an unknown
    /// employee are skipped with a warning.
    ///
    /// # Example
    ///
    /// ```
    /// use roster::import::RosterImport;
    /// use roster_config::RosterConfig;
    ///
    /// let import = RosterImport::from_json_str(r#"{
    ///     "skills": ["Ro"],
    ///     "spots": [{ "name": "Ro", "required_skill": "Ro" }],
    ///     "employees": [{ "name": "Anna", "skills": ["Ro"] }]
    /// }"#).unwrap();
    ///
    /// let roster = import.build(&RosterConfig::default()).unwrap();
    /// assert_eq!(roster.shifts().len(), 52);
    /// ```
    pub fn build(&self, config: &RosterConfig) -> Result<Roster, ImportError> {
        let mut roster = Roster::new(config.parametrization(), config.time_slots()?)?;

        for name in &self.skills {
            let skill: Skill = name.parse().unwrap_or_else(|never| match never {});
            roster.add_skill(skill);
        }

        for record in &self.spots {
            let required = roster.resolve_skill(&record.required_skill, &record.name)?;
            let mut spot = Spot::new(record.name.trim(), required)
                .with_days(record.days)
                .with_offset(record.offset)
                .with_vacation_scores(record.score_before_vacation, record.score_after_vacation);
            if let Some(unsuitable) = &record.unsuitable_skill {
                spot = spot.with_unsuitable_skill(roster.resolve_skill(unsuitable, &record.name)?);
            }
            roster.add_spot(spot)?;
        }

        let mut vacations = self.vacations_by_employee();
        for record in &self.employees {
            let skills = record
                .skills
                .iter()
                .map(|name| roster.resolve_skill(name, &record.name))
                .collect::<Result<Vec<_>, _>>()?;
            let mut employee = Employee::with_capacity(
                record.name.trim(),
                skills,
                record.time.unwrap_or(FULL_TIME),
                record.vip.unwrap_or(0.0),
            )?;
            for vacation in vacations.remove(record.name.trim()).unwrap_or_default() {
                for &date in &vacation.unavailable {
                    employee.add_unavailable_date(date);
                }
                for &date in &vacation.undesirable {
                    employee.add_undesirable_date(date);
                }
            }
            roster.add_employee(employee)?;
        }

        roster.generate_shift_assignments()?;
        for record in &self.extra_shifts {
            roster.add_extra_shifts(record.date, &record.spots, record.days)?;
        }

        let skipped_vacations = self.skip_vacations(&vacations);
        config.deriver().derive(&mut roster);

        for record in &self.fixed_assignments {
            let employee = find_employee(&roster, &record.employee)?;
            roster.lock_assignment(employee, record.spot.trim(), record.date)?;
        }

        info!(
            event = "roster_imported",
            time_slots = roster.time_slots().len(),
            spots = roster.spots().len(),
            employees = roster.employees().len(),
            shifts = roster.shifts().len(),
            fixed = self.fixed_assignments.len(),
            skipped_vacations,
        );
        Ok(roster)
    }

    fn vacations_by_employee(&self) -> HashMap<&str, Vec<&VacationRecord>> {
        let mut by_employee: HashMap<&str, Vec<&VacationRecord>> = HashMap::new();
        for record in &self.vacations {
            by_employee
                .entry(record.employee.trim())
                .or_default()
                .push(record);
        }
        by_employee
    }

    // Warns about vacation rows left over once every employee took theirs.
    fn skip_vacations(&self, unclaimed: &HashMap<&str, Vec<&VacationRecord>>) -> usize {
        let mut skipped = 0;
        for record in &self.vacations {
            if unclaimed.contains_key(record.employee.trim()) {
                warn!(event = "unknown_vacation_employee", employee = %record.employee);
                skipped += 1;
            }
        }
        skipped
    }
}

fn find_employee(roster: &Roster, name: &str) -> Result<EmployeeId, RosterError> {
    roster
        .employee_by_name(name.trim())
        .map(Employee::id)
        .ok_or_else(|| RosterError::UnknownEmployee {
            employee: name.to_string(),
        })
}
