//! Configuration system for roster planning.
//!
//! Load the planning horizon, week cadence, availability derivation and
//! scoring parameters from TOML or YAML without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use chrono::Weekday;
//! use roster_config::RosterConfig;
//!
//! let config = RosterConfig::from_toml_str(r#"
//!     [horizon]
//!     start = "2019-01-05"
//!     end = "2019-04-01"
//!
//!     [cadence]
//!     week_start = "Sat"
//!
//!     [scoring]
//!     max_deviation_threshold = 2
//!     fairness_weight = 10
//! "#).unwrap();
//!
//! assert_eq!(config.cadence.week_start, Weekday::Sat);
//! assert_eq!(config.parametrization().fairness_weight, 10);
//! assert_eq!(config.time_slots().unwrap().len(), 13);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use roster_config::RosterConfig;
//!
//! let config = RosterConfig::load("roster.toml").unwrap_or_default();
//! // Proceeds with one year of weekly slots from 2019-01-05
//! assert_eq!(config.horizon.window_days, 7);
//! ```

use std::path::Path;

use chrono::{NaiveDate, Weekday};
use roster_core::{
    AvailabilityDeriver, RosterError, RosterParametrization, TimeSlot, WeekCadence,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(test)]
mod tests;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error(transparent)]
    Roster(#[from] RosterError),
}

/// Main roster configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RosterConfig {
    /// Planning horizon.
    #[serde(default)]
    pub horizon: HorizonConfig,

    /// Weekly cadence used for windows and vacation boundaries.
    #[serde(default)]
    pub cadence: CadenceConfig,

    /// Availability derivation switches.
    #[serde(default)]
    pub availability: AvailabilityConfig,

    /// Scoring parameters.
    #[serde(default)]
    pub scoring: ScoringConfig,
}

impl RosterConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, contains invalid TOML, or
    /// fails [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::from_toml_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the horizon is empty, windows have
    /// no length, windows do not start the day after the last workday, or
    /// the horizon does not start on `week_start`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.horizon.end <= self.horizon.start {
            return Err(ConfigError::Invalid(format!(
                "horizon end ({}) must be after start ({})",
                self.horizon.end, self.horizon.start
            )));
        }
        if self.horizon.window_days == 0 {
            return Err(ConfigError::Invalid(
                "horizon window_days must be at least 1".to_string(),
            ));
        }
        let cadence = self.cadence();
        if !cadence.is_consistent() {
            return Err(ConfigError::Invalid(format!(
                "week_start ({}) must be the day after last_workday ({})",
                self.cadence.week_start, self.cadence.last_workday
            )));
        }
        // Derivation looks for workdays at fixed offsets inside each window.
        let aligned = cadence.align(self.horizon.start);
        if aligned != self.horizon.start {
            return Err(ConfigError::Invalid(format!(
                "horizon start ({}) must fall on week_start ({}), e.g. {}",
                self.horizon.start, self.cadence.week_start, aligned
            )));
        }
        Ok(())
    }

    /// Sets the planning horizon.
    pub fn with_horizon(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.horizon.start = start;
        self.horizon.end = end;
        self
    }

    /// Sets the window length in days.
    pub fn with_window_days(mut self, days: u32) -> Self {
        self.horizon.window_days = days;
        self
    }

    /// Sets the weekly cadence.
    pub fn with_cadence(mut self, cadence: WeekCadence) -> Self {
        self.cadence = CadenceConfig {
            week_start: cadence.week_start,
            first_workday: cadence.first_workday,
            last_workday: cadence.last_workday,
        };
        self
    }

    /// Enables or disables marking the day after each vacation day.
    pub fn with_mark_day_after_vacation(mut self, mark: bool) -> Self {
        self.availability.mark_day_after_vacation = mark;
        self
    }

    /// Sets the fairness weight and tolerated deviation.
    pub fn with_fairness(mut self, weight: i64, threshold: i64) -> Self {
        self.scoring.fairness_weight = weight;
        self.scoring.max_deviation_threshold = threshold;
        self
    }

    /// Returns the configured week cadence.
    pub fn cadence(&self) -> WeekCadence {
        WeekCadence::new(
            self.cadence.week_start,
            self.cadence.first_workday,
            self.cadence.last_workday,
        )
    }

    /// Returns the scoring parameters for a roster.
    pub fn parametrization(&self) -> RosterParametrization {
        RosterParametrization {
            max_deviation_threshold: self.scoring.max_deviation_threshold,
            deviation_scale: self.scoring.deviation_scale,
            fairness_weight: self.scoring.fairness_weight,
            spread_weight: self.scoring.spread_weight,
            vacation_overlap_weight: self.scoring.vacation_overlap_weight,
            undesirable_overlap_weight: self.scoring.undesirable_overlap_weight,
        }
    }

    /// Returns an availability deriver configured by this config.
    pub fn deriver(&self) -> AvailabilityDeriver {
        AvailabilityDeriver::new(self.cadence())
            .with_mark_day_after_vacation(self.availability.mark_day_after_vacation)
    }

    /// Generates the time slots of the horizon.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the configuration does not
    /// [`validate`](Self::validate).
    pub fn time_slots(&self) -> Result<Vec<TimeSlot>, ConfigError> {
        self.validate()?;
        Ok(TimeSlot::tile(
            self.horizon.start,
            self.horizon.end,
            self.horizon.window_days,
        )?)
    }
}

/// Planning horizon configuration.
///
/// Windows are generated from `start` while their start is before `end`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HorizonConfig {
    /// First day of the first window.
    pub start: NaiveDate,

    /// Exclusive bound on window starts.
    pub end: NaiveDate,

    /// Length of each window in days.
    pub window_days: u32,
}

impl Default for HorizonConfig {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2019, 1, 5).unwrap_or(NaiveDate::MIN),
            end: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or(NaiveDate::MIN),
            window_days: 7,
        }
    }
}

/// Week cadence configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CadenceConfig {
    /// Weekday each window starts on.
    pub week_start: Weekday,

    /// Weekday a vacation week begins on.
    pub first_workday: Weekday,

    /// Weekday a vacation week ends on.
    pub last_workday: Weekday,
}

impl Default for CadenceConfig {
    fn default() -> Self {
        let cadence = WeekCadence::default();
        Self {
            week_start: cadence.week_start,
            first_workday: cadence.first_workday,
            last_workday: cadence.last_workday,
        }
    }
}

/// Availability derivation configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AvailabilityConfig {
    /// Mark the day after each unavailable day as undesirable.
    pub mark_day_after_vacation: bool,
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        Self {
            mark_day_after_vacation: true,
        }
    }
}

/// Scoring configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Workload deviation from the mean tolerated without penalty.
    pub max_deviation_threshold: i64,

    /// Scale applied to the root of the squared deviation sum.
    pub deviation_scale: f64,

    /// Soft penalty per unit of excess deviation.
    pub fairness_weight: i64,

    /// Soft penalty per unit of the deviation root scaled by
    /// `deviation_scale`. Zero leaves it out of the score.
    pub spread_weight: i64,

    /// Hard penalty per shift day on an unavailable date.
    pub vacation_overlap_weight: i64,

    /// Soft penalty per shift day on an undesirable date.
    pub undesirable_overlap_weight: i64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let params = RosterParametrization::default();
        Self {
            max_deviation_threshold: params.max_deviation_threshold,
            deviation_scale: params.deviation_scale,
            fairness_weight: params.fairness_weight,
            spread_weight: params.spread_weight,
            vacation_overlap_weight: params.vacation_overlap_weight,
            undesirable_overlap_weight: params.undesirable_overlap_weight,
        }
    }
}
