//! Tests for roster configuration.

use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_defaults() {
    let config = RosterConfig::default();
    assert_eq!(config.horizon.start, date(2019, 1, 5));
    assert_eq!(config.horizon.end, date(2020, 1, 1));
    assert_eq!(config.cadence(), WeekCadence::default());
    assert!(config.availability.mark_day_after_vacation);
    assert_eq!(config.parametrization(), RosterParametrization::default());
    assert!(config.validate().is_ok());
    assert_eq!(config.time_slots().unwrap().len(), 52);
}

#[test]
fn test_toml_parsing() {
    let toml = r#"
        [horizon]
        start = "2020-01-04"
        end = "2020-03-01"
        window_days = 14

        [availability]
        mark_day_after_vacation = false

        [scoring]
        max_deviation_threshold = 3
        deviation_scale = 1000000.0
        spread_weight = 2
        vacation_overlap_weight = 5
    "#;

    let config = RosterConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.horizon.window_days, 14);
    assert!(!config.availability.mark_day_after_vacation);
    assert_eq!(config.scoring.max_deviation_threshold, 3);
    assert_eq!(config.scoring.deviation_scale, 1_000_000.0);
    assert_eq!(config.parametrization().spread_weight, 2);
    assert_eq!(config.scoring.vacation_overlap_weight, 5);
    // Unset fields keep their defaults
    assert_eq!(config.scoring.fairness_weight, 1);
    assert_eq!(config.cadence.week_start, Weekday::Sat);
    assert_eq!(config.time_slots().unwrap().len(), 5);
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        horizon:
          start: 2019-01-06
          end: 2019-02-01
        cadence:
          week_start: Sun
          first_workday: Mon
          last_workday: Sat
        scoring:
          fairness_weight: 4
    "#;

    let config = RosterConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.horizon.start, date(2019, 1, 6));
    assert_eq!(config.cadence().weekend_gap(), 2);
    assert_eq!(config.parametrization().fairness_weight, 4);
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_rejects_bad_horizon() {
    let config = RosterConfig::new().with_horizon(date(2019, 2, 1), date(2019, 1, 5));
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

    let config = RosterConfig::new().with_window_days(0);
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_validate_rejects_inconsistent_cadence() {
    let config =
        RosterConfig::new().with_cadence(WeekCadence::new(Weekday::Mon, Weekday::Mon, Weekday::Fri));
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("week_start (Mon)"));
}

#[test]
fn test_validate_rejects_start_off_week_start() {
    // Monday start with Saturday weeks
    let config = RosterConfig::new().with_horizon(date(2019, 1, 7), date(2019, 2, 1));
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("horizon start (2019-01-07)"));
    assert!(err.to_string().contains("2019-01-05"));
    assert!(matches!(config.time_slots(), Err(ConfigError::Invalid(_))));

    // The same Monday is fine once weeks start on Monday
    let config = config.with_cadence(WeekCadence::new(Weekday::Mon, Weekday::Tue, Weekday::Sun));
    assert!(config.validate().is_ok());
    assert_eq!(config.time_slots().unwrap()[0].start_date(), date(2019, 1, 7));
}

#[test]
fn test_invalid_toml() {
    let err = RosterConfig::from_toml_str("[horizon]\nstart = 5").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn test_missing_file() {
    let err = RosterConfig::load("does-not-exist.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_builder() {
    let config = RosterConfig::new()
        .with_horizon(date(2019, 1, 5), date(2019, 2, 1))
        .with_mark_day_after_vacation(false)
        .with_fairness(7, 2);

    assert_eq!(config.time_slots().unwrap().len(), 4);
    assert_eq!(config.parametrization().fairness_weight, 7);
    assert_eq!(config.parametrization().max_deviation_threshold, 2);
    assert_eq!(
        config.deriver(),
        AvailabilityDeriver::new(WeekCadence::default()).with_mark_day_after_vacation(false)
    );
}

#[test]
fn test_toml_round_trip() {
    let config = RosterConfig::new().with_fairness(3, 1);
    let text = toml::to_string(&config).unwrap();
    assert_eq!(RosterConfig::from_toml_str(&text).unwrap(), config);
}
