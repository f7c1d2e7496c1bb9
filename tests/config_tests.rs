use allocation_view::{ConfigError, ViewConfig};
use chrono::Weekday;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn defaults_are_sunday_and_twelve_weeks() {
    let config = ViewConfig::default();
    assert_eq!(config.week_start, Weekday::Sun);
    assert_eq!(config.week_count, 12);
}

#[test]
fn json_file_fills_missing_fields_with_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"week_start": "Mon"}}"#).unwrap();
    let config = ViewConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config.week_start, Weekday::Mon);
    assert_eq!(config.week_count, 12);
}

#[test]
fn overrides_apply_and_reject_garbage() {
    let config = ViewConfig::default()
        .with_overrides(Some("sat"), Some("4"))
        .unwrap();
    assert_eq!(config.week_start, Weekday::Sat);
    assert_eq!(config.week_count, 4);

    let err = ViewConfig::default()
        .with_overrides(None, Some("many"))
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
    assert!(err.to_string().contains("many"));
}

#[test]
fn week_count_is_capped() {
    let config = ViewConfig::default();
    assert_eq!(config.max_week_count, 520);
    assert_eq!(config.week_builder(Some(520)).unwrap().week_count(), 520);
    assert_eq!(config.week_builder(None).unwrap().week_count(), 12);

    let err = config.week_builder(Some(521)).unwrap_err();
    assert!(matches!(err, ConfigError::WeekCountTooLarge { count: 521, max: 520 }));

    let err = ViewConfig::default()
        .with_overrides(None, Some("9999"))
        .unwrap_err();
    assert!(matches!(err, ConfigError::WeekCountTooLarge { .. }));
}

#[test]
fn json_file_with_oversized_week_count_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"week_count": 100000}}"#).unwrap();
    let err = ViewConfig::from_json_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("exceeds the maximum of 520"));
}
