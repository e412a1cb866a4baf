use chrono::{DateTime, TimeZone, Utc};
use portfolio_sync_core::contract::ProjectRecord;
use portfolio_sync_core::staleness::should_regenerate;

fn timestamp(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

fn record(generated: bool, readme_update_time: DateTime<Utc>) -> ProjectRecord {
    ProjectRecord {
        repo_name: "example".to_string(),
        readme_update_time,
        description_generated: generated,
        description: "stored".to_string(),
    }
}

#[test]
fn regenerates_when_no_record_exists() {
    // First-run behaviour: always regenerate, regardless of the timestamp.
    assert!(should_regenerate(None, timestamp(2024, 5, 1)));
    assert!(should_regenerate(None, timestamp(1999, 1, 1)));
}

#[test]
fn regenerates_when_description_was_never_generated() {
    // Rule 2 wins even when the README is not newer than the record, so a
    // repository whose generation previously failed is retried every run.
    let rec = record(false, timestamp(2024, 5, 1));
    assert!(should_regenerate(Some(&rec), timestamp(2024, 5, 1)));
    assert!(should_regenerate(Some(&rec), timestamp(2024, 4, 1)));
}

#[test]
fn regenerates_when_readme_is_newer_than_record() {
    let rec = record(true, timestamp(2024, 5, 1));
    assert!(should_regenerate(Some(&rec), timestamp(2024, 5, 2)));
}

#[test]
fn reuses_description_when_timestamp_unchanged() {
    let rec = record(true, timestamp(2024, 5, 1));
    assert!(!should_regenerate(Some(&rec), timestamp(2024, 5, 1)));
}

#[test]
fn reuses_description_when_readme_is_older_than_record() {
    let rec = record(true, timestamp(2024, 5, 1));
    assert!(!should_regenerate(Some(&rec), timestamp(2024, 4, 30)));
}

#[test]
fn sentinel_record_always_loses_to_real_timestamps() {
    let rec = ProjectRecord {
        description_generated: true,
        ..ProjectRecord::new("example")
    };
    assert!(should_regenerate(Some(&rec), timestamp(2024, 5, 1)));
}
