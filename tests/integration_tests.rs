use std::path::PathBuf;

use bikeshare_stats::dataset::{City, load_city};
use bikeshare_stats::filter::{FilterSpec, filter};
use bikeshare_stats::stats::{Report, duration_stats, station_stats, time_stats, user_stats};

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

#[test]
fn test_full_pipeline() {
    let dataset = load_city(&fixture_dir(), City::Chicago).expect("Failed to load fixture");

    assert_eq!(dataset.len(), 6);
    assert!(dataset.has_gender);
    assert!(dataset.has_birth_year);

    let report = Report::from_dataset(&dataset);
    assert_eq!(report.rows, 6);
    // Three of six trips start in January, three on a Monday.
    assert_eq!(report.time.most_common_month, Some(1));
    assert_eq!(report.time.most_common_day.as_deref(), Some("Monday"));
    assert_eq!(
        report.stations.most_common_start.as_deref(),
        Some("Clark St & Elm St")
    );
}

#[test]
fn test_unfiltered_spec_is_identity() {
    let dataset = load_city(&fixture_dir(), City::Chicago).unwrap();
    let spec = FilterSpec::parse("all", "all").unwrap();
    let out = filter(&dataset, &spec);

    assert_eq!(out.len(), dataset.len());
    for (a, b) in out.trips.iter().zip(&dataset.trips) {
        assert_eq!(a.start_time, b.start_time);
        assert_eq!(a.start_station, b.start_station);
    }
}

#[test]
fn test_january_statistics() {
    let dataset = load_city(&fixture_dir(), City::Chicago).unwrap();
    let spec = FilterSpec::parse("january", "all").unwrap();
    let january = filter(&dataset, &spec);

    assert_eq!(january.len(), 3);
    assert!(january.trips.iter().all(|t| t.month == 1));

    let durations = duration_stats(&january);
    assert_eq!(durations.total_secs, 1350);
    assert_eq!(durations.mean_secs, 450.0);

    let stations = station_stats(&january);
    assert_eq!(
        stations.most_common_trip.as_deref(),
        Some("Clark St & Elm St to Wood St & Hubbard St")
    );

    let time = time_stats(&january);
    assert_eq!(time.most_common_hour, Some(8));

    let users = user_stats(&january);
    assert_eq!(users.user_types[0], ("Subscriber".to_string(), 2));
    assert_eq!(users.user_types[1], ("Customer".to_string(), 1));
}

#[test]
fn test_empty_filter_combination() {
    let dataset = load_city(&fixture_dir(), City::Chicago).unwrap();
    // No June trip falls on a Monday in the fixture.
    let spec = FilterSpec::parse("june", "monday").unwrap();
    let subset = filter(&dataset, &spec);

    assert!(subset.is_empty());

    let users = user_stats(&subset);
    assert!(users.user_types.is_empty());
    assert_eq!(users.genders, Some(vec![]));
    assert!(users.birth_years.is_none());

    let durations = duration_stats(&subset);
    assert_eq!(durations.total_secs, 0);
    assert_eq!(durations.mean_secs, 0.0);
}

#[test]
fn test_demographics_from_fixture() {
    let dataset = load_city(&fixture_dir(), City::Chicago).unwrap();
    let users = user_stats(&dataset);

    let genders = users.genders.expect("Gender column is present");
    assert_eq!(genders[0], ("Male".to_string(), 3));
    assert_eq!(genders[1], ("Female".to_string(), 2));

    let years = users.birth_years.expect("Birth Year column is present");
    assert_eq!(years.earliest, 1975);
    assert_eq!(years.latest, 1992);
    assert_eq!(years.most_common, 1992);
}
