//! The four aggregation routines over a filtered [`Dataset`].
//!
//! All routines are pure and tolerate an empty input: frequency-style
//! "most common" queries answer `None` when there is nothing to count,
//! numeric aggregates fall back to zero. Results are structured values;
//! rendering them is the output layer's job.

use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

use crate::dataset::Dataset;

/// Most frequent value of an iterator, or `None` for an empty one.
///
/// Ties are broken by first occurrence in iteration order, which is the
/// dataset's stable row order everywhere this is used.
fn mode<T, I>(values: I) -> Option<T>
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    let mut counts: HashMap<T, (usize, usize)> = HashMap::new();
    for (idx, value) in values.into_iter().enumerate() {
        let entry = counts.entry(value).or_insert((0, idx));
        entry.0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(value, _)| value)
}

/// Occurrence counts sorted by descending count; count ties keep the
/// first-occurrence order.
fn frequency_table<'a, I>(values: I) -> Vec<(String, u64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&str, (u64, usize)> = HashMap::new();
    for (idx, value) in values.into_iter().enumerate() {
        let entry = counts.entry(value).or_insert((0, idx));
        entry.0 += 1;
    }

    let mut table: Vec<(&str, (u64, usize))> = counts.into_iter().collect();
    table.sort_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
        count_b.cmp(count_a).then(first_a.cmp(first_b))
    });

    table
        .into_iter()
        .map(|(value, (count, _))| (value.to_string(), count))
        .collect()
}

/// Most frequent times of travel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeStats {
    pub most_common_month: Option<u32>,
    pub most_common_day: Option<String>,
    pub most_common_hour: Option<u32>,
}

pub fn time_stats(dataset: &Dataset) -> TimeStats {
    TimeStats {
        most_common_month: mode(dataset.trips.iter().map(|t| t.month)),
        most_common_day: mode(dataset.trips.iter().map(|t| t.day_of_week)).map(str::to_string),
        most_common_hour: mode(dataset.trips.iter().map(|t| t.start_hour())),
    }
}

/// Most popular stations and trip.
///
/// The trip key is the text `"{start} to {end}"`. Two different station
/// pairs that happen to concatenate to the same text are indistinguishable;
/// that approximation is part of the statistic's definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationStats {
    pub most_common_start: Option<String>,
    pub most_common_end: Option<String>,
    pub most_common_trip: Option<String>,
}

pub fn station_stats(dataset: &Dataset) -> StationStats {
    StationStats {
        most_common_start: mode(dataset.trips.iter().map(|t| t.start_station.as_str()))
            .map(str::to_string),
        most_common_end: mode(dataset.trips.iter().map(|t| t.end_station.as_str()))
            .map(str::to_string),
        most_common_trip: mode(
            dataset
                .trips
                .iter()
                .map(|t| format!("{} to {}", t.start_station, t.end_station)),
        ),
    }
}

/// Total and mean trip duration, in the source's unit (seconds).
///
/// An empty input yields total 0 and mean 0.0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub total_secs: i64,
    pub mean_secs: f64,
}

pub fn duration_stats(dataset: &Dataset) -> DurationStats {
    let total: i64 = dataset.trips.iter().map(|t| t.duration_secs).sum();
    let mean = if dataset.is_empty() {
        0.0
    } else {
        total as f64 / dataset.len() as f64
    };

    DurationStats {
        total_secs: total,
        mean_secs: mean,
    }
}

/// Birth-year aggregates, only produced when at least one value exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub latest: i32,
    pub most_common: i32,
}

/// User demographics.
///
/// `genders` is `None` exactly when the dataset schema has no Gender
/// column; with the column present but no matching rows it is an empty
/// table. `birth_years` is `None` when the column is absent or the
/// filtered set holds no birth-year values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub user_types: Vec<(String, u64)>,
    pub genders: Option<Vec<(String, u64)>>,
    pub birth_years: Option<BirthYearStats>,
}

pub fn user_stats(dataset: &Dataset) -> UserStats {
    let user_types = frequency_table(dataset.trips.iter().map(|t| t.user_type.as_str()));

    let genders = dataset
        .has_gender
        .then(|| frequency_table(dataset.trips.iter().filter_map(|t| t.gender.as_deref())));

    let years: Vec<i32> = dataset.trips.iter().filter_map(|t| t.birth_year).collect();
    let birth_years = if dataset.has_birth_year {
        match (
            years.iter().copied().min(),
            years.iter().copied().max(),
            mode(years.iter().copied()),
        ) {
            (Some(earliest), Some(latest), Some(most_common)) => Some(BirthYearStats {
                earliest,
                latest,
                most_common,
            }),
            _ => None,
        }
    } else {
        None
    };

    UserStats {
        user_types,
        genders,
        birth_years,
    }
}

/// All four statistics for one filtered dataset, in one serializable value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub rows: usize,
    pub time: TimeStats,
    pub stations: StationStats,
    pub durations: DurationStats,
    pub users: UserStats,
}

impl Report {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Report {
            rows: dataset.len(),
            time: time_stats(dataset),
            stations: station_stats(dataset),
            durations: duration_stats(dataset),
            users: user_stats(dataset),
        }
    }
}
