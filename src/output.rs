//! Console rendering for statistics results and raw rows.
//!
//! Everything here takes the structured values produced by [`crate::stats`]
//! and turns them into human-readable text or JSON; no aggregation logic.

use anyhow::Result;

use crate::dataset::{Dataset, Trip};
use crate::stats::{DurationStats, Report, StationStats, TimeStats, UserStats};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Display name for a derived month number. Numbers outside 1-12 cannot
/// come out of chrono, but fall back to the raw number just in case.
fn month_display(month: u32) -> String {
    (month as usize)
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i))
        .map_or_else(|| month.to_string(), |name| (*name).to_string())
}

fn or_no_data(value: Option<String>) -> String {
    value.unwrap_or_else(|| "(no data for this filter)".to_string())
}

pub fn print_time_stats(stats: &TimeStats) {
    println!("Most common month: {}", or_no_data(stats.most_common_month.map(month_display)));
    println!("Most common day:   {}", or_no_data(stats.most_common_day.clone()));
    println!("Most common hour:  {}", or_no_data(stats.most_common_hour.map(|h| h.to_string())));
}

pub fn print_station_stats(stats: &StationStats) {
    println!("Most common start station: {}", or_no_data(stats.most_common_start.clone()));
    println!("Most common end station:   {}", or_no_data(stats.most_common_end.clone()));
    println!("Most common trip:          {}", or_no_data(stats.most_common_trip.clone()));
}

pub fn print_duration_stats(stats: &DurationStats) {
    println!("Total travel time: {} seconds", stats.total_secs);
    println!("Mean travel time:  {:.2} seconds", stats.mean_secs);
}

pub fn print_user_stats(stats: &UserStats) {
    println!("User types:");
    for (user_type, count) in &stats.user_types {
        println!("  {user_type}: {count}");
    }
    if stats.user_types.is_empty() {
        println!("  (no data for this filter)");
    }

    if let Some(genders) = &stats.genders {
        println!("Genders:");
        for (gender, count) in genders {
            println!("  {gender}: {count}");
        }
        if genders.is_empty() {
            println!("  (no data for this filter)");
        }
    }

    if let Some(years) = &stats.birth_years {
        println!("Earliest birth year:    {}", years.earliest);
        println!("Most recent birth year: {}", years.latest);
        println!("Most common birth year: {}", years.most_common);
    }
}

/// Prints a combined report as pretty JSON to stdout.
pub fn print_json(report: &Report) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Prints one page of raw rows starting at `offset`. Returns how many
/// rows were printed, so callers can tell when the dataset is exhausted.
pub fn print_raw_page(dataset: &Dataset, offset: usize, page_size: usize) -> usize {
    let page: Vec<&Trip> = dataset.trips.iter().skip(offset).take(page_size).collect();
    for (i, trip) in page.iter().enumerate() {
        println!(
            "#{} {} | {} -> {} | {}s | {}{}{}",
            offset + i + 1,
            trip.start_time,
            trip.start_station,
            trip.end_station,
            trip.duration_secs,
            trip.user_type,
            trip.gender.as_deref().map_or(String::new(), |g| format!(" | {g}")),
            trip.birth_year.map_or(String::new(), |y| format!(" | born {y}")),
        );
    }
    page.len()
}
