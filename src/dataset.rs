//! City CSV ingestion.
//!
//! Reads a whole city file into memory and attaches the calendar fields
//! (month number, day-of-week name) derived from each trip's start time.
//! No filtering happens here.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::Error;

/// Timestamp layout used by all three source files, e.g. `2017-01-01 00:00:36`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The cities with published trip data, keyed by their canonical
/// lowercase names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Canonical lowercase name as entered by users.
    pub fn name(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// File name of the city's CSV inside the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

impl FromStr for City {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        City::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| Error::UnknownCity(s.to_string()))
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One trip observation with its derived calendar fields.
#[derive(Debug, Clone)]
pub struct Trip {
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    /// Trip duration in seconds, exactly as the source records it.
    pub duration_secs: i64,
    pub start_station: String,
    pub end_station: String,
    pub user_type: String,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,

    /// Month number (1-12) of the start time, attached at load.
    pub month: u32,
    /// Full English day name of the start time, attached at load.
    pub day_of_week: &'static str,
}

impl Trip {
    /// Hour of day (0-23) of the start time, derived lazily when the
    /// time statistics run.
    pub fn start_hour(&self) -> u32 {
        self.start_time.time().hour()
    }
}

/// All trips for one city, plus which optional columns its schema carries.
///
/// Presence is decided by the header row, not by cell values: a column
/// that exists but is empty for every filtered row still counts as present.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub trips: Vec<Trip>,
    pub has_gender: bool,
    pub has_birth_year: bool,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}

/// Row shape as it appears in the source CSVs. The leading unnamed index
/// column and any unknown columns are ignored. Washington writes durations
/// as floats (`977.0`) and birth years arrive as `1992.0`, so the numeric
/// fields deserialize through f64.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time", default)]
    end_time: Option<String>,
    #[serde(rename = "Trip Duration")]
    trip_duration: f64,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type")]
    user_type: String,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<f64>,
}

/// Loads every row of the named city's CSV into memory.
///
/// # Errors
///
/// Fails with [`Error::MalformedTimestamp`] if any row's start time does
/// not parse; rows are never skipped silently. I/O and CSV-shape failures
/// surface as [`Error::Csv`].
pub fn load_city(data_dir: &Path, city: City) -> Result<Dataset, Error> {
    let path = data_dir.join(city.file_name());
    info!(city = city.name(), path = %path.display(), "Loading trip data");

    let mut reader = csv::Reader::from_path(&path)?;
    let headers = reader.headers()?;
    let has_gender = headers.iter().any(|h| h == "Gender");
    let has_birth_year = headers.iter().any(|h| h == "Birth Year");

    let mut trips = Vec::new();
    for (idx, result) in reader.deserialize().enumerate() {
        let raw: RawTrip = result?;

        let start_time = NaiveDateTime::parse_from_str(&raw.start_time, TIMESTAMP_FORMAT)
            .map_err(|source| Error::MalformedTimestamp {
                row: idx + 1,
                value: raw.start_time.clone(),
                source,
            })?;
        // End time is optional in the data model; a missing or odd value
        // does not invalidate the trip.
        let end_time = raw
            .end_time
            .as_deref()
            .and_then(|s| NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).ok());

        trips.push(Trip {
            month: start_time.month(),
            day_of_week: day_name(start_time.weekday()),
            start_time,
            end_time,
            duration_secs: raw.trip_duration.round() as i64,
            start_station: raw.start_station,
            end_station: raw.end_station,
            user_type: raw.user_type,
            gender: raw.gender,
            birth_year: raw.birth_year.map(|y| y as i32),
        });
    }

    debug!(
        rows = trips.len(),
        has_gender, has_birth_year, "City data loaded"
    );

    Ok(Dataset {
        trips,
        has_gender,
        has_birth_year,
    })
}

/// Full English name for a weekday, matching the day names users filter by.
pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    fn temp_data_dir(name: &str, city_csv: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("bikeshare_stats_{}", name));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("chicago.csv"), city_csv).unwrap();
        dir
    }

    const FULL_SCHEMA: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1423854,2017-06-23 15:09:32,2017-06-23 15:14:53,321,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0
955915,2017-05-25 18:19:03,2017-05-25 18:45:53,1610,Theater on the Lake,Sheffield Ave & Waveland Ave,Subscriber,Female,1992.0
9031,2017-01-04 08:27:49,2017-01-04 08:34:45,416,May St & Taylor St,Wood St & Taylor St,Subscriber,,
";

    #[test]
    fn test_city_from_str() {
        assert_eq!("chicago".parse::<City>().unwrap(), City::Chicago);
        assert_eq!("new york city".parse::<City>().unwrap(), City::NewYorkCity);
        assert!(matches!(
            "boston".parse::<City>(),
            Err(Error::UnknownCity(name)) if name == "boston"
        ));
    }

    #[test]
    fn test_load_derives_calendar_fields() {
        let dir = temp_data_dir("derives", FULL_SCHEMA);
        let ds = load_city(&dir, City::Chicago).unwrap();

        assert_eq!(ds.len(), 3);
        assert!(ds.has_gender);
        assert!(ds.has_birth_year);

        // 2017-06-23 was a Friday.
        assert_eq!(ds.trips[0].month, 6);
        assert_eq!(ds.trips[0].day_of_week, "Friday");
        assert_eq!(ds.trips[0].start_hour(), 15);
        assert_eq!(ds.trips[0].duration_secs, 321);
        assert_eq!(ds.trips[0].birth_year, Some(1992));
        assert!(ds.trips[0].end_time.is_some());

        // Empty Gender / Birth Year cells stay optional per row.
        assert_eq!(ds.trips[2].gender, None);
        assert_eq!(ds.trips[2].birth_year, None);
    }

    #[test]
    fn test_load_without_demographic_columns() {
        let csv = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
0,2017-03-01 09:00:00,2017-03-01 09:10:00,600.0,A,B,Customer
";
        let dir = temp_data_dir("washington_shape", csv);
        let ds = load_city(&dir, City::Chicago).unwrap();

        assert!(!ds.has_gender);
        assert!(!ds.has_birth_year);
        assert_eq!(ds.trips[0].gender, None);
        assert_eq!(ds.trips[0].birth_year, None);
        // Float-formatted duration rounds to whole seconds.
        assert_eq!(ds.trips[0].duration_secs, 600);
    }

    #[test]
    fn test_load_malformed_timestamp_aborts() {
        let csv = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
0,2017-03-01 09:00:00,2017-03-01 09:10:00,600,A,B,Customer
1,not-a-date,2017-03-01 09:10:00,600,A,B,Customer
";
        let dir = temp_data_dir("malformed", csv);
        let err = load_city(&dir, City::Chicago).unwrap_err();

        match err {
            Error::MalformedTimestamp { row, value, .. } => {
                assert_eq!(row, 2);
                assert_eq!(value, "not-a-date");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_missing_file_is_csv_error() {
        let dir = env::temp_dir().join("bikeshare_stats_no_such_dir");
        fs::create_dir_all(&dir).unwrap();
        let _ = fs::remove_file(dir.join("chicago.csv"));

        assert!(matches!(
            load_city(&dir, City::Chicago),
            Err(Error::Csv(_))
        ));
    }

    #[test]
    fn test_day_name_is_full_english() {
        assert_eq!(day_name(Weekday::Mon), "Monday");
        assert_eq!(day_name(Weekday::Sun), "Sunday");
    }
}
