//! Month / day-of-week filtering over a loaded [`Dataset`].
//!
//! The filter assumes pre-validated input: month and day values are parsed
//! into enums before they get here, so the engine itself never sees an
//! out-of-set name.

use std::fmt;
use std::str::FromStr;

use crate::dataset::Dataset;
use crate::error::Error;

/// The months covered by the published data. The sources only span
/// January through June, so july..december are rejected at parse time
/// instead of silently filtering down to an empty set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Month {
    January = 1,
    February,
    March,
    April,
    May,
    June,
}

impl Month {
    pub const ALL: [Month; 6] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
    ];

    /// 1-based month number, matching the derived `Trip::month` field.
    pub fn number(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
        }
    }
}

impl FromStr for Month {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Month::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidMonth(s.to_string()))
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    /// Title-case day name, matching the derived `Trip::day_of_week` field.
    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }
}

impl FromStr for Day {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Day::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidDay(s.to_string()))
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The (month, day) predicate pair. `None` means "all".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub month: Option<Month>,
    pub day: Option<Day>,
}

impl FilterSpec {
    /// Parses the user-facing `"january"` / `"all"` form of both fields.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMonth`] or [`Error::InvalidDay`] for values
    /// outside the canonical sets.
    pub fn parse(month: &str, day: &str) -> Result<Self, Error> {
        let month = match month {
            "all" => None,
            other => Some(other.parse()?),
        };
        let day = match day {
            "all" => None,
            other => Some(other.parse()?),
        };
        Ok(FilterSpec { month, day })
    }

    pub fn is_unfiltered(&self) -> bool {
        self.month.is_none() && self.day.is_none()
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let month = self.month.map_or("all", Month::name);
        let day = self.day.map_or("all", Day::name);
        write!(f, "month={month} day={day}")
    }
}

/// Returns the subset of `dataset` matching `spec`, in the original order.
///
/// Both predicates are independent equality checks on the derived fields,
/// so this is exact and idempotent. The input is never mutated; the output
/// owns its own rows and carries the same schema flags.
pub fn filter(dataset: &Dataset, spec: &FilterSpec) -> Dataset {
    let trips = dataset
        .trips
        .iter()
        .filter(|t| spec.month.map_or(true, |m| t.month == m.number()))
        .filter(|t| spec.day.map_or(true, |d| t.day_of_week == d.name()))
        .cloned()
        .collect();

    Dataset {
        trips,
        has_gender: dataset.has_gender,
        has_birth_year: dataset.has_birth_year,
    }
}
