//! Typed errors for the loading and filtering pipeline.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Requested city is not in the canonical city table.
    #[error("unknown city '{0}', expected one of: chicago, new york city, washington")]
    UnknownCity(String),

    /// A row's start-time value could not be parsed. Aborts the whole load;
    /// downstream statistics assume a complete, well-formed column.
    #[error("malformed start time '{value}' in row {row}")]
    MalformedTimestamp {
        row: usize,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Not a canonical month name (january through june) or "all".
    #[error("'{0}' is not a month between january and june, or 'all'")]
    InvalidMonth(String),

    /// Not a canonical day-of-week name or "all".
    #[error("'{0}' is not a day of the week, or 'all'")]
    InvalidDay(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
