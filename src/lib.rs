//! Filter-and-aggregate pipeline for US bikeshare trip data.
//!
//! [`dataset`] loads a city's CSV and derives calendar fields, [`filter`]
//! narrows it by month and day-of-week, and [`stats`] runs the four
//! aggregation routines over the result. [`output`] renders the structured
//! results for the interactive shell in `main.rs`.

pub mod dataset;
pub mod error;
pub mod filter;
pub mod output;
pub mod stats;
