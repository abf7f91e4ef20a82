//! CLI entry point for the bikeshare statistics explorer.
//!
//! Provides an interactive `explore` session (validated prompts, raw-row
//! pagination, statistics with elapsed times, restart loop) and a one-shot
//! `analyze` subcommand for scripted runs. All validation happens here;
//! the library core only ever sees canonical, typed values.

use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use bikeshare_stats::{
    dataset::{City, Dataset, load_city},
    filter::{FilterSpec, filter},
    output,
    stats::{self, Report},
};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const PAGE_SIZE: usize = 5;

#[derive(Parser)]
#[command(name = "bikeshare_stats")]
#[command(about = "Explore US bikeshare trip data", long_about = None)]
struct Cli {
    /// Directory containing the city CSV files
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session: pick a city and filters, browse raw data,
    /// view statistics, repeat
    Explore,
    /// One-shot statistics run with pre-chosen filters
    Analyze {
        /// City to analyze: chicago, "new york city", or washington
        #[arg(value_name = "CITY")]
        city: String,

        /// Month filter: january through june, or "all"
        #[arg(short, long, default_value = "all")]
        month: String,

        /// Day-of-week filter: monday through sunday, or "all"
        #[arg(short = 'w', long, default_value = "all")]
        day: String,

        /// Emit the combined results as pretty JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/bikeshare_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("warn".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let data_dir = resolve_data_dir(cli.data_dir);
    debug!(data_dir = %data_dir.display(), "Data directory resolved");

    match cli.command {
        Commands::Explore => explore(&data_dir),
        Commands::Analyze {
            city,
            month,
            day,
            json,
        } => analyze(&data_dir, &city, &month, &day, json),
    }
}

/// CLI flag wins over `BIKESHARE_DATA_DIR`, which wins over `./data`.
fn resolve_data_dir(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| std::env::var_os("BIKESHARE_DATA_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("data"))
}

/// One-shot run with pre-validated command-line filters.
fn analyze(data_dir: &Path, city: &str, month: &str, day: &str, json: bool) -> Result<()> {
    let city: City = city.parse()?;
    let spec = FilterSpec::parse(month, day)?;

    let dataset = load_city(data_dir, city)
        .with_context(|| format!("loading data for {city}"))?;
    let subset = filter(&dataset, &spec);
    info!(city = %city, %spec, rows = subset.len(), "Filtered dataset ready");

    let report = Report::from_dataset(&subset);
    if json {
        output::print_json(&report)?;
    } else {
        print_report(&report);
    }

    Ok(())
}

/// The interactive session loop recreated from the classic explorer:
/// validated prompts, optional raw-data pages, all four statistics with
/// elapsed times, then a restart prompt.
fn explore(data_dir: &Path) -> Result<()> {
    println!("Hello! Let's explore some US bikeshare data!");

    loop {
        let city = prompt_city()?;
        let spec = prompt_filters()?;
        println!("{}", "-".repeat(40));

        let load_start = Instant::now();
        let dataset = load_city(data_dir, city)
            .with_context(|| format!("loading data for {city}"))?;
        let subset = filter(&dataset, &spec);
        info!(
            city = %city,
            %spec,
            loaded = dataset.len(),
            filtered = subset.len(),
            elapsed_ms = load_start.elapsed().as_millis() as u64,
            "Filtered dataset ready"
        );

        if subset.is_empty() {
            println!("No trips match that filter ({spec}). Statistics will show no data.");
        }

        display_raw_data(&subset)?;
        print_stats_timed(&subset);

        let restart = prompt_line("\nWould you like to restart? Enter yes or no.\n")?;
        if restart != "yes" {
            println!("Thank you for using the US Bikeshare Data Analysis tool!");
            return Ok(());
        }
    }
}

fn print_report(report: &Report) {
    let divider = "-".repeat(40);

    println!("\nThe Most Frequent Times of Travel");
    output::print_time_stats(&report.time);
    println!("{divider}");

    println!("\nThe Most Popular Stations and Trip");
    output::print_station_stats(&report.stations);
    println!("{divider}");

    println!("\nTrip Duration");
    output::print_duration_stats(&report.durations);
    println!("{divider}");

    println!("\nUser Stats");
    output::print_user_stats(&report.users);
    println!("{divider}");
}

/// Interactive-session variant of [`print_report`]: runs and prints each
/// statistic in turn, reporting its own elapsed time like the classic tool.
fn print_stats_timed(subset: &Dataset) {
    let divider = "-".repeat(40);

    println!("\nCalculating The Most Frequent Times of Travel...");
    timed(|| output::print_time_stats(&stats::time_stats(subset)));
    println!("{divider}");

    println!("\nCalculating The Most Popular Stations and Trip...");
    timed(|| output::print_station_stats(&stats::station_stats(subset)));
    println!("{divider}");

    println!("\nCalculating Trip Duration...");
    timed(|| output::print_duration_stats(&stats::duration_stats(subset)));
    println!("{divider}");

    println!("\nCalculating User Stats...");
    timed(|| output::print_user_stats(&stats::user_stats(subset)));
    println!("{divider}");
}

/// Runs `f`, reporting its wall-clock time the way the classic tool did.
fn timed<T>(f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let value = f();
    println!("\nThis took {:.6} seconds.", start.elapsed().as_secs_f64());
    value
}

/// Pages through raw rows, five at a time, for as long as the user says yes.
fn display_raw_data(dataset: &Dataset) -> Result<()> {
    let mut answer =
        prompt_line("\nWould you like to see first 5 rows of raw data; type 'yes' or 'no'?\n")?;
    let mut offset = 0;

    while answer == "yes" {
        let printed = output::print_raw_page(dataset, offset, PAGE_SIZE);
        if printed == 0 {
            println!("(no more rows)");
            return Ok(());
        }
        offset += printed;
        answer =
            prompt_line("\nWould you like to see next 5 rows of raw data; type 'yes' or 'no'?\n")?;
    }

    Ok(())
}

fn prompt_city() -> Result<City> {
    loop {
        let input = prompt_line(
            "Please select either Chicago, New York City, or Washington. \
             Remember to double check your spelling!\n",
        )?;
        match input.parse() {
            Ok(city) => return Ok(city),
            Err(e) => println!("{e}"),
        }
    }
}

fn prompt_filters() -> Result<FilterSpec> {
    let month = loop {
        let input = prompt_line(
            "What month would you like to filter by? Please enter a month from \
             January to June or enter 'all' if you would like to view all six \
             months in the data.\n",
        )?;
        match FilterSpec::parse(&input, "all") {
            Ok(spec) => break spec.month,
            Err(e) => println!("{e}"),
        }
    };

    let day = loop {
        let input = prompt_line(
            "What day of the week would you like to filter by? Please enter a \
             day of the week or enter 'all' if you would like to view all days \
             in the data.\n",
        )?;
        match FilterSpec::parse("all", &input) {
            Ok(spec) => break spec.day,
            Err(e) => println!("{e}"),
        }
    };

    Ok(FilterSpec { month, day })
}

/// Prints a prompt, reads one line, and normalizes it to trimmed lowercase.
fn prompt_line(message: &str) -> Result<String> {
    print!("{message}");
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_lowercase())
}
