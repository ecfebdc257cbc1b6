//! CLI entry point for the bike-share statistics explorer.
//!
//! Runs the interactive prompt loop by default, or a one-shot analysis for
//! scripted use.

use anyhow::{Context, Result};
use bikeshare_stats::{
    city::{City, DataSources},
    filter::Filter,
    loader::load_data,
    model::Dataset,
    output::{
        SEPARATOR, print_pretty, write_duration_stats, write_json, write_report, write_rows,
        write_rows_json, write_station_stats, write_time_stats, write_user_stats,
    },
    prompt::Prompter,
    stats::{Report, station_stats, time_stats, trip_duration_stats, user_stats},
};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const PAGE_SIZE: usize = 5;

#[derive(Parser)]
#[command(name = "bikeshare_stats")]
#[command(about = "Explore US bike-share trip data", long_about = None)]
struct Cli {
    /// Directory holding chicago.csv, new_york_city.csv and washington.csv
    /// (defaults to $BIKESHARE_DATA_DIR, then the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// JSON file mapping city names to CSV paths, overriding the defaults
    #[arg(long, global = true, value_name = "FILE")]
    sources: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick a city, month and day interactively (default)
    Explore,
    /// Print statistics for one selection without prompting
    Analyze {
        /// Chicago, "New York City" or Washington
        #[arg(short, long)]
        city: String,

        /// January to June, or "all"
        #[arg(short, long, default_value = "all")]
        month: String,

        /// Monday to Sunday, or "all"
        #[arg(short, long, default_value = "all")]
        day: String,

        /// Emit the report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Also print the first N matching rows
        #[arg(long, default_value_t = 0, value_name = "N")]
        raw: usize,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bikeshare_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    // Stderr stays quiet by default so log lines do not interleave with prompts.
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(env_filter("RUST_LOG", LevelFilter::WARN));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(non_blocking_file)
        .with_filter(env_filter("RUST_LOG_JSON", LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let sources = resolve_sources(cli.data_dir, cli.sources)?;

    match cli.command.unwrap_or(Commands::Explore) {
        Commands::Explore => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            explore(Prompter::new(stdin.lock(), stdout.lock()), &sources)?;
        }
        Commands::Analyze {
            city,
            month,
            day,
            json,
            raw,
        } => {
            let city: City = city.parse()?;
            let filter = Filter::parse(&month, &day)?;
            let dataset = load_data(&sources, city, &filter)
                .with_context(|| format!("Failed to load data for {city}"))?;

            let report = Report::build(&dataset, filter);
            print_pretty(&report);

            let mut out = io::stdout().lock();
            if json {
                write_json(&mut out, &report)?;
            } else {
                write_report(&mut out, &report)?;
            }
            if raw > 0 {
                let rows = dataset.page(0, raw);
                if json {
                    write_rows_json(&mut out, rows)?;
                } else {
                    writeln!(out, "{SEPARATOR}")?;
                    write_rows(&mut out, rows, 0)?;
                }
            }
        }
    }

    Ok(())
}

/// Reads directives from `var`, falling back to `default` only when it is unset.
fn env_filter(var: &str, default: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(default.into())
        .with_env_var(var)
        .from_env_lossy()
}

/// Builds the city→file mapping from CLI flags and `BIKESHARE_DATA_DIR`.
fn resolve_sources(data_dir: Option<PathBuf>, sources: Option<PathBuf>) -> Result<DataSources> {
    let data_dir = data_dir
        .or_else(|| std::env::var_os("BIKESHARE_DATA_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));

    let resolved = match sources {
        Some(path) => DataSources::load(&path, &data_dir)
            .with_context(|| format!("Failed to read source mapping {}", path.display()))?,
        None => DataSources::from_dir(&data_dir),
    };

    for (city, path) in resolved.iter() {
        info!(city = %city, path = %path.display(), "Data source");
    }
    Ok(resolved)
}

/// Runs selection → statistics → raw rows → restart until the user stops or
/// input ends.
fn explore<R: BufRead, W: Write>(mut prompter: Prompter<R, W>, sources: &DataSources) -> Result<()> {
    writeln!(prompter.output(), "Hello! Let's explore some US bikeshare data!")?;

    loop {
        let outcome = run_once(&mut prompter, sources).and_then(|()| {
            Ok(prompter.confirm("Would you like to restart? Enter yes or no.")?)
        });
        match outcome {
            Ok(true) => continue,
            Ok(false) => break,
            Err(e) if is_eof(&e) => {
                info!("Input closed, exiting");
                break;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

#[tracing::instrument(skip_all)]
fn run_once<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    sources: &DataSources,
) -> Result<()> {
    let (city, filter) = prompter.ask_selection()?;
    writeln!(prompter.output(), "{SEPARATOR}")?;

    let dataset = match load_data(sources, city, &filter) {
        Ok(dataset) => dataset,
        Err(e) => {
            error!(error = %e, city = %city, "Data load failed");
            writeln!(prompter.output(), "Could not load data for {city}: {e}")?;
            return Ok(());
        }
    };

    if dataset.is_empty() {
        warn!(city = %city, filter = %filter, "Selection matched no trips");
    }
    writeln!(
        prompter.output(),
        "{city} ({filter}): {} matching trips",
        dataset.len()
    )?;

    let out = prompter.output();
    timed(out, |o| write_time_stats(o, &time_stats(&dataset)))?;
    timed(out, |o| write_station_stats(o, &station_stats(&dataset)))?;
    timed(out, |o| write_duration_stats(o, &trip_duration_stats(&dataset)))?;
    timed(out, |o| write_user_stats(o, &user_stats(&dataset)))?;

    page_raw_rows(prompter, &dataset)?;
    Ok(())
}

fn page_raw_rows<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    dataset: &Dataset,
) -> Result<()> {
    let mut page = 0;
    let mut question = "Do you want to see raw data? Enter yes or no.";

    while prompter.confirm(question)? {
        let rows = dataset.page(page, PAGE_SIZE);
        if rows.is_empty() {
            writeln!(prompter.output(), "No more rows to display.")?;
            break;
        }
        write_rows(prompter.output(), rows, page * PAGE_SIZE)?;
        page += 1;
        question = "Would you like to see five more lines of raw data?";
    }
    Ok(())
}

fn timed<W: Write>(out: &mut W, section: impl FnOnce(&mut W) -> Result<()>) -> Result<()> {
    let started = Instant::now();
    section(out)?;
    writeln!(
        out,
        "\nThis took {:.6} seconds.",
        started.elapsed().as_secs_f64()
    )?;
    writeln!(out, "{SEPARATOR}")?;
    Ok(())
}

fn is_eof(err: &anyhow::Error) -> bool {
    err.downcast_ref::<io::Error>()
        .is_some_and(|e| e.kind() == io::ErrorKind::UnexpectedEof)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::io::Cursor;

    const CSV: &str = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type
2017-01-02 08:00:00,2017-01-02 08:10:00,600,A,B,Subscriber
2017-01-09 08:00:00,2017-01-09 08:20:00,1200,A,C,Customer
2017-02-06 08:00:00,2017-02-06 08:05:00,300,B,A,Subscriber
";

    fn session(dir_name: &str, input: &str) -> String {
        let dir = format!("{}/{}", env::temp_dir().display(), dir_name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(format!("{dir}/washington.csv"), CSV).unwrap();

        let mut out = Vec::new();
        let prompter = Prompter::new(Cursor::new(input.as_bytes().to_vec()), &mut out);
        explore(prompter, &DataSources::from_dir(&dir)).unwrap();

        fs::remove_dir_all(&dir).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_explore_full_session() {
        let text = session(
            "bikeshare_explore_full",
            "washington\njanuary\nmonday\nyes\nyes\nno\n",
        );

        assert!(text.contains("Washington (month=January, day=Monday): 2 matching trips"));
        assert!(text.contains("Most common start hour: 08:00 (count: 2)"));
        assert!(text.contains("No gender data available."));
        assert!(text.contains("[0]"));
        assert!(text.contains("[1]"));
        assert!(text.contains("No more rows to display."));
        assert_eq!(text.matches("This took").count(), 4);
    }

    #[test]
    fn test_explore_restart_then_eof() {
        let text = session(
            "bikeshare_explore_restart",
            "washington\nall\nall\nno\nyes\nwashington\nmarch\nall\nno\n",
        );

        assert!(text.contains("Washington (month=all, day=all): 3 matching trips"));
        assert!(text.contains("Washington (month=March, day=all): 0 matching trips"));
        assert!(text.contains("Mean travel time: no data available for this selection"));
    }

    #[test]
    fn test_explore_reports_missing_source() {
        let text = session("bikeshare_explore_missing", "chicago\nall\nall\nno\n");
        assert!(text.contains("Could not load data for Chicago"));
    }

    #[test]
    fn test_env_filter_default_and_override() {
        // SAFETY: no other test reads these variables.
        unsafe {
            env::remove_var("BIKESHARE_TEST_LOG_UNSET");
            env::set_var("BIKESHARE_TEST_LOG_SET", "debug");
        }

        let fallback = env_filter("BIKESHARE_TEST_LOG_UNSET", LevelFilter::WARN);
        assert_eq!(fallback.max_level_hint(), Some(LevelFilter::WARN));

        let overridden = env_filter("BIKESHARE_TEST_LOG_SET", LevelFilter::WARN);
        assert_eq!(overridden.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_is_eof() {
        let eof: anyhow::Error = io::Error::new(io::ErrorKind::UnexpectedEof, "done").into();
        let other: anyhow::Error = io::Error::other("boom").into();
        assert!(is_eof(&eof));
        assert!(!is_eof(&other));
    }
}
