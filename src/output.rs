//! Output formatting for reports and raw trip rows.
//!
//! Supports plain-text sections, pretty-printed JSON, and paged raw rows.

use std::fmt::Display;
use std::io::Write;

use anyhow::Result;
use tracing::debug;

use crate::filter::{month_name, weekday_name};
use crate::model::Trip;
use crate::stats::{
    Availability, Counted, DurationStats, Report, StationStats, TimeStats, UserStats,
};

pub const NO_DATA: &str = "no data available for this selection";
pub const SEPARATOR: &str = "----------------------------------------";

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty(report: &Report) {
    debug!("{:#?}", report);
}

/// Writes a report as pretty-printed JSON followed by a newline.
pub fn write_json<W: Write>(out: &mut W, report: &Report) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

/// Writes trips as a pretty-printed JSON array followed by a newline.
pub fn write_rows_json<W: Write>(out: &mut W, rows: &[Trip]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, rows)?;
    writeln!(out)?;
    Ok(())
}

/// Writes every section of a report as plain text.
pub fn write_report<W: Write>(out: &mut W, report: &Report) -> Result<()> {
    writeln!(
        out,
        "{} ({}): {} matching trips",
        report.city, report.filter, report.trip_count
    )?;
    writeln!(out, "{SEPARATOR}")?;
    write_time_stats(out, &report.time)?;
    write_station_stats(out, &report.stations)?;
    write_duration_stats(out, &report.durations)?;
    write_user_stats(out, &report.users)?;
    Ok(())
}

pub fn write_time_stats<W: Write>(out: &mut W, stats: &TimeStats) -> Result<()> {
    writeln!(out, "\nThe Most Frequent Times of Travel\n")?;
    let month = stats.month.as_ref().map(|c| Counted {
        value: month_name(c.value).unwrap_or("?"),
        count: c.count,
    });
    line(out, "Most common month", month.as_ref().map(counted))?;
    line(out, "Most common day", stats.weekday.as_ref().map(counted))?;
    let hour = stats.hour.as_ref().map(|c| Counted {
        value: format!("{:02}:00", c.value),
        count: c.count,
    });
    line(out, "Most common start hour", hour.as_ref().map(counted))?;
    Ok(())
}

pub fn write_station_stats<W: Write>(out: &mut W, stats: &StationStats) -> Result<()> {
    writeln!(out, "\nThe Most Popular Stations and Trip\n")?;
    line(
        out,
        "Most commonly used start station",
        stats.start_station.as_ref().map(counted),
    )?;
    line(
        out,
        "Most commonly used end station",
        stats.end_station.as_ref().map(counted),
    )?;
    let trip = stats.trip.as_ref().map(|c| {
        format!(
            "{} -> {} (taken {} times)",
            c.value.start, c.value.end, c.count
        )
    });
    line(out, "Most popular trip", trip)?;
    Ok(())
}

pub fn write_duration_stats<W: Write>(out: &mut W, stats: &DurationStats) -> Result<()> {
    writeln!(out, "\nTrip Duration\n")?;
    let total = (stats.trip_count > 0).then(|| format!("{:.2} days", stats.total_days));
    line(out, "Total travel time", total)?;
    line(
        out,
        "Mean travel time",
        stats.mean_minutes.map(|m| format!("{m:.2} minutes")),
    )?;
    Ok(())
}

pub fn write_user_stats<W: Write>(out: &mut W, stats: &UserStats) -> Result<()> {
    writeln!(out, "\nUser Stats\n")?;

    if stats.user_types.is_empty() {
        line(out, "User types", None::<String>)?;
    } else {
        writeln!(out, "User types:")?;
        for c in &stats.user_types {
            writeln!(out, "  {:<12} {}", c.value, c.count)?;
        }
    }

    match &stats.genders {
        Availability::ColumnMissing => writeln!(out, "No gender data available.")?,
        Availability::NoData => line(out, "Gender", None::<String>)?,
        Availability::Available(genders) => {
            writeln!(out, "Gender:")?;
            for c in genders {
                writeln!(out, "  {:<12} {}", c.value, c.count)?;
            }
        }
    }

    match &stats.birth_years {
        Availability::ColumnMissing => writeln!(out, "No birth year data available.")?,
        Availability::NoData => line(out, "Year of birth", None::<String>)?,
        Availability::Available(b) => {
            writeln!(out, "Earliest year of birth: {}", b.earliest)?;
            writeln!(out, "Most recent year of birth: {}", b.most_recent)?;
            writeln!(out, "Most common year of birth: {}", counted(&b.most_common))?;
        }
    }
    Ok(())
}

/// Writes trips as numbered blocks, starting the numbering at `first_index`.
pub fn write_rows<W: Write>(out: &mut W, rows: &[Trip], first_index: usize) -> Result<()> {
    for (i, trip) in rows.iter().enumerate() {
        writeln!(out, "[{}]", first_index + i)?;
        writeln!(out, "  Start Time:    {}", trip.start_time())?;
        if let Some(end) = &trip.end_time {
            writeln!(out, "  End Time:      {end}")?;
        }
        writeln!(out, "  Trip Duration: {}", trip.duration_secs)?;
        writeln!(out, "  Start Station: {}", trip.start_station)?;
        writeln!(out, "  End Station:   {}", trip.end_station)?;
        writeln!(
            out,
            "  User Type:     {}",
            trip.user_type.as_deref().unwrap_or("-")
        )?;
        if let Some(gender) = &trip.gender {
            writeln!(out, "  Gender:        {gender}")?;
        }
        if let Some(year) = trip.birth_year {
            writeln!(out, "  Birth Year:    {year}")?;
        }
        writeln!(
            out,
            "  Month/Day:     {}/{}",
            month_name(trip.month()).unwrap_or("?"),
            weekday_name(trip.weekday())
        )?;
    }
    Ok(())
}

fn counted<T: Display>(c: &Counted<T>) -> String {
    format!("{} (count: {})", c.value, c.count)
}

fn line<W: Write, T: Display>(out: &mut W, label: &str, value: Option<T>) -> Result<()> {
    match value {
        Some(v) => writeln!(out, "{label}: {v}")?,
        None => writeln!(out, "{label}: {NO_DATA}")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::City;
    use crate::filter::Filter;
    use crate::model::{Columns, Dataset};
    use chrono::NaiveDate;

    fn render(report: &Report) -> String {
        let mut buf = Vec::new();
        write_report(&mut buf, report).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        let report = Report::build(&empty(Columns::all()), Filter::default());
        print_pretty(&report);
    }

    #[test]
    fn test_empty_report_says_no_data() {
        let report = Report::build(&empty(Columns::all()), Filter::default());
        let text = render(&report);

        assert!(text.contains(&format!("Most common month: {NO_DATA}")));
        assert!(text.contains(&format!("Mean travel time: {NO_DATA}")));
        assert!(text.contains(&format!("Year of birth: {NO_DATA}")));
    }

    #[test]
    fn test_missing_columns_are_explicit() {
        let report = Report::build(&empty(Columns::default()), Filter::default());
        let text = render(&report);

        assert!(text.contains("No gender data available."));
        assert!(text.contains("No birth year data available."));
    }

    #[test]
    fn test_report_values() {
        let ts = NaiveDate::from_ymd_opt(2017, 3, 6)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let trips = vec![
            Trip::new(ts, 1_200.0, "Dock A", "Dock B").with_user_type("Subscriber"),
            Trip::new(ts, 600.0, "Dock A", "Dock B").with_user_type("Customer"),
        ];
        let ds = Dataset::new(City::Washington, Columns::default(), trips);
        let text = render(&Report::build(&ds, Filter::default()));

        assert!(text.contains("Washington (month=all, day=all): 2 matching trips"));
        assert!(text.contains("Most common month: March (count: 2)"));
        assert!(text.contains("Most common day: Monday (count: 2)"));
        assert!(text.contains("Most common start hour: 09:00 (count: 2)"));
        assert!(text.contains("Dock A -> Dock B (taken 2 times)"));
        assert!(text.contains("Mean travel time: 15.00 minutes"));
    }

    #[test]
    fn test_json_shape() {
        let report = Report::build(&empty(Columns::default()), Filter::default());
        let mut buf = Vec::new();
        write_json(&mut buf, &report).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value["city"], "chicago");
        assert_eq!(value["filter"]["month"], "all");
        assert_eq!(value["durations"]["mean_minutes"], serde_json::Value::Null);
        assert_eq!(value["users"]["genders"]["status"], "column_missing");
    }

    #[test]
    fn test_write_rows_numbering() {
        let ts = NaiveDate::from_ymd_opt(2017, 1, 1)
            .unwrap()
            .and_hms_opt(0, 7, 57)
            .unwrap();
        let rows = vec![Trip::new(ts, 776.0, "A", "B"), Trip::new(ts, 10.0, "C", "D")];
        let mut buf = Vec::new();
        write_rows(&mut buf, &rows, 5).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("[5]\n"));
        assert!(text.contains("[6]\n"));
        assert!(text.contains("Start Time:    2017-01-01 00:07:57"));
        assert!(text.contains("Month/Day:     January/Sunday"));
    }

    #[test]
    fn test_write_rows_json_uses_weekday_names() {
        let ts = NaiveDate::from_ymd_opt(2017, 5, 3)
            .unwrap()
            .and_hms_opt(16, 45, 0)
            .unwrap();
        let rows = vec![Trip::new(ts, 420.0, "A", "B").with_birth_year(1975)];
        let mut buf = Vec::new();
        write_rows_json(&mut buf, &rows).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value[0]["weekday"], "Wednesday");
        assert_eq!(value[0]["month"], 5);
        assert_eq!(value[0]["hour"], 16);
        assert_eq!(value[0]["birth_year"], 1975);
    }

    fn empty(columns: Columns) -> Dataset {
        Dataset::new(City::Chicago, columns, vec![])
    }
}
