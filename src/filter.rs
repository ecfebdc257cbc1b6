//! Month and weekday selectors used to narrow a dataset.

use std::fmt;

use chrono::Weekday;
use serde::Serialize;

use crate::error::{LoadError, LoadResult};
use crate::model::Trip;

/// Months covered by the city exports, in calendar order.
pub const MONTH_NAMES: [&str; 6] = ["January", "February", "March", "April", "May", "June"];

/// Weekdays in English, Monday first.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Full English name of a weekday, independent of the process locale.
pub fn weekday_name(day: Weekday) -> &'static str {
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

/// English name of a calendar month number (1 = January).
pub fn month_name(month: u32) -> Option<&'static str> {
    const ALL: [&str; 12] = [
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
    ALL.get(month.checked_sub(1)? as usize).copied()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFilter {
    #[default]
    All,
    /// Calendar month number within the supported range.
    Only(u32),
}

impl MonthFilter {
    /// Accepts a supported month name or `all`, ignoring case.
    pub fn parse(text: &str) -> LoadResult<Self> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("all") {
            return Ok(MonthFilter::All);
        }
        MONTH_NAMES
            .iter()
            .position(|m| m.eq_ignore_ascii_case(text))
            .map(|i| MonthFilter::Only(i as u32 + 1))
            .ok_or_else(|| LoadError::InvalidSelector(format!("unsupported month '{text}'")))
    }

    /// Accepts a month number in `1..=6`.
    pub fn from_number(month: u32) -> LoadResult<Self> {
        if (1..=MONTH_NAMES.len() as u32).contains(&month) {
            Ok(MonthFilter::Only(month))
        } else {
            Err(LoadError::InvalidSelector(format!(
                "month {month} is outside 1..={}",
                MONTH_NAMES.len()
            )))
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str("all"),
            MonthFilter::Only(m) => f.write_str(month_name(*m).unwrap_or("?")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayFilter {
    #[default]
    All,
    Only(Weekday),
}

impl DayFilter {
    /// Accepts a full weekday name or `all`, ignoring case.
    pub fn parse(text: &str) -> LoadResult<Self> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("all") {
            return Ok(DayFilter::All);
        }
        WEEKDAYS
            .into_iter()
            .find(|d| weekday_name(*d).eq_ignore_ascii_case(text))
            .map(DayFilter::Only)
            .ok_or_else(|| LoadError::InvalidSelector(format!("unsupported day '{text}'")))
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::All => f.write_str("all"),
            DayFilter::Only(d) => f.write_str(weekday_name(*d)),
        }
    }
}

/// A (month, day) selector; either side may be `All`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Filter {
    #[serde(serialize_with = "serialize_display")]
    pub month: MonthFilter,
    #[serde(serialize_with = "serialize_display")]
    pub day: DayFilter,
}

fn serialize_display<T: fmt::Display, S: serde::Serializer>(
    value: &T,
    s: S,
) -> Result<S::Ok, S::Error> {
    s.collect_str(value)
}

impl Filter {
    pub fn new(month: MonthFilter, day: DayFilter) -> Self {
        Filter { month, day }
    }

    /// Parses both selectors from user text, e.g. `("march", "all")`.
    pub fn parse(month: &str, day: &str) -> LoadResult<Self> {
        Ok(Filter {
            month: MonthFilter::parse(month)?,
            day: DayFilter::parse(day)?,
        })
    }

    /// Rejects month numbers outside the supported range, which can only
    /// arrive through a hand-built `MonthFilter::Only`.
    pub fn validate(&self) -> LoadResult<()> {
        if let MonthFilter::Only(m) = self.month {
            MonthFilter::from_number(m)?;
        }
        Ok(())
    }

    pub fn matches(&self, trip: &Trip) -> bool {
        let month_ok = match self.month {
            MonthFilter::All => true,
            MonthFilter::Only(m) => trip.month() == m,
        };
        let day_ok = match self.day {
            DayFilter::All => true,
            DayFilter::Only(d) => trip.weekday() == d,
        };
        month_ok && day_ok
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "month={}, day={}", self.month, self.day)
    }
}
