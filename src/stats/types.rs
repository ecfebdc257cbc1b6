//! Result types produced by the statistic routines.

use serde::Serialize;

use crate::city::City;
use crate::filter::Filter;
use crate::stats::utility::Counted;

/// Outcome of a statistic over an optional column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Availability<T> {
    /// The city's source has no such column.
    ColumnMissing,
    /// The column exists but the selection holds no values for it.
    NoData,
    Available(T),
}

impl<T> Availability<T> {
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Availability::Available(v),
            None => Availability::NoData,
        }
    }
}

/// Most frequent times of travel. `None` means no trips in the selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeStats {
    /// Calendar month number, 1 = January.
    pub month: Option<Counted<u32>>,
    pub weekday: Option<Counted<String>>,
    pub hour: Option<Counted<u32>>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct StationPair {
    pub start: String,
    pub end: String,
}

/// Most popular stations and trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationStats {
    pub start_station: Option<Counted<String>>,
    pub end_station: Option<Counted<String>>,
    pub trip: Option<Counted<StationPair>>,
}

/// Total and average trip duration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub trip_count: usize,
    pub total_secs: f64,
    pub total_days: f64,
    pub mean_minutes: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: Counted<i32>,
}

/// Rider demographics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    /// Empty when the selection has no user types.
    pub user_types: Vec<Counted<String>>,
    pub genders: Availability<Vec<Counted<String>>>,
    pub birth_years: Availability<BirthYearStats>,
}

/// Everything computed for one (city, filter) selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub city: City,
    pub filter: Filter,
    pub trip_count: usize,
    pub time: TimeStats,
    pub stations: StationStats,
    pub durations: DurationStats,
    pub users: UserStats,
}
