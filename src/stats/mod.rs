//! Descriptive statistics over a filtered trip dataset.
//!
//! Each routine is a read-only pass over the same [`Dataset`](crate::model::Dataset)
//! and reports "no data" (`None`, [`Availability::NoData`]) instead of failing
//! on an empty selection. Modes break ties by taking the smallest key.

pub mod duration;
pub mod station;
pub mod time;
pub mod types;
pub mod user;
pub mod utility;

pub use duration::trip_duration_stats;
pub use station::station_stats;
pub use time::time_stats;
pub use types::{
    Availability, BirthYearStats, DurationStats, Report, StationPair, StationStats, TimeStats,
    UserStats,
};
pub use user::user_stats;
pub use utility::Counted;

use crate::filter::Filter;
use crate::model::Dataset;

impl Report {
    /// Runs every statistic group over `dataset`.
    pub fn build(dataset: &Dataset, filter: Filter) -> Self {
        Report {
            city: dataset.city,
            filter,
            trip_count: dataset.len(),
            time: time_stats(dataset),
            stations: station_stats(dataset),
            durations: trip_duration_stats(dataset),
            users: user_stats(dataset),
        }
    }
}
