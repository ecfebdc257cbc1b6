use crate::model::Dataset;
use crate::stats::types::DurationStats;
use crate::stats::utility::mean;

const SECS_PER_DAY: f64 = 86_400.0;
const SECS_PER_MINUTE: f64 = 60.0;

/// Total travel time in days and mean trip time in minutes.
#[tracing::instrument(skip_all, fields(trips = dataset.len()))]
pub fn trip_duration_stats(dataset: &Dataset) -> DurationStats {
    let durations: Vec<f64> = dataset.trips.iter().map(|t| t.duration_secs).collect();
    let total_secs: f64 = durations.iter().sum();

    DurationStats {
        trip_count: durations.len(),
        total_secs,
        total_days: total_secs / SECS_PER_DAY,
        mean_minutes: mean(&durations).map(|m| m / SECS_PER_MINUTE),
    }
}
