use crate::model::Dataset;
use crate::stats::types::{StationPair, StationStats};
use crate::stats::utility::mode;

/// Most used start station, end station, and start/end combination.
///
/// Ties resolve to the alphabetically first station (or pair).
#[tracing::instrument(skip_all, fields(trips = dataset.len()))]
pub fn station_stats(dataset: &Dataset) -> StationStats {
    let trips = &dataset.trips;

    StationStats {
        start_station: mode(trips.iter().map(|t| t.start_station.clone())),
        end_station: mode(trips.iter().map(|t| t.end_station.clone())),
        trip: mode(trips.iter().map(|t| StationPair {
            start: t.start_station.clone(),
            end: t.end_station.clone(),
        })),
    }
}
