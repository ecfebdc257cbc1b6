use crate::filter::{WEEKDAYS, weekday_name};
use crate::model::Dataset;
use crate::stats::types::TimeStats;
use crate::stats::utility::{Counted, mode};

/// Most common month, weekday and start hour.
///
/// Weekday ties resolve to the earliest day of the week, Monday first.
#[tracing::instrument(skip_all, fields(trips = dataset.len()))]
pub fn time_stats(dataset: &Dataset) -> TimeStats {
    let trips = &dataset.trips;

    let month = mode(trips.iter().map(|t| t.month()));
    let weekday = mode(trips.iter().map(|t| t.weekday().num_days_from_monday())).map(|c| Counted {
        value: weekday_name(WEEKDAYS[c.value as usize]).to_string(),
        count: c.count,
    });
    let hour = mode(trips.iter().map(|t| t.hour()));

    TimeStats {
        month,
        weekday,
        hour,
    }
}
