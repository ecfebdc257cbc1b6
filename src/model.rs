//! Trip records and the in-memory dataset they are collected into.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::city::City;
use crate::filter::{Filter, weekday_name};

/// A single row as it appears in a city CSV.
///
/// Unknown columns (such as the unnamed index column) are ignored, and empty
/// cells in optional columns come through as `None`.
#[derive(Debug, Deserialize)]
pub struct RawTrip {
    #[serde(rename = "Start Time")]
    pub(crate) start_time: String,
    #[serde(rename = "End Time", default)]
    pub(crate) end_time: Option<String>,
    #[serde(rename = "Trip Duration")]
    pub(crate) trip_duration: f64,
    #[serde(rename = "Start Station")]
    pub(crate) start_station: String,
    #[serde(rename = "End Station")]
    pub(crate) end_station: String,
    #[serde(rename = "User Type", default)]
    pub(crate) user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    pub(crate) gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    pub(crate) birth_year: Option<f64>,
}

/// One bicycle rental with its calendar fields derived from the start time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trip {
    start_time: NaiveDateTime,
    pub end_time: Option<String>,
    pub duration_secs: f64,
    pub start_station: String,
    pub end_station: String,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,

    month: u32,
    #[serde(serialize_with = "serialize_weekday")]
    weekday: Weekday,
    hour: u32,
}

fn serialize_weekday<S: serde::Serializer>(day: &Weekday, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(weekday_name(*day))
}

impl Trip {
    /// Builds a trip, deriving month, weekday and hour from `start_time`.
    pub fn new(
        start_time: NaiveDateTime,
        duration_secs: f64,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
    ) -> Self {
        Trip {
            start_time,
            end_time: None,
            duration_secs,
            start_station: start_station.into(),
            end_station: end_station.into(),
            user_type: None,
            gender: None,
            birth_year: None,
            month: start_time.month(),
            weekday: start_time.weekday(),
            hour: start_time.hour(),
        }
    }

    pub(crate) fn from_raw(raw: RawTrip, start_time: NaiveDateTime) -> Self {
        let mut trip = Trip::new(
            start_time,
            raw.trip_duration,
            raw.start_station,
            raw.end_station,
        );
        trip.end_time = raw.end_time;
        trip.user_type = raw.user_type.filter(|u| !u.trim().is_empty());
        trip.gender = raw.gender.filter(|g| !g.trim().is_empty());
        trip.birth_year = raw.birth_year.and_then(whole_year);
        trip
    }

    #[cfg(test)]
    pub(crate) fn with_user_type(mut self, user_type: impl Into<String>) -> Self {
        self.user_type = Some(user_type.into());
        self
    }

    #[cfg(test)]
    pub(crate) fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    #[cfg(test)]
    pub(crate) fn with_birth_year(mut self, year: i32) -> Self {
        self.birth_year = Some(year);
        self
    }

    pub fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    /// Calendar month of the start time, 1 = January.
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    /// Hour of day of the start time, 0..=23.
    pub fn hour(&self) -> u32 {
        self.hour
    }
}

/// Birth years are exported as floats ("1992.0"). Cells that are not a whole
/// number in `i32` range (`nan`, `1992.7`) are treated like blank cells.
fn whole_year(year: f64) -> Option<i32> {
    let in_range = year >= f64::from(i32::MIN) && year <= f64::from(i32::MAX);
    (year.is_finite() && year.fract() == 0.0 && in_range).then_some(year as i32)
}

/// Which optional columns the source file carried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Columns {
    pub gender: bool,
    pub birth_year: bool,
}

#[cfg(test)]
impl Columns {
    pub(crate) fn all() -> Self {
        Columns {
            gender: true,
            birth_year: true,
        }
    }
}

/// Trips for one city, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub city: City,
    pub columns: Columns,
    pub trips: Vec<Trip>,
}

impl Dataset {
    pub fn new(city: City, columns: Columns, trips: Vec<Trip>) -> Self {
        Dataset {
            city,
            columns,
            trips,
        }
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Returns a new dataset holding only the trips `filter` matches.
    pub fn filter(&self, filter: &Filter) -> Dataset {
        let trips = self
            .trips
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        Dataset {
            city: self.city,
            columns: self.columns,
            trips,
        }
    }

    /// The `page`-th slice of `size` trips; empty once past the end.
    pub fn page(&self, page: usize, size: usize) -> &[Trip] {
        let start = page.saturating_mul(size).min(self.trips.len());
        let end = start.saturating_add(size).min(self.trips.len());
        &self.trips[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_derived_fields_follow_start_time() {
        // 2017-03-05 was a Sunday
        let trip = Trip::new(ts(2017, 3, 5, 14), 600.0, "A", "B");
        assert_eq!(trip.month(), 3);
        assert_eq!(trip.weekday(), Weekday::Sun);
        assert_eq!(trip.hour(), 14);
    }

    #[test]
    fn test_from_raw_drops_blank_optionals() {
        let raw = RawTrip {
            start_time: "2017-01-02 09:00:00".into(),
            end_time: Some("2017-01-02 09:10:00".into()),
            trip_duration: 600.0,
            start_station: "A".into(),
            end_station: "B".into(),
            user_type: Some("  ".into()),
            gender: Some(String::new()),
            birth_year: Some(1988.0),
        };
        let trip = Trip::from_raw(raw, ts(2017, 1, 2, 9));

        assert_eq!(trip.user_type, None);
        assert_eq!(trip.gender, None);
        assert_eq!(trip.birth_year, Some(1988));
        assert_eq!(trip.end_time.as_deref(), Some("2017-01-02 09:10:00"));
    }

    #[test]
    fn test_from_raw_skips_unusable_birth_years() {
        for cell in [f64::NAN, f64::INFINITY, 1992.7, 1e12] {
            let trip = Trip::from_raw(raw_with_birth_year(Some(cell)), ts(2017, 1, 2, 9));
            assert_eq!(trip.birth_year, None, "{cell}");
        }
        let trip = Trip::from_raw(raw_with_birth_year(Some(1990.0)), ts(2017, 1, 2, 9));
        assert_eq!(trip.birth_year, Some(1990));
    }

    #[test]
    fn test_page_bounds() {
        let trips = (0..12)
            .map(|i| Trip::new(ts(2017, 1, 2, i), 60.0, "A", "B"))
            .collect();
        let ds = Dataset::new(City::Chicago, Columns::all(), trips);

        assert_eq!(ds.page(0, 5).len(), 5);
        assert_eq!(ds.page(2, 5).len(), 2);
        assert!(ds.page(3, 5).is_empty());
        assert!(ds.page(usize::MAX, 5).is_empty());
        assert_eq!(ds.page(1, 5)[0].hour(), 5);
    }

    fn raw_with_birth_year(birth_year: Option<f64>) -> RawTrip {
        RawTrip {
            start_time: "2017-01-02 09:00:00".into(),
            end_time: None,
            trip_duration: 60.0,
            start_station: "A".into(),
            end_station: "B".into(),
            user_type: Some("Subscriber".into()),
            gender: None,
            birth_year,
        }
    }

    fn ts(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }
}
