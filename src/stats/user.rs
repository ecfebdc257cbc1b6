use crate::model::Dataset;
use crate::stats::types::{Availability, BirthYearStats, UserStats};
use crate::stats::utility::{mode, ranked};

/// Counts by user type and gender, plus birth-year extremes and mode.
///
/// Gender and birth year report [`Availability::ColumnMissing`] for cities
/// whose export lacks them. Blank cells are skipped.
#[tracing::instrument(skip_all, fields(trips = dataset.len()))]
pub fn user_stats(dataset: &Dataset) -> UserStats {
    let trips = &dataset.trips;

    let user_types = ranked(trips.iter().filter_map(|t| t.user_type.clone()));

    let genders = if dataset.columns.gender {
        let counts = ranked(trips.iter().filter_map(|t| t.gender.clone()));
        Availability::from_option((!counts.is_empty()).then_some(counts))
    } else {
        Availability::ColumnMissing
    };

    let birth_years = if dataset.columns.birth_year {
        let years: Vec<i32> = trips.iter().filter_map(|t| t.birth_year).collect();
        Availability::from_option(birth_year_stats(&years))
    } else {
        Availability::ColumnMissing
    };

    UserStats {
        user_types,
        genders,
        birth_years,
    }
}

fn birth_year_stats(years: &[i32]) -> Option<BirthYearStats> {
    Some(BirthYearStats {
        earliest: *years.iter().min()?,
        most_recent: *years.iter().max()?,
        most_common: mode(years.iter().copied())?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::City;
    use crate::model::{Columns, Trip};
    use crate::stats::utility::Counted;
    use chrono::NaiveDate;

    #[test]
    fn test_full_columns() {
        let trips = vec![
            trip().with_user_type("Subscriber").with_gender("Male").with_birth_year(1980),
            trip().with_user_type("Customer").with_gender("Female").with_birth_year(1992),
            trip().with_user_type("Subscriber").with_gender("Male").with_birth_year(1992),
            trip().with_user_type("Subscriber"),
        ];
        let stats = user_stats(&Dataset::new(City::Chicago, Columns::all(), trips));

        assert_eq!(
            stats.user_types,
            vec![counted("Subscriber", 3), counted("Customer", 1)]
        );
        assert_eq!(
            stats.genders,
            Availability::Available(vec![counted("Male", 2), counted("Female", 1)])
        );
        assert_eq!(
            stats.birth_years,
            Availability::Available(BirthYearStats {
                earliest: 1980,
                most_recent: 1992,
                most_common: Counted {
                    value: 1992,
                    count: 2
                },
            })
        );
    }

    #[test]
    fn test_missing_columns_reported() {
        let trips = vec![trip().with_user_type("Customer")];
        let stats = user_stats(&Dataset::new(City::Washington, Columns::default(), trips));

        assert_eq!(stats.user_types, vec![counted("Customer", 1)]);
        assert_eq!(stats.genders, Availability::ColumnMissing);
        assert_eq!(stats.birth_years, Availability::ColumnMissing);
    }

    #[test]
    fn test_empty_selection_with_columns() {
        let stats = user_stats(&Dataset::new(City::NewYorkCity, Columns::all(), vec![]));

        assert!(stats.user_types.is_empty());
        assert_eq!(stats.genders, Availability::NoData);
        assert_eq!(stats.birth_years, Availability::NoData);
    }

    #[test]
    fn test_birth_year_tie_prefers_earliest() {
        let trips = vec![trip().with_birth_year(1999), trip().with_birth_year(1970)];
        let stats = user_stats(&Dataset::new(City::Chicago, Columns::all(), trips));

        match stats.birth_years {
            Availability::Available(b) => assert_eq!(b.most_common.value, 1970),
            other => panic!("unexpected {other:?}"),
        }
    }

    fn counted(value: &str, count: usize) -> Counted<String> {
        Counted {
            value: value.to_string(),
            count,
        }
    }

    fn trip() -> Trip {
        let ts = NaiveDate::from_ymd_opt(2017, 6, 1)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap();
        Trip::new(ts, 900.0, "A", "B")
    }
}
