//! Reads a city's trip CSV into a [`Dataset`] and applies a [`Filter`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::city::{City, DataSources};
use crate::error::{LoadError, LoadResult};
use crate::filter::Filter;
use crate::model::{Columns, Dataset, RawTrip, Trip};
use crate::parser::parse_timestamp;

const REQUIRED_COLUMNS: &[&str] = &[
    "Start Time",
    "Trip Duration",
    "Start Station",
    "End Station",
    "User Type",
];
const GENDER: &str = "Gender";
const BIRTH_YEAR: &str = "Birth Year";

/// Loads the dataset mapped to `city` and keeps only the rows `filter` selects.
///
/// # Errors
///
/// [`LoadError::InvalidSelector`] when the filter names an unsupported month,
/// [`LoadError::UnsupportedCity`] when no source is mapped for the city, and
/// [`LoadError::Source`], [`LoadError::MissingColumn`] or
/// [`LoadError::Malformed`] when the file cannot be read or parsed.
#[tracing::instrument(skip_all, fields(city = %city, filter = %filter))]
pub fn load_data(sources: &DataSources, city: City, filter: &Filter) -> LoadResult<Dataset> {
    filter.validate()?;
    let path = sources.path_for(city)?;
    let full = load_file(path, city)?;
    let filtered = full.filter(filter);

    info!(
        total = full.len(),
        matching = filtered.len(),
        "Dataset loaded and filtered"
    );
    Ok(filtered)
}

/// Reads every trip in the CSV at `path`.
pub fn load_file(path: &Path, city: City) -> LoadResult<Dataset> {
    debug!(path = %path.display(), "Opening trip data");
    let file = File::open(path).map_err(|source| LoadError::Source {
        path: path.to_path_buf(),
        source,
    })?;
    read_trips(file, city, path)
}

/// Reads every trip from an arbitrary CSV stream.
pub fn load_from_reader<R: Read>(reader: R, city: City) -> LoadResult<Dataset> {
    read_trips(reader, city, Path::new("<input>"))
}

fn read_trips<R: Read>(reader: R, city: City, path: &Path) -> LoadResult<Dataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().map_err(|e| malformed(path, &e))?.clone();
    let has = |name: &str| headers.iter().any(|h| h == name);

    if let Some(missing) = REQUIRED_COLUMNS.iter().find(|&&c| !has(c)) {
        return Err(LoadError::MissingColumn {
            path: path.to_path_buf(),
            column: (*missing).to_string(),
        });
    }

    let columns = Columns {
        gender: has(GENDER),
        birth_year: has(BIRTH_YEAR),
    };
    debug!(?columns, "Optional columns detected");

    let mut trips = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| malformed(path, &e))?;
        let line = record.position().map_or(0, |p| p.line());

        let raw: RawTrip = record
            .deserialize(Some(&headers))
            .map_err(|e| malformed(path, &e))?;
        let start = parse_timestamp(&raw.start_time).map_err(|e| LoadError::Malformed {
            path: path.to_path_buf(),
            line,
            reason: e.to_string(),
        })?;

        trips.push(Trip::from_raw(raw, start));
    }

    Ok(Dataset::new(city, columns, trips))
}

fn malformed(path: &Path, err: &csv::Error) -> LoadError {
    LoadError::Malformed {
        path: path.to_path_buf(),
        line: err.position().map_or(0, |p| p.line()),
        reason: err.to_string(),
    }
}
