//! Supported cities and the CSV source each one is read from.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use crate::error::{LoadError, LoadResult};

/// A city with a bike-share dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum City {
    #[serde(rename = "chicago")]
    Chicago,
    #[serde(rename = "new york city")]
    NewYorkCity,
    #[serde(rename = "washington")]
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lower-case name, as typed at the prompt and used in source config files.
    pub fn key(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// Default file name of the city's dataset inside the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        };
        f.write_str(name)
    }
}

impl FromStr for City {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        City::ALL
            .into_iter()
            .find(|c| c.key() == wanted)
            .ok_or_else(|| LoadError::UnsupportedCity(s.trim().to_string()))
    }
}

/// Maps each city to the CSV file holding its trips.
///
/// Built from a data directory, optionally overridden by a JSON file:
/// ```json
/// {
///   "chicago": "chicago.csv",
///   "new york city": "/data/nyc_2017.csv"
/// }
/// ```
/// Relative paths in the file resolve against the data directory. Cities left
/// out of the file have no source and fail to load.
#[derive(Debug, Clone)]
pub struct DataSources {
    entries: HashMap<City, PathBuf>,
}

impl DataSources {
    /// Every supported city mapped to its default file name under `data_dir`.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        let entries = City::ALL
            .into_iter()
            .map(|c| (c, data_dir.join(c.file_name())))
            .collect();
        Self { entries }
    }

    /// Loads the mapping from a JSON file at `path`.
    pub fn load(path: impl AsRef<Path>, data_dir: impl AsRef<Path>) -> LoadResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Source {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content, data_dir)
    }

    /// Parses a JSON object of `city name -> path`.
    pub fn from_json(content: &str, data_dir: impl AsRef<Path>) -> LoadResult<Self> {
        let raw: HashMap<String, PathBuf> =
            serde_json::from_str(content).map_err(|e| LoadError::Config(e.to_string()))?;

        let data_dir = data_dir.as_ref();
        let mut entries = HashMap::with_capacity(raw.len());
        for (name, file) in raw {
            let city: City = name
                .parse()
                .map_err(|_| LoadError::Config(format!("unknown city '{name}'")))?;
            let file = if file.is_relative() {
                data_dir.join(file)
            } else {
                file
            };
            entries.insert(city, file);
        }

        Ok(Self { entries })
    }

    /// Returns the source path for `city`, if one is configured.
    pub fn path_for(&self, city: City) -> LoadResult<&Path> {
        self.entries
            .get(&city)
            .map(PathBuf::as_path)
            .ok_or_else(|| LoadError::UnsupportedCity(city.to_string()))
    }

    /// Iterates over configured cities in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = (City, &Path)> {
        City::ALL
            .into_iter()
            .filter_map(|c| self.entries.get(&c).map(|p| (c, p.as_path())))
    }
}
