//! Survey instance: location registry, depot, forecast, distances.

use crate::geo::{self, Coord};
use crate::weather::{WeatherTable, Wind};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Fatal errors while assembling a survey instance.
#[derive(Debug, Error)]
pub enum ProblemError {
    #[error("failed to read location file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed location record: {0}")]
    Csv(#[from] csv::Error),
    #[error("depot code {0:?} not present in the location file")]
    MissingDepot(String),
    #[error("duplicate location code {0:?}")]
    DuplicateCode(String),
    #[error("at least one non-depot location is required")]
    NoSurveyLocations,
}

/// One record of the location input file.
#[derive(Debug, Deserialize)]
struct LocationRecord {
    #[serde(alias = "cep")]
    code: String,
    latitude: f64,
    longitude: f64,
}

/// A survey location with its stable integer identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: usize,
    pub code: String,
    pub coord: Coord,
}

/// A complete survey instance.
///
/// Identifiers are indices into `locations`; the depot keeps its own index
/// and never appears among the survey identifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyProblem {
    pub locations: Vec<Location>,
    pub depot_index: usize,
    pub weather: WeatherTable,
    distance_matrix: Vec<Vec<f64>>,
}

impl SurveyProblem {
    /// Build an instance from codes and coordinates, resolving the depot by
    /// its code.
    pub fn new(
        entries: Vec<(String, Coord)>,
        depot_code: &str,
        weather: WeatherTable,
    ) -> Result<Self, ProblemError> {
        let mut locations = Vec::with_capacity(entries.len());
        let mut depot_index = None;

        for (id, (code, coord)) in entries.into_iter().enumerate() {
            if locations.iter().any(|l: &Location| l.code == code) {
                return Err(ProblemError::DuplicateCode(code));
            }
            if code == depot_code {
                depot_index = Some(id);
            }
            locations.push(Location { id, code, coord });
        }

        let depot_index =
            depot_index.ok_or_else(|| ProblemError::MissingDepot(depot_code.to_string()))?;
        if locations.len() < 2 {
            return Err(ProblemError::NoSurveyLocations);
        }

        let distance_matrix = Self::compute_distance_matrix(&locations);

        Ok(SurveyProblem {
            locations,
            depot_index,
            weather,
            distance_matrix,
        })
    }

    /// Load an instance from a CSV file with `cep,latitude,longitude` rows.
    pub fn from_csv_file<P: AsRef<Path>>(
        path: P,
        depot_code: &str,
        weather: WeatherTable,
    ) -> Result<Self, ProblemError> {
        let file = std::fs::File::open(path)?;
        let mut reader = csv::Reader::from_reader(file);
        let mut entries = Vec::new();

        for record in reader.deserialize() {
            let record: LocationRecord = record?;
            entries.push((record.code, Coord::new(record.latitude, record.longitude)));
        }

        SurveyProblem::new(entries, depot_code, weather)
    }

    /// Great-circle distance in km between two identifiers.
    pub fn get_distance(&self, from: usize, to: usize) -> f64 {
        self.distance_matrix[from][to]
    }

    /// Coordinate of an identifier.
    pub fn coord(&self, id: usize) -> Coord {
        self.locations[id].coord
    }

    /// Human-readable code of an identifier.
    pub fn code(&self, id: usize) -> &str {
        &self.locations[id].code
    }

    /// The depot identifier.
    pub fn depot_id(&self) -> usize {
        self.depot_index
    }

    /// All identifiers except the depot, in registration order.
    pub fn survey_ids(&self) -> Vec<usize> {
        (0..self.locations.len())
            .filter(|&id| id != self.depot_index)
            .collect()
    }

    /// Number of locations to visit, excluding the depot.
    pub fn survey_count(&self) -> usize {
        self.locations.len() - 1
    }

    /// Wind at the given simulated day and hour.
    pub fn wind_at(&self, day: u32, hour: u32) -> Wind {
        self.weather.wind_at(day, hour)
    }

    /// Map a route of identifiers to location codes.
    pub fn route_codes(&self, route: &[usize]) -> Vec<String> {
        route.iter().map(|&id| self.code(id).to_string()).collect()
    }

    fn compute_distance_matrix(locations: &[Location]) -> Vec<Vec<f64>> {
        let n = locations.len();
        let mut matrix = vec![vec![0.0; n]; n];

        for i in 0..n {
            for j in 0..n {
                if i != j {
                    matrix[i][j] = geo::distance(locations[i].coord, locations[j].coord);
                }
            }
        }

        matrix
    }
}
