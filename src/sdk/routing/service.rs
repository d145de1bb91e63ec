use super::route::FetchedRoute;
use crate::sdk::geo::Coordinate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

/// A destination candidate produced by place autocomplete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacePrediction {
    pub description: String,
    pub place_id: String,
}

/// Travel mode forwarded to the directions provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Walking,
    Driving,
    Bicycling,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Walking => "walking",
            TravelMode::Driving => "driving",
            TravelMode::Bicycling => "bicycling",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait RoutingProvider: Send + Sync {
    /// Reverse-geocodes a position into a human-readable address.
    fn reverse_geocode(&self, position: Coordinate) -> Result<String, Box<dyn Error>>;

    /// Autocompletes free-form destination text into place predictions.
    fn autocomplete(&self, query: &str) -> Result<Vec<PlacePrediction>, Box<dyn Error>>;

    /// Resolves a place id to its coordinate.
    fn place_details(&self, place_id: &str) -> Result<Coordinate, Box<dyn Error>>;

    /// Fetches alternative routes between two points.
    fn fetch_routes(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TravelMode,
    ) -> Result<Vec<FetchedRoute>, Box<dyn Error>>;
}
