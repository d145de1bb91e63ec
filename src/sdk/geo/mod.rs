pub mod distance;
pub mod polyline;
pub mod region;
pub mod sample;

pub use distance::haversine_m;
pub use region::Region;
pub use sample::{sample_waypoints, Waypoint, DEFAULT_SAMPLE_INTERVAL_M};

use serde::{Deserialize, Serialize};

/// A WGS84 point in degrees. Never mutated after creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}
