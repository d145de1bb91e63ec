use super::Coordinate;
use serde::{Deserialize, Serialize};

/// Default multiplicative padding applied when fitting a viewport.
pub const VIEWPORT_PADDING: f64 = 1.4;

// Floor for the deltas so a single-point or very short route still maps to
// a visible span.
const MIN_DELTA: f64 = 0.005;

/// A map viewport: center point plus latitude/longitude spans in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub center: Coordinate,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Region {
    /// Fits a region around `points`: the min/max bounding box with both
    /// deltas scaled by `padding`. Returns `None` for an empty slice.
    pub fn fit(points: &[Coordinate], padding: f64) -> Option<Region> {
        let first = points.first()?;
        let mut min_lat = first.latitude;
        let mut max_lat = first.latitude;
        let mut min_lng = first.longitude;
        let mut max_lng = first.longitude;

        for point in &points[1..] {
            min_lat = min_lat.min(point.latitude);
            max_lat = max_lat.max(point.latitude);
            min_lng = min_lng.min(point.longitude);
            max_lng = max_lng.max(point.longitude);
        }

        Some(Region {
            center: Coordinate::new((min_lat + max_lat) / 2.0, (min_lng + max_lng) / 2.0),
            latitude_delta: ((max_lat - min_lat) * padding).max(MIN_DELTA),
            longitude_delta: ((max_lng - min_lng) * padding).max(MIN_DELTA),
        })
    }

    /// Whether `point` falls inside the region's spans.
    pub fn contains(&self, point: Coordinate) -> bool {
        (point.latitude - self.center.latitude).abs() <= self.latitude_delta / 2.0
            && (point.longitude - self.center.longitude).abs() <= self.longitude_delta / 2.0
    }
}
