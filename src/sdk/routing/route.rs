use crate::sdk::geo::{polyline, sample_waypoints, Coordinate, Waypoint};
use serde::Serialize;

/// One alternative as returned by the directions provider, polyline still
/// encoded.
#[derive(Debug, Clone)]
pub struct FetchedRoute {
    pub summary: String,
    pub polyline: String,
    pub distance_text: String,
    pub distance_meters: u32,
    pub duration_text: String,
    pub duration_seconds: u32,
}

/// A fully prepared route alternative: decoded path plus the waypoints
/// sampled for safety analysis. Built once per directions response and
/// immutable afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct RouteCandidate {
    pub index: usize,
    pub summary: String,
    pub distance_text: String,
    pub distance_meters: u32,
    pub duration_text: String,
    pub duration_seconds: u32,
    pub path: Vec<Coordinate>,
    pub waypoints: Vec<Waypoint>,
}

impl RouteCandidate {
    /// Decodes the fetched route's polyline and samples waypoints every
    /// `interval_m` meters.
    pub fn prepare(index: usize, fetched: FetchedRoute, interval_m: f64) -> Self {
        let path = polyline::decode(&fetched.polyline);
        let waypoints = sample_waypoints(&path, interval_m);
        Self {
            index,
            summary: fetched.summary,
            distance_text: fetched.distance_text,
            distance_meters: fetched.distance_meters,
            duration_text: fetched.duration_text,
            duration_seconds: fetched.duration_seconds,
            path,
            waypoints,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetched(polyline: String) -> FetchedRoute {
        FetchedRoute {
            summary: "SV Road".to_string(),
            polyline,
            distance_text: "18.2 km".to_string(),
            distance_meters: 18_200,
            duration_text: "41 mins".to_string(),
            duration_seconds: 2_460,
        }
    }

    #[test]
    fn prepare_decodes_and_samples() {
        let path: Vec<Coordinate> = (0..12)
            .map(|i| Coordinate::new(19.0 + i as f64 * 0.001, 72.8))
            .collect();
        let candidate = RouteCandidate::prepare(1, fetched(polyline::encode(&path)), 200.0);

        assert_eq!(candidate.index, 1);
        assert_eq!(candidate.path.len(), 12);
        assert!(candidate.waypoints.len() >= 2);
        assert!(candidate.waypoints.first().unwrap().is_start);
        assert!(candidate.waypoints.last().unwrap().is_end);
    }

    #[test]
    fn empty_polyline_yields_empty_path_and_waypoints() {
        let candidate = RouteCandidate::prepare(0, fetched(String::new()), 200.0);
        assert!(candidate.path.is_empty());
        assert!(candidate.waypoints.is_empty());
    }
}
