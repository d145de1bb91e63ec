use super::distance::haversine_m;
use super::Coordinate;
use serde::{Deserialize, Serialize};

/// Spacing between intermediate waypoints submitted for safety analysis.
pub const DEFAULT_SAMPLE_INTERVAL_M: f64 = 200.0;

/// A sampled point along a route path, used only as safety-scoring input.
/// Distinct from a turn-by-turn navigation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub name: String,
    pub position: Coordinate,
    pub is_start: bool,
    pub is_end: bool,
}

impl Waypoint {
    fn start(position: Coordinate) -> Self {
        Self {
            name: "Start".to_string(),
            position,
            is_start: true,
            is_end: false,
        }
    }

    fn intermediate(n: usize, position: Coordinate) -> Self {
        Self {
            name: format!("Waypoint {}", n),
            position,
            is_start: false,
            is_end: false,
        }
    }

    fn end(position: Coordinate) -> Self {
        Self {
            name: "End".to_string(),
            position,
            is_start: false,
            is_end: true,
        }
    }

    /// Wire label for the safety payload's `Type` field.
    pub fn kind(&self) -> &'static str {
        if self.is_start {
            "start"
        } else if self.is_end {
            "end"
        } else {
            "waypoint"
        }
    }
}

/// Walks a decoded path and emits evenly spaced waypoints.
///
/// The start and end vertices are always emitted. Between them, segment
/// distances accumulate and an intermediate waypoint fires each time the
/// accumulator crosses `interval_m`, resetting afterwards. Paths with fewer
/// than two points yield an empty sequence; the caller must handle that
/// degenerate case.
pub fn sample_waypoints(path: &[Coordinate], interval_m: f64) -> Vec<Waypoint> {
    let [first, .., last] = path else {
        return Vec::new();
    };

    let mut waypoints = vec![Waypoint::start(*first)];
    let mut accumulated = 0.0;
    let mut counter = 1;

    for pair in path.windows(2) {
        accumulated += haversine_m(pair[0], pair[1]);
        if accumulated >= interval_m {
            waypoints.push(Waypoint::intermediate(counter, pair[1]));
            counter += 1;
            accumulated = 0.0;
        }
    }

    waypoints.push(Waypoint::end(*last));
    waypoints
}
