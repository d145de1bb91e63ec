use crate::sdk::geo::Waypoint;
use crate::sdk::routing::RouteCandidate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Neutral score (out of 10) assigned when the safety service is
/// unreachable or returns something unusable.
pub const DEFAULT_SAFETY_SCORE: f64 = 5.0;

// --- Request payload ---

#[derive(Serialize, Debug)]
pub struct ScoringRequest {
    pub routes: Vec<Vec<WirePoint>>,
}

#[derive(Serialize, Debug)]
pub struct WirePoint {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub kind: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&Waypoint> for WirePoint {
    fn from(waypoint: &Waypoint) -> Self {
        Self {
            name: waypoint.name.clone(),
            kind: waypoint.kind().to_string(),
            latitude: waypoint.position.latitude,
            longitude: waypoint.position.longitude,
        }
    }
}

impl ScoringRequest {
    pub fn from_routes(routes: &[RouteCandidate]) -> Self {
        Self {
            routes: routes
                .iter()
                .map(|route| route.waypoints.iter().map(WirePoint::from).collect())
                .collect(),
        }
    }
}

// --- Response union ---
//
// The endpoint answers in one of two shapes. Both collapse into `ScoreMap`
// right here at the boundary; nothing downstream branches on shape again.

#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum ScoringResponse {
    Recommended {
        #[serde(rename = "recommendedRoute")]
        recommended_route: RecommendedRoute,
        #[serde(rename = "alternativeRoutes", default)]
        alternative_routes: Vec<AlternativeRoute>,
    },
    Parallel {
        routes: Vec<ParallelScore>,
    },
}

#[derive(Deserialize, Debug)]
pub struct RecommendedRoute {
    #[serde(rename = "routeIndex")]
    pub route_index: i64,
    #[serde(rename = "overallSafety")]
    pub overall_safety: f64,
    #[serde(rename = "safetyAnalysisExplanation")]
    pub safety_analysis_explanation: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct AlternativeRoute {
    #[serde(rename = "routeIndex")]
    pub route_index: i64,
    #[serde(rename = "overallSafety")]
    pub overall_safety: f64,
}

#[derive(Deserialize, Debug)]
pub struct ParallelScore {
    #[serde(rename = "overallSafety")]
    pub overall_safety: f64,
}

/// Canonical per-route safety scores. Rebuilt whole on every route fetch so
/// stale scores cannot outlive the route list they were computed for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreMap {
    pub scores: BTreeMap<usize, f64>,
    /// Externally suggested route index, if the response named one. May be
    /// out of range for the current route list; selection ignores it then.
    pub recommended: Option<usize>,
    pub explanation: Option<String>,
}

impl ScoreMap {
    /// All-default scores for `route_count` routes.
    pub fn fallback(route_count: usize) -> Self {
        Self {
            scores: (0..route_count)
                .map(|index| (index, DEFAULT_SAFETY_SCORE))
                .collect(),
            recommended: None,
            explanation: None,
        }
    }

    /// Collapses a decoded response into the canonical mapping. Missing
    /// indices are back-filled with the default score and indices beyond the
    /// route list are dropped, so the key set always equals
    /// `0..route_count`.
    pub fn from_response(response: ScoringResponse, route_count: usize) -> Self {
        let mut map = match response {
            ScoringResponse::Recommended {
                recommended_route,
                alternative_routes,
            } => {
                let mut scores = BTreeMap::new();
                let mut recommended = None;
                match usize::try_from(recommended_route.route_index) {
                    Ok(index) => {
                        scores.insert(index, recommended_route.overall_safety);
                        recommended = Some(index);
                    }
                    Err(_) => log::debug!(
                        "Dropping negative recommended route index {}",
                        recommended_route.route_index
                    ),
                }
                for alternative in alternative_routes {
                    if let Ok(index) = usize::try_from(alternative.route_index) {
                        scores.entry(index).or_insert(alternative.overall_safety);
                    }
                }
                Self {
                    scores,
                    recommended,
                    explanation: recommended_route.safety_analysis_explanation,
                }
            }
            ScoringResponse::Parallel { routes } => Self {
                scores: routes
                    .iter()
                    .enumerate()
                    .map(|(index, route)| (index, route.overall_safety))
                    .collect(),
                recommended: None,
                explanation: None,
            },
        };

        map.scores.retain(|index, _| *index < route_count);
        for index in 0..route_count {
            map.scores.entry(index).or_insert(DEFAULT_SAFETY_SCORE);
        }
        map
    }

    /// Score for a route index, defaulting when absent.
    pub fn get(&self, index: usize) -> f64 {
        self.scores.get(&index).copied().unwrap_or(DEFAULT_SAFETY_SCORE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn recommended_shape_decodes_to_score_map() {
        let body = r#"{
            "recommendedRoute": {
                "routeIndex": 1,
                "overallSafety": 8.2,
                "safetyAnalysisExplanation": "well-lit arterial road"
            },
            "alternativeRoutes": [
                { "routeIndex": 0, "overallSafety": 6.1 }
            ]
        }"#;
        let response: ScoringResponse = serde_json::from_str(body).unwrap();
        let map = ScoreMap::from_response(response, 2);

        assert_eq!(map.recommended, Some(1));
        assert_abs_diff_eq!(map.get(1), 8.2);
        assert_abs_diff_eq!(map.get(0), 6.1);
        assert_eq!(map.explanation.as_deref(), Some("well-lit arterial road"));
    }

    #[test]
    fn parallel_shape_decodes_to_score_map() {
        let body = r#"{ "routes": [ { "overallSafety": 7.5 }, { "overallSafety": 4.0 } ] }"#;
        let response: ScoringResponse = serde_json::from_str(body).unwrap();
        let map = ScoreMap::from_response(response, 2);

        assert_eq!(map.recommended, None);
        assert_abs_diff_eq!(map.get(0), 7.5);
        assert_abs_diff_eq!(map.get(1), 4.0);
    }

    #[test]
    fn missing_indices_are_backfilled_with_default() {
        let body = r#"{
            "recommendedRoute": { "routeIndex": 0, "overallSafety": 9.1 }
        }"#;
        let response: ScoringResponse = serde_json::from_str(body).unwrap();
        let map = ScoreMap::from_response(response, 3);

        assert_eq!(map.scores.len(), 3);
        assert_abs_diff_eq!(map.get(0), 9.1);
        assert_abs_diff_eq!(map.get(1), DEFAULT_SAFETY_SCORE);
        assert_abs_diff_eq!(map.get(2), DEFAULT_SAFETY_SCORE);
    }

    #[test]
    fn out_of_range_score_entries_are_dropped_but_recommendation_survives() {
        let body = r#"{
            "recommendedRoute": { "routeIndex": 7, "overallSafety": 9.9 }
        }"#;
        let response: ScoringResponse = serde_json::from_str(body).unwrap();
        let map = ScoreMap::from_response(response, 2);

        assert_eq!(map.scores.len(), 2);
        assert!(map.scores.keys().all(|&index| index < 2));
        assert_eq!(map.recommended, Some(7));
    }

    #[test]
    fn negative_recommended_index_is_dropped() {
        let body = r#"{
            "recommendedRoute": { "routeIndex": -1, "overallSafety": 9.9 }
        }"#;
        let response: ScoringResponse = serde_json::from_str(body).unwrap();
        let map = ScoreMap::from_response(response, 2);
        assert_eq!(map.recommended, None);
    }

    #[test]
    fn fallback_covers_every_route() {
        let map = ScoreMap::fallback(2);
        assert_abs_diff_eq!(map.get(0), 5.0);
        assert_abs_diff_eq!(map.get(1), 5.0);
        assert_eq!(map.scores.len(), 2);
        assert_eq!(map.recommended, None);
    }

    #[test]
    fn wire_points_carry_name_type_and_position() {
        use crate::sdk::geo::{sample_waypoints, Coordinate};

        let path = vec![
            Coordinate::new(19.0760, 72.8777),
            Coordinate::new(19.0860, 72.8877),
        ];
        let waypoints = sample_waypoints(&path, 5_000.0);
        let points: Vec<WirePoint> = waypoints.iter().map(WirePoint::from).collect();

        let json = serde_json::to_value(&points).unwrap();
        assert_eq!(json[0]["Name"], "Start");
        assert_eq!(json[0]["Type"], "start");
        assert_eq!(json[1]["Type"], "end");
        assert_abs_diff_eq!(json[0]["latitude"].as_f64().unwrap(), 19.0760);
    }
}
