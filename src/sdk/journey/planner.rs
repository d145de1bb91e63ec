use super::plan::JourneyPlan;
use crate::sdk::geo::Coordinate;
use crate::sdk::routing::{
    GeoCache, PlaceHit, RouteCandidate, RoutingError, RoutingProvider, TravelMode,
};
use crate::sdk::safety::{aggregate_scores, SafetyScorer};
use std::error::Error;

/// Runs the planning pipeline end to end, one blocking call after another:
/// resolve the origin label, search the destination, fetch alternatives,
/// decode and sample each, submit one batched scoring request, select.
///
/// Geocoding and places errors are terminal for the attempt (the caller
/// retries by planning again); safety scoring never fails the pipeline.
pub struct JourneyPlanner<'a> {
    provider: &'a dyn RoutingProvider,
    scorer: &'a dyn SafetyScorer,
    sample_interval_m: f64,
    generation: u64,
}

impl<'a> JourneyPlanner<'a> {
    pub fn new(
        provider: &'a dyn RoutingProvider,
        scorer: &'a dyn SafetyScorer,
        sample_interval_m: f64,
    ) -> Self {
        Self {
            provider,
            scorer,
            sample_interval_m,
            generation: 0,
        }
    }

    pub fn plan(
        &mut self,
        origin: Coordinate,
        destination_query: &str,
        mode: TravelMode,
        cache: &mut GeoCache,
    ) -> Result<JourneyPlan, Box<dyn Error>> {
        self.generation += 1;
        let generation = self.generation;

        let origin_label = match cache.get_reverse(origin) {
            Some(label) => {
                log::debug!("[CACHE HIT] reverse geocode for ({}, {})", origin.latitude, origin.longitude);
                label.clone()
            }
            None => {
                let label = self.provider.reverse_geocode(origin)?;
                cache.insert_reverse(origin, label.clone());
                label
            }
        };

        let place = match cache.get_place(destination_query) {
            Some(hit) => {
                log::debug!("[CACHE HIT] place lookup for \"{}\"", destination_query);
                hit.clone()
            }
            None => {
                let predictions = self.provider.autocomplete(destination_query)?;
                let first = predictions.into_iter().next().ok_or_else(|| {
                    RoutingError::NoResults(destination_query.to_string())
                })?;
                let position = self.provider.place_details(&first.place_id)?;
                let hit = PlaceHit {
                    description: first.description,
                    position,
                };
                cache.insert_place(destination_query, hit.clone());
                hit
            }
        };

        let fetched = self.provider.fetch_routes(origin, place.position, mode)?;
        if fetched.is_empty() {
            return Err(Box::new(RoutingError::NoResults(destination_query.to_string())));
        }

        let routes: Vec<RouteCandidate> = fetched
            .into_iter()
            .enumerate()
            .map(|(index, route)| RouteCandidate::prepare(index, route, self.sample_interval_m))
            .collect();

        let scores = aggregate_scores(self.scorer, &routes);
        let selected = JourneyPlan::initial_selection(&scores, routes.len());

        log::info!(
            "Planned {} route(s) from \"{}\" to \"{}\"; route {} selected",
            routes.len(),
            origin_label,
            place.description,
            selected
        );

        Ok(JourneyPlan {
            generation,
            origin_label,
            origin,
            destination_label: place.description,
            destination: place.position,
            mode,
            routes,
            scores,
            selected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::geo::polyline;
    use crate::sdk::routing::{FetchedRoute, PlacePrediction};
    use crate::sdk::safety::{ScoringResponse, SafetyScorer, DEFAULT_SAFETY_SCORE};
    use approx::assert_abs_diff_eq;
    use std::sync::Mutex;

    const ORIGIN: Coordinate = Coordinate {
        latitude: 19.0760,
        longitude: 72.8777,
    };
    const DESTINATION: Coordinate = Coordinate {
        latitude: 19.2183,
        longitude: 72.9781,
    };

    /// Canned provider returning two alternatives between the scenario's
    /// origin and destination.
    struct CannedProvider;

    fn scenario_polyline(offset: f64) -> String {
        let path: Vec<Coordinate> = (0..=20)
            .map(|i| {
                let t = i as f64 / 20.0;
                Coordinate::new(
                    ORIGIN.latitude + t * (DESTINATION.latitude - ORIGIN.latitude),
                    ORIGIN.longitude + t * (DESTINATION.longitude - ORIGIN.longitude) + offset,
                )
            })
            .collect();
        polyline::encode(&path)
    }

    impl RoutingProvider for CannedProvider {
        fn reverse_geocode(&self, _position: Coordinate) -> Result<String, Box<dyn Error>> {
            Ok("Mumbai, Maharashtra, India".to_string())
        }

        fn autocomplete(&self, query: &str) -> Result<Vec<PlacePrediction>, Box<dyn Error>> {
            Ok(vec![PlacePrediction {
                description: format!("{}, Maharashtra, India", query),
                place_id: "place-1".to_string(),
            }])
        }

        fn place_details(&self, _place_id: &str) -> Result<Coordinate, Box<dyn Error>> {
            Ok(DESTINATION)
        }

        fn fetch_routes(
            &self,
            _origin: Coordinate,
            _destination: Coordinate,
            _mode: TravelMode,
        ) -> Result<Vec<FetchedRoute>, Box<dyn Error>> {
            Ok((0..2)
                .map(|n| FetchedRoute {
                    summary: format!("Route {}", n),
                    polyline: scenario_polyline(n as f64 * 0.004),
                    distance_text: "19.1 km".to_string(),
                    distance_meters: 19_100,
                    duration_text: "4 hours".to_string(),
                    duration_seconds: 14_400,
                })
                .collect())
        }
    }

    /// Records how many batched scoring requests arrive and how many routes
    /// each carried.
    struct RecordingScorer {
        calls: Mutex<Vec<usize>>,
        body: &'static str,
    }

    impl SafetyScorer for RecordingScorer {
        fn score_routes(
            &self,
            routes: &[RouteCandidate],
        ) -> Result<ScoringResponse, Box<dyn Error>> {
            self.calls.lock().unwrap().push(routes.len());
            Ok(serde_json::from_str(self.body)?)
        }
    }

    struct TimedOutScorer;

    impl SafetyScorer for TimedOutScorer {
        fn score_routes(
            &self,
            _routes: &[RouteCandidate],
        ) -> Result<ScoringResponse, Box<dyn Error>> {
            Err(Box::new(RoutingError::Generic("timed out".to_string())))
        }
    }

    #[test]
    fn two_route_scenario_scores_once_and_selects_recommendation() {
        let scorer = RecordingScorer {
            calls: Mutex::new(Vec::new()),
            body: r#"{
                "recommendedRoute": { "routeIndex": 1, "overallSafety": 8.4 },
                "alternativeRoutes": [ { "routeIndex": 0, "overallSafety": 5.9 } ]
            }"#,
        };
        let mut planner = JourneyPlanner::new(&CannedProvider, &scorer, 200.0);
        let mut cache = GeoCache::default();

        let plan = planner
            .plan(ORIGIN, "Thane", TravelMode::Walking, &mut cache)
            .unwrap();

        // Both polylines decoded into non-empty sampled paths.
        assert_eq!(plan.routes.len(), 2);
        for route in &plan.routes {
            assert!(!route.path.is_empty());
            assert!(route.waypoints.len() >= 2);
        }

        // Exactly one batched scoring request, covering both routes.
        assert_eq!(*scorer.calls.lock().unwrap(), vec![2]);

        assert_eq!(plan.selected, 1);
        assert_abs_diff_eq!(plan.scores.get(1), 8.4);
        assert_abs_diff_eq!(plan.scores.get(0), 5.9);
    }

    #[test]
    fn scoring_timeout_still_renders_routes_with_defaults() {
        let mut planner = JourneyPlanner::new(&CannedProvider, &TimedOutScorer, 200.0);
        let mut cache = GeoCache::default();

        let plan = planner
            .plan(ORIGIN, "Thane", TravelMode::Walking, &mut cache)
            .unwrap();

        assert_eq!(plan.routes.len(), 2);
        assert_eq!(plan.selected, 0);
        assert_abs_diff_eq!(plan.scores.get(0), DEFAULT_SAFETY_SCORE);
        assert_abs_diff_eq!(plan.scores.get(1), DEFAULT_SAFETY_SCORE);
    }

    #[test]
    fn generations_increase_per_plan_and_cache_is_reused() {
        let scorer = RecordingScorer {
            calls: Mutex::new(Vec::new()),
            body: r#"{ "routes": [ { "overallSafety": 7.0 }, { "overallSafety": 6.0 } ] }"#,
        };
        let mut planner = JourneyPlanner::new(&CannedProvider, &scorer, 200.0);
        let mut cache = GeoCache::default();

        let first = planner
            .plan(ORIGIN, "Thane", TravelMode::Walking, &mut cache)
            .unwrap();
        let second = planner
            .plan(ORIGIN, "Thane", TravelMode::Walking, &mut cache)
            .unwrap();

        assert!(second.generation > first.generation);
        assert!(cache.get_place("Thane").is_some());
        assert!(cache.get_reverse(ORIGIN).is_some());
    }
}
