pub mod sdk;

pub use sdk::config::Config;
pub use sdk::geo::{haversine_m, polyline, sample_waypoints, Coordinate, Region, Waypoint};
pub use sdk::journey::{Journey, JourneyPlan, JourneyPlanner, JourneySummary, TrackEvent};
pub use sdk::routing::{
    GeoCache, RemoteDirectionsProvider, RouteCandidate, RoutingError, RoutingProvider, TravelMode,
};
pub use sdk::safety::{aggregate_scores, RemoteSafetyScorer, SafetyScorer, ScoreMap};
