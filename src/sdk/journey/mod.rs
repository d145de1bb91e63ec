pub mod plan;
pub mod planner;
pub mod tracker;

pub use plan::{JourneyPlan, RouteReadout};
pub use planner::JourneyPlanner;
pub use tracker::{CompletionKind, Journey, JourneySummary, TrackEvent, ARRIVAL_THRESHOLD_M};
