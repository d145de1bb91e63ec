use crate::sdk::geo::region::VIEWPORT_PADDING;
use crate::sdk::geo::{Coordinate, Region};
use crate::sdk::routing::{RouteCandidate, TravelMode};
use crate::sdk::safety::ScoreMap;
use serde::Serialize;

/// Immutable snapshot of one planning pass. A re-fetch builds a whole new
/// snapshot, so routes and scores can never disagree about their index
/// domain. Always holds at least one route.
#[derive(Debug, Clone, Serialize)]
pub struct JourneyPlan {
    /// Issued by the planner, strictly increasing; used to discard stale
    /// responses from superseded searches.
    pub generation: u64,
    pub origin_label: String,
    pub origin: Coordinate,
    pub destination_label: String,
    pub destination: Coordinate,
    pub mode: TravelMode,
    pub routes: Vec<RouteCandidate>,
    pub scores: ScoreMap,
    pub selected: usize,
}

/// What the selected route shows on screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteReadout {
    pub distance_text: String,
    pub duration_text: String,
    pub safety_score: f64,
}

impl JourneyPlan {
    /// Selection rule: the externally recommended index wins when it is in
    /// range; an out-of-range recommendation is ignored and the first route
    /// stays selected.
    pub fn initial_selection(scores: &ScoreMap, route_count: usize) -> usize {
        match scores.recommended {
            Some(index) if index < route_count => index,
            Some(index) => {
                log::debug!("Ignoring out-of-range recommended route index {}", index);
                0
            }
            None => 0,
        }
    }

    pub fn selected_route(&self) -> &RouteCandidate {
        &self.routes[self.selected]
    }

    /// Returns a new snapshot with another route selected, or `None` when
    /// the index is out of bounds. Pure projection: nothing else changes.
    pub fn with_selected(&self, index: usize) -> Option<JourneyPlan> {
        if index < self.routes.len() {
            let mut next = self.clone();
            next.selected = index;
            Some(next)
        } else {
            None
        }
    }

    /// Distance, duration and safety readout for the selected route.
    pub fn readout(&self) -> RouteReadout {
        let route = self.selected_route();
        RouteReadout {
            distance_text: route.distance_text.clone(),
            duration_text: route.duration_text.clone(),
            safety_score: self.scores.get(self.selected),
        }
    }

    /// Viewport fitted around the selected route's path, padded.
    pub fn viewport(&self) -> Option<Region> {
        Region::fit(&self.selected_route().path, VIEWPORT_PADDING)
    }
}
