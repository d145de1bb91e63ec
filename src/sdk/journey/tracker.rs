use super::plan::JourneyPlan;
use crate::sdk::geo::{haversine_m, Coordinate};
use chrono::{DateTime, Local};
use serde::Serialize;

/// Remaining distance below which a tracked journey auto-completes.
pub const ARRIVAL_THRESHOLD_M: f64 = 50.0;

/// How a journey reached its terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionKind {
    Arrived,
    Stopped,
}

#[derive(Debug, Clone, Serialize)]
pub struct JourneySummary {
    pub destination_label: String,
    pub distance_text: String,
    pub duration_text: String,
    pub safety_score: f64,
    pub started_at: DateTime<Local>,
    pub completed_at: DateTime<Local>,
    pub completion: CompletionKind,
}

#[derive(Debug)]
pub struct ActiveTracking {
    pub plan: JourneyPlan,
    pub started_at: DateTime<Local>,
    pub last_fix: Option<Coordinate>,
}

impl ActiveTracking {
    fn into_summary(self, completion: CompletionKind) -> JourneySummary {
        let readout = self.plan.readout();
        JourneySummary {
            destination_label: self.plan.destination_label,
            distance_text: readout.distance_text,
            duration_text: readout.duration_text,
            safety_score: readout.safety_score,
            started_at: self.started_at,
            completed_at: Local::now(),
            completion,
        }
    }
}

/// Reported after each position fix while tracking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackEvent {
    Progress { remaining_m: f64 },
    Arrived,
}

/// The journey flow: `Idle → RoutesLoaded → Tracking → Completed`.
///
/// Every transition fires exactly once, triggered by a user action or the
/// arrival threshold. Invalid transitions are rejected, never retried.
#[derive(Debug, Default)]
pub enum Journey {
    #[default]
    Idle,
    RoutesLoaded(JourneyPlan),
    Tracking(ActiveTracking),
    Completed(JourneySummary),
}

impl Journey {
    fn current_generation(&self) -> u64 {
        match self {
            Journey::RoutesLoaded(plan) => plan.generation,
            Journey::Tracking(tracking) => tracking.plan.generation,
            _ => 0,
        }
    }

    /// Applies a freshly planned snapshot. A plan that is not newer than
    /// the one already applied is discarded, so a slow response from a
    /// superseded search cannot clobber fresher state. Returns whether the
    /// plan took effect.
    pub fn load_routes(&mut self, plan: JourneyPlan) -> bool {
        if plan.generation <= self.current_generation() {
            log::warn!(
                "Discarding stale journey plan (generation {} <= {})",
                plan.generation,
                self.current_generation()
            );
            return false;
        }
        match self {
            Journey::Idle | Journey::RoutesLoaded(_) => {
                *self = Journey::RoutesLoaded(plan);
                true
            }
            _ => {
                log::warn!("Cannot load routes while tracking or completed");
                false
            }
        }
    }

    /// Switches the selected route while routes are loaded.
    pub fn select_route(&mut self, index: usize) -> bool {
        if let Journey::RoutesLoaded(plan) = self {
            if let Some(next) = plan.with_selected(index) {
                *self = Journey::RoutesLoaded(next);
                return true;
            }
        }
        false
    }

    /// `RoutesLoaded → Tracking`.
    pub fn start_tracking(&mut self) -> bool {
        match std::mem::take(self) {
            Journey::RoutesLoaded(plan) => {
                log::info!("Tracking started towards \"{}\"", plan.destination_label);
                *self = Journey::Tracking(ActiveTracking {
                    plan,
                    started_at: Local::now(),
                    last_fix: None,
                });
                true
            }
            other => {
                *self = other;
                false
            }
        }
    }

    /// Feeds one position fix. Auto-completes when the remaining distance
    /// to the destination drops below [`ARRIVAL_THRESHOLD_M`]. Ignored
    /// outside the `Tracking` state.
    pub fn position_update(&mut self, fix: Coordinate) -> Option<TrackEvent> {
        match std::mem::take(self) {
            Journey::Tracking(mut tracking) => {
                tracking.last_fix = Some(fix);
                let remaining = haversine_m(fix, tracking.plan.destination);
                if remaining < ARRIVAL_THRESHOLD_M {
                    log::info!("Arrived ({:.0} m from destination)", remaining);
                    *self = Journey::Completed(tracking.into_summary(CompletionKind::Arrived));
                    Some(TrackEvent::Arrived)
                } else {
                    *self = Journey::Tracking(tracking);
                    Some(TrackEvent::Progress {
                        remaining_m: remaining,
                    })
                }
            }
            other => {
                *self = other;
                None
            }
        }
    }

    /// Manual stop: `Tracking → Completed`.
    pub fn stop(&mut self) -> bool {
        match std::mem::take(self) {
            Journey::Tracking(tracking) => {
                *self = Journey::Completed(tracking.into_summary(CompletionKind::Stopped));
                true
            }
            other => {
                *self = other;
                false
            }
        }
    }

    pub fn summary(&self) -> Option<&JourneySummary> {
        match self {
            Journey::Completed(summary) => Some(summary),
            _ => None,
        }
    }

    pub fn plan(&self) -> Option<&JourneyPlan> {
        match self {
            Journey::RoutesLoaded(plan) => Some(plan),
            Journey::Tracking(tracking) => Some(&tracking.plan),
            _ => None,
        }
    }
}
