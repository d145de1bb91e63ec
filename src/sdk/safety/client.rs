use super::score::{ScoreMap, ScoringRequest, ScoringResponse};
use crate::sdk::routing::error::RoutingError;
use crate::sdk::routing::RouteCandidate;
use crate::sdk::util::rate_limit::Limiter;
use reqwest::blocking::Client;
use std::error::Error;
use std::time::Duration;

pub trait SafetyScorer: Send + Sync {
    /// Submits every route's waypoint list in one batched request.
    fn score_routes(&self, routes: &[RouteCandidate]) -> Result<ScoringResponse, Box<dyn Error>>;
}

pub struct RemoteSafetyScorer {
    client: Client,
    base_url: String,
    limiter: Limiter,
}

impl RemoteSafetyScorer {
    pub fn new(base_url: String, limiter: Limiter) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(15))
                .build()
                .unwrap(),
            base_url,
            limiter,
        }
    }
}

impl SafetyScorer for RemoteSafetyScorer {
    fn score_routes(&self, routes: &[RouteCandidate]) -> Result<ScoringResponse, Box<dyn Error>> {
        self.limiter.wait();
        let url = format!("{}/analyze-routes", self.base_url);
        log::debug!(
            "[SCORER] Submitting {} route(s) for safety analysis",
            routes.len()
        );

        let response = self
            .client
            .post(&url)
            .json(&ScoringRequest::from_routes(routes))
            .send()?;

        let status = response.status();
        let text = response.text()?;
        if !status.is_success() {
            log::warn!(
                "Safety endpoint returned non-success status: {}. Body: {}",
                status,
                text
            );
            return Err(Box::new(RoutingError::RawApiError(text)));
        }

        let parsed: ScoringResponse = serde_json::from_str(&text).map_err(|e| {
            log::warn!(
                "Failed to parse ScoringResponse. URL: {}\nError: {}. Body: {}",
                url,
                e,
                text
            );
            e
        })?;
        Ok(parsed)
    }
}

/// Best-effort aggregation: safety scoring must never block route display,
/// so every failure path degrades to default scores for the whole list.
pub fn aggregate_scores(scorer: &dyn SafetyScorer, routes: &[RouteCandidate]) -> ScoreMap {
    match scorer.score_routes(routes) {
        Ok(response) => ScoreMap::from_response(response, routes.len()),
        Err(e) => {
            log::warn!("Safety scoring failed, using default scores: {}", e);
            ScoreMap::fallback(routes.len())
        }
    }
}
