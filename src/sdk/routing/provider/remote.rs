use super::types::{
    AutocompleteResponse, DirectionsResponse, GeocodeResponse, PlaceDetailsResponse,
};
use crate::sdk::geo::Coordinate;
use crate::sdk::routing::error::{ApiErrorPayload, RoutingError};
use crate::sdk::routing::route::FetchedRoute;
use crate::sdk::routing::service::{PlacePrediction, RoutingProvider, TravelMode};
use crate::sdk::util::rate_limit::Limiter;
use reqwest::blocking::Client;
use std::error::Error;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com";

pub struct RemoteDirectionsProvider {
    client: Client,
    api_key: String,
    base_url: String,
    limiter: Limiter,
}

impl RemoteDirectionsProvider {
    pub fn new(api_key: String, limiter: Limiter) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(15))
                .build()
                .unwrap(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            limiter,
        }
    }

    /// Points the provider at an alternative host, e.g. a caching proxy.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Issues a GET and returns the body text, converting non-success HTTP
    /// statuses into structured errors.
    fn get_text(&self, url: &str) -> Result<String, Box<dyn Error>> {
        self.limiter.wait();
        let response = self.client.get(url).send()?;
        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            // Try to parse the structured error first
            if let Ok(payload) = serde_json::from_str::<ApiErrorPayload>(&text) {
                return Err(Box::new(RoutingError::ApiError {
                    status: payload.status,
                    message: payload.error_message.unwrap_or_default(),
                }));
            }
            log::error!(
                "API returned non-success status: {}. Unparseable body: {}",
                status,
                text
            );
            return Err(Box::new(RoutingError::RawApiError(text)));
        }

        Ok(text)
    }
}

/// Maps the body-level `status` field into an error unless it signals
/// success.
fn check_status(status: &str, error_message: Option<String>, query: &str) -> Result<(), RoutingError> {
    match status {
        "OK" => Ok(()),
        "ZERO_RESULTS" => Err(RoutingError::NoResults(query.to_string())),
        other => Err(RoutingError::ApiError {
            status: other.to_string(),
            message: error_message.unwrap_or_default(),
        }),
    }
}

impl RoutingProvider for RemoteDirectionsProvider {
    fn reverse_geocode(&self, position: Coordinate) -> Result<String, Box<dyn Error>> {
        log::debug!(
            "[PROVIDER] Calling remote reverse_geocode for ({}, {})",
            position.latitude,
            position.longitude
        );
        let url = format!(
            "{}/maps/api/geocode/json?latlng={},{}&key={}",
            self.base_url, position.latitude, position.longitude, self.api_key
        );

        let text = self.get_text(&url)?;
        let body: GeocodeResponse = serde_json::from_str(&text).map_err(|e| {
            log::error!(
                "Failed to parse GeocodeResponse. URL: {}\nError: {}. Body: {}",
                url,
                e,
                text
            );
            e
        })?;

        check_status(&body.status, body.error_message, "reverse geocode")?;
        let address = body
            .results
            .into_iter()
            .next()
            .ok_or_else(|| RoutingError::NoResults("reverse geocode".to_string()))?
            .formatted_address;
        Ok(address)
    }

    fn autocomplete(&self, query: &str) -> Result<Vec<PlacePrediction>, Box<dyn Error>> {
        log::debug!("[PROVIDER] Calling remote autocomplete for \"{}\"", query);
        let url = format!(
            "{}/maps/api/place/autocomplete/json?input={}&key={}",
            self.base_url, query, self.api_key
        );

        let text = self.get_text(&url)?;
        let body: AutocompleteResponse = serde_json::from_str(&text).map_err(|e| {
            log::error!(
                "Failed to parse AutocompleteResponse. URL: {}\nError: {}. Body: {}",
                url,
                e,
                text
            );
            e
        })?;

        check_status(&body.status, body.error_message, query)?;
        Ok(body
            .predictions
            .into_iter()
            .map(|p| PlacePrediction {
                description: p.description,
                place_id: p.place_id,
            })
            .collect())
    }

    fn place_details(&self, place_id: &str) -> Result<Coordinate, Box<dyn Error>> {
        log::debug!("[PROVIDER] Calling remote place_details for {}", place_id);
        let url = format!(
            "{}/maps/api/place/details/json?place_id={}&fields=geometry&key={}",
            self.base_url, place_id, self.api_key
        );

        let text = self.get_text(&url)?;
        let body: PlaceDetailsResponse = serde_json::from_str(&text).map_err(|e| {
            log::error!(
                "Failed to parse PlaceDetailsResponse. URL: {}\nError: {}. Body: {}",
                url,
                e,
                text
            );
            e
        })?;

        check_status(&body.status, body.error_message, place_id)?;
        let location = body
            .result
            .ok_or_else(|| RoutingError::NoResults(place_id.to_string()))?
            .geometry
            .location;
        Ok(Coordinate::new(location.lat, location.lng))
    }

    fn fetch_routes(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TravelMode,
    ) -> Result<Vec<FetchedRoute>, Box<dyn Error>> {
        log::debug!(
            "[PROVIDER] Calling remote fetch_routes ({}, {}) -> ({}, {}) mode {}",
            origin.latitude,
            origin.longitude,
            destination.latitude,
            destination.longitude,
            mode
        );
        let url = format!(
            "{}/maps/api/directions/json?origin={},{}&destination={},{}&mode={}&alternatives=true&key={}",
            self.base_url,
            origin.latitude,
            origin.longitude,
            destination.latitude,
            destination.longitude,
            mode,
            self.api_key
        );

        let text = self.get_text(&url)?;
        let body: DirectionsResponse = serde_json::from_str(&text).map_err(|e| {
            log::error!(
                "Failed to parse DirectionsResponse. URL: {}\nError: {}. Body: {}",
                url,
                e,
                text
            );
            e
        })?;

        check_status(&body.status, body.error_message, "directions")?;

        let routes: Vec<FetchedRoute> = body
            .routes
            .into_iter()
            .filter_map(|route| {
                // Journeys have no intermediate stops, so responses are
                // single-leg in practice; sum the values anyway.
                let first_leg = route.legs.first()?;
                let distance_text = first_leg.distance.text.clone();
                let duration_text = first_leg.duration.text.clone();
                let distance_meters = route.legs.iter().map(|l| l.distance.value).sum();
                let duration_seconds = route.legs.iter().map(|l| l.duration.value).sum();
                Some(FetchedRoute {
                    summary: route.summary,
                    polyline: route.overview_polyline.points,
                    distance_text,
                    distance_meters,
                    duration_text,
                    duration_seconds,
                })
            })
            .collect();

        if routes.is_empty() {
            return Err(Box::new(RoutingError::NoResults("directions".to_string())));
        }
        Ok(routes)
    }
}
