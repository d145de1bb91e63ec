use serde::Deserialize;

// --- Data structures for parsing maps API responses ---

#[derive(Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

// --- Reverse geocoding ---

#[derive(Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    pub error_message: Option<String>,
}

#[derive(Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: String,
}

// --- Place autocomplete & details ---

#[derive(Deserialize)]
pub struct AutocompleteResponse {
    pub status: String,
    #[serde(default)]
    pub predictions: Vec<RawPrediction>,
    pub error_message: Option<String>,
}

#[derive(Deserialize)]
pub struct RawPrediction {
    pub description: String,
    pub place_id: String,
}

#[derive(Deserialize)]
pub struct PlaceDetailsResponse {
    pub status: String,
    pub result: Option<PlaceDetailsResult>,
    pub error_message: Option<String>,
}

#[derive(Deserialize)]
pub struct PlaceDetailsResult {
    pub geometry: Geometry,
}

// --- Directions ---

#[derive(Deserialize)]
pub struct DirectionsResponse {
    pub status: String,
    #[serde(default)]
    pub routes: Vec<RawRoute>,
    pub error_message: Option<String>,
}

#[derive(Deserialize)]
pub struct RawRoute {
    #[serde(default)]
    pub summary: String,
    pub overview_polyline: OverviewPolyline,
    pub legs: Vec<Leg>,
}

#[derive(Deserialize)]
pub struct OverviewPolyline {
    pub points: String,
}

#[derive(Deserialize)]
pub struct Leg {
    pub distance: TextValue,
    pub duration: TextValue,
}

#[derive(Deserialize)]
pub struct TextValue {
    pub text: String,
    pub value: u32,
}
