pub mod cache;
pub mod error;
pub mod provider;
pub mod route;
pub mod service;

pub use cache::{CoordKey, GeoCache, PlaceHit};
pub use error::RoutingError;
pub use provider::RemoteDirectionsProvider;
pub use route::{FetchedRoute, RouteCandidate};
pub use service::{PlacePrediction, RoutingProvider, TravelMode};
