pub mod config;
pub mod geo;
pub mod journey;
pub mod routing;
pub mod safety;
pub mod util;
