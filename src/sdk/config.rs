use std::env;
use std::error::Error;

const DEFAULT_SAFETY_URL: &str = "https://safety.saferoute.app/api";

/// Runtime configuration resolved from the environment (the binary loads
/// `.env` via dotenvy before calling this).
#[derive(Debug, Clone)]
pub struct Config {
    pub directions_api_key: String,
    pub directions_base_url: Option<String>,
    pub safety_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn Error>> {
        let directions_api_key =
            env::var("DIRECTIONS_API_KEY").map_err(|_| "DIRECTIONS_API_KEY is not set")?;
        Ok(Self {
            directions_api_key,
            directions_base_url: env::var("DIRECTIONS_BASE_URL").ok(),
            safety_base_url: env::var("SAFETY_API_URL")
                .unwrap_or_else(|_| DEFAULT_SAFETY_URL.to_string()),
        })
    }
}
