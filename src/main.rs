use clap::Parser;
use saferoute::{
    sdk::config::Config,
    sdk::geo::{Coordinate, DEFAULT_SAMPLE_INTERVAL_M},
    sdk::journey::{Journey, JourneyPlanner, TrackEvent},
    sdk::routing::{cache::GeoCache, provider::RemoteDirectionsProvider, TravelMode},
    sdk::safety::RemoteSafetyScorer,
    sdk::util::{log::init_logging, rate_limit},
};
use std::{error::Error, fs, fs::File, io::Write};

const CACHE_FILE: &str = "geo_cache.json";

/// A CLI tool to plan a safety-scored journey and optionally replay a
/// recorded track against it
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Origin latitude
    #[arg(long)]
    lat: f64,

    /// Origin longitude
    #[arg(long)]
    lon: f64,

    /// Destination search text (e.g., "Thane station")
    #[arg(short, long)]
    to: String,

    /// Travel mode
    #[arg(short, long, value_enum, default_value_t = TravelMode::Walking)]
    mode: TravelMode,

    /// [Optional] Waypoint sampling interval in meters
    #[arg(long, default_value_t = DEFAULT_SAMPLE_INTERVAL_M)]
    interval: f64,

    /// [Optional] JSON file with an array of {latitude, longitude} fixes to
    /// replay through the tracker after planning
    #[arg(long)]
    track_fixes: Option<String>,

    /// Output file for the plan snapshot
    #[arg(short, long, default_value = "journey_plan.json")]
    output: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Start with our custom logger
    init_logging();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // --- 1. Dependency Initialization ---
    let config = Config::from_env()?;
    let mut provider = RemoteDirectionsProvider::new(
        config.directions_api_key.clone(),
        rate_limit::maps_limiter(),
    );
    if let Some(base_url) = &config.directions_base_url {
        provider = provider.with_base_url(base_url.clone());
    }
    let scorer = RemoteSafetyScorer::new(config.safety_base_url.clone(), rate_limit::safety_limiter());
    let mut cache = GeoCache::load_from_file(CACHE_FILE)?;

    let origin = Coordinate::new(cli.lat, cli.lon);
    log::info!(
        "Planning a {} journey from ({}, {}) to \"{}\"",
        cli.mode,
        cli.lat,
        cli.lon,
        cli.to
    );

    // --- 2. Execute SDK Logic ---
    let mut planner = JourneyPlanner::new(&provider, &scorer, cli.interval);
    let plan = planner.plan(origin, &cli.to, cli.mode, &mut cache)?;

    println!("From: {}", plan.origin_label);
    println!("To:   {}", plan.destination_label);
    for route in &plan.routes {
        let marker = if route.index == plan.selected { '>' } else { ' ' };
        println!(
            "{} [{}] {:<24} {:>10} {:>16}  safety {:.1}/10",
            marker,
            route.index,
            route.summary,
            route.distance_text,
            route.duration_text,
            plan.scores.get(route.index)
        );
    }
    if let Some(explanation) = &plan.scores.explanation {
        println!("Note: {}", explanation);
    }

    let mut journey = Journey::default();
    journey.load_routes(plan.clone());

    // --- 3. Optional Tracking Replay ---
    if let Some(path) = &cli.track_fixes {
        let fixes: Vec<Coordinate> = serde_json::from_str(&fs::read_to_string(path)?)?;
        log::info!("Replaying {} fixes from {}", fixes.len(), path);
        journey.start_tracking();
        for fix in fixes {
            match journey.position_update(fix) {
                Some(TrackEvent::Progress { remaining_m }) => {
                    log::info!("{:.0} m remaining", remaining_m);
                }
                Some(TrackEvent::Arrived) => break,
                None => break,
            }
        }
        if journey.summary().is_none() {
            journey.stop();
        }
        if let Some(summary) = journey.summary() {
            println!(
                "Journey {:?}: {} in {} (safety {:.1}/10)",
                summary.completion,
                summary.distance_text,
                summary.duration_text,
                summary.safety_score
            );
        }
    }

    // --- 4. Output Results ---
    let json_output = serde_json::to_string_pretty(&plan)?;
    let mut file = File::create(&cli.output)?;
    file.write_all(json_output.as_bytes())?;
    log::info!("Plan snapshot written to {}", cli.output);

    cache.save_to_file(CACHE_FILE)?;
    log::info!("Cache saved to {}", CACHE_FILE);

    Ok(())
}
