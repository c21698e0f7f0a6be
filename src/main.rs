use clap::Parser;
use page_digest::{Scraper, ScraperConfig, refine};
use serde::Serialize;
use std::process::ExitCode;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            ::log::error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let scraper = match Scraper::new(&config) {
        Ok(scraper) => scraper,
        Err(e) => {
            ::log::error!("Failed to set up fetcher: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let start_time = std::time::Instant::now();
    let extraction = match scraper.scrape(&args.url).await {
        Ok(extraction) => extraction,
        Err(e) => {
            ::log::error!("Unable to scrape {}: {}", args.url, e);
            return ExitCode::FAILURE;
        }
    };
    ::log::info!(
        "Scraped {} in {:.2} seconds",
        extraction.url,
        start_time.elapsed().as_secs_f64()
    );

    let printed = if args.refine {
        match refine(&extraction) {
            Some(record) => print_json(&record, args.compact),
            None => {
                ::log::error!("Extraction for {} could not be refined", args.url);
                return ExitCode::from(2);
            }
        }
    } else {
        print_json(&extraction, args.compact)
    };

    match printed {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ::log::error!("Failed to serialize output: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: &Args) -> Result<ScraperConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => ScraperConfig::from_file(path)?,
        None => ScraperConfig::default(),
    };

    config.apply_overrides(args.timeout_ms, args.user_agent.as_deref());

    Ok(config)
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<(), serde_json::Error> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{}", json);
    Ok(())
}
