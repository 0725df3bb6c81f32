use std::path::PathBuf;

use chrono::Local;
use clap::Parser;
use dialoguer::Input;
use jobscrap::{
    info_time,
    report::{display_jobs, save_to_json},
    search_jobs, HttpPageSource, Result, SearchQuery, DEFAULT_LOCATION, DEFAULT_LOOKBACK_HOURS,
    DEFAULT_MAX_RESULTS,
};
use tracing_subscriber::EnvFilter;

/// Searches public job listings and saves them as JSON.
/// Anything not passed as a flag is asked for interactively.
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    /// Job title / keywords to search for
    #[arg(short, long)]
    keywords: Option<String>,

    /// Only jobs posted within this many hours
    #[arg(short = 'H', long, allow_negative_numbers = true)]
    hours: Option<i64>,

    /// Location filter
    #[arg(short, long)]
    location: Option<String>,

    /// Maximum number of jobs to fetch
    #[arg(short, long)]
    max_results: Option<usize>,

    /// Output file, defaults to `linkedin_jobs_<keywords>.json`
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    let start_time = Local::now();
    let query = read_query(&cli)?;

    let source = HttpPageSource::new()?;
    let outcome = search_jobs(&source, &query).await;
    display_jobs(&outcome.records);

    if !outcome.records.is_empty() {
        let path = cli
            .output
            .unwrap_or_else(|| PathBuf::from(query.output_file_name()));
        save_to_json(&outcome.records, path).await?;
    }
    info_time!(start_time, "Full program time:");

    Ok(())
}

fn setup_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

/// Fills in the search from flags, prompting for whatever is missing.
fn read_query(cli: &Cli) -> Result<SearchQuery> {
    let keywords = match &cli.keywords {
        Some(k) => k.clone(),
        None => Input::<String>::new()
            .with_prompt("Enter job title/keywords")
            .validate_with(|k: &String| {
                if k.trim().is_empty() {
                    Err("keywords can't be empty")
                } else {
                    Ok(())
                }
            })
            .interact_text()?
            .trim()
            .to_string(),
    };

    let hours = match cli.hours {
        Some(h) => h,
        None => Input::<i64>::new()
            .with_prompt("Posted within last how many hours?")
            .default(DEFAULT_LOOKBACK_HOURS)
            .validate_with(|h: &i64| {
                if *h < 0 {
                    Err("hours can't be negative")
                } else {
                    Ok(())
                }
            })
            .interact_text()?,
    };

    let location = match &cli.location {
        Some(l) => l.trim().to_string(),
        None => Input::<String>::new()
            .with_prompt("Location")
            .default(DEFAULT_LOCATION.to_string())
            .interact_text()?
            .trim()
            .to_string(),
    };

    let max_results = match cli.max_results {
        Some(m) => m,
        None => Input::<usize>::new()
            .with_prompt("Maximum jobs to fetch?")
            .default(DEFAULT_MAX_RESULTS)
            .interact_text()?,
    };

    SearchQuery::new(keywords, location, hours, max_results)
}
