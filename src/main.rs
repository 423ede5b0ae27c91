//! # Fútbol News Scraper
//!
//! Saves the news published by the Canary Islands football federations
//! (`www.ftf.es`, `www.fiflp.com`) as JSON files, one per article, and the
//! downloadable circulars of a `www.ftf.es` page as a single JSON collection.
//!
//! ## Usage
//!
//! ```sh
//! futbol_news_scraper --mode articles --url https://www.ftf.es/noticias -o ./datos
//! ```
//!
//! ## Architecture
//!
//! 1. **Listing**: walk `?p=1, 2, …` of the listing collecting article URLs
//! 2. **Extraction**: fetch each article and apply its site's rule
//! 3. **Output**: write one JSON file per article under `{site}/{listing}/`
//!
//! The documents mode fetches a single page and writes all of its download
//! offers to `documentos/{page path}.json`. Everything runs one request at a
//! time.

use clap::Parser;
use std::error::Error;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod documents;
mod error;
mod fetch;
mod html;
mod models;
mod outputs;
mod pagination;
mod pipeline;
mod sites;
mod utils;

use cli::{Cli, Mode};
use fetch::PageFetcher;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("futbol_news_scraper starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // Early check: the output root must be writable before any fetch
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let mode = args.resolve_mode()?;
    let url = args.resolve_url(mode)?;
    let output_dir = Path::new(&args.output_dir);
    let fetcher = PageFetcher::new(Duration::from_secs(args.timeout_secs))?;
    info!(?mode, %url, "Starting scrape");

    match mode {
        Mode::Articles => {
            match pipeline::save_listing(&fetcher, &url, output_dir, args.max_pages).await {
                Ok(summary) => info!(
                    pages = summary.pages,
                    urls = summary.urls_found,
                    saved = summary.saved,
                    failed = summary.failed,
                    "Listing saved"
                ),
                Err(e) => error!(%url, error = %e, "Listing scrape aborted"),
            }
        }
        Mode::Documents => match pipeline::save_documents(&fetcher, &url, output_dir).await {
            Ok(path) => info!(path = %path.display(), "Documents saved"),
            Err(e) => error!(%url, error = %e, "Documents scrape aborted"),
        },
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
