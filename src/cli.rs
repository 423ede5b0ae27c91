//! Command-line interface definitions.
//!
//! Every option can be given as a flag or an environment variable. When the
//! mode or the URL is missing, the user is asked for it interactively.

use clap::{Parser, ValueEnum};
use dialoguer::{Input, Select};
use std::fmt;

use crate::fetch::DEFAULT_TIMEOUT_SECS;
use crate::pagination::DEFAULT_MAX_PAGES;

/// What to scrape from the given URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Walk a paginated news listing and save every article
    Articles,
    /// Save the download offers of one circulars page
    Documents,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Articles => f.write_str("1. Guardar noticias de un listado paginado"),
            Mode::Documents => f.write_str("2. Guardar documentos descargables de una página"),
        }
    }
}

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Ask for everything interactively
/// futbol_news_scraper
///
/// # Save a whole listing without prompting
/// futbol_news_scraper --mode articles --url "https://www.ftf.es/noticias?cat=5"
///
/// # Save the circulars of one page under ./datos/documentos
/// futbol_news_scraper -m documents -u https://www.ftf.es/circulares -o ./datos
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Scraping mode; asked interactively when omitted
    #[arg(short, long, value_enum)]
    pub mode: Option<Mode>,

    /// Listing or page URL; asked interactively when omitted
    #[arg(short, long)]
    pub url: Option<String>,

    /// Root directory for the saved JSON files
    #[arg(short, long, env = "SCRAPER_OUTPUT_DIR", default_value = ".")]
    pub output_dir: String,

    /// Highest listing page to request
    #[arg(long, env = "SCRAPER_MAX_PAGES", default_value_t = DEFAULT_MAX_PAGES)]
    pub max_pages: usize,

    /// Per-request timeout in seconds
    #[arg(long, env = "SCRAPER_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

impl Cli {
    /// The mode from the flags, or the one the user picks.
    pub fn resolve_mode(&self) -> dialoguer::Result<Mode> {
        if let Some(mode) = self.mode {
            return Ok(mode);
        }
        let modes = [Mode::Articles, Mode::Documents];
        let picked = Select::new()
            .with_prompt("Selecciona el modo")
            .items(&modes)
            .default(0)
            .interact()?;
        Ok(modes[picked])
    }

    /// The URL from the flags, or the one the user types.
    pub fn resolve_url(&self, mode: Mode) -> dialoguer::Result<String> {
        if let Some(url) = &self.url {
            return Ok(url.trim().to_string());
        }
        let prompt = match mode {
            Mode::Articles => "Introduce la URL base del listado a analizar",
            Mode::Documents => "Introduce la URL de la página de documentos",
        };
        let url = Input::<String>::new().with_prompt(prompt).interact_text()?;
        Ok(url.trim().to_string())
    }
}
