//! JSON writers for articles and document collections.
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── ftf/
//! │   └── noticiasftf/
//! │       ├── 12032024_asambleageneral2024.json
//! │       └── 20092024_convocatoriasub16.json
//! └── documentos/
//!     └── circulares_2024.json
//! ```
//!
//! Files are pretty-printed UTF-8 with non-ASCII text kept literal. A file
//! whose computed name already exists is overwritten.

use crate::error::ScrapeError;
use crate::models::{ArticleRecord, DEFAULT_LISTING_TITLE, DocumentRecord};
use crate::sites::Site;
use crate::utils::{page_path_file_name, sanitize_name};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};
use url::Url;

/// Directory that receives every document collection.
pub const DOCUMENTS_DIR: &str = "documentos";

/// Folder for one listing's articles: `<output>/<site>/<listing>`.
pub fn listing_dir(output_dir: &Path, site: Site, listing_title: Option<&str>) -> PathBuf {
    let title = listing_title
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_LISTING_TITLE);
    let mut name = sanitize_name(title);
    if name.is_empty() {
        name = sanitize_name(DEFAULT_LISTING_TITLE);
    }
    output_dir.join(site.short_name()).join(name)
}

/// `<date>_<title>.json`, both parts sanitized.
pub fn article_file_name(article: &ArticleRecord) -> String {
    format!(
        "{}_{}.json",
        sanitize_name(&article.date),
        sanitize_name(&article.title)
    )
}

/// Write one article into `dir`, creating it if needed.
#[instrument(level = "info", skip_all, fields(dir = %dir.display()))]
pub async fn write_article(article: &ArticleRecord, dir: &Path) -> Result<PathBuf, ScrapeError> {
    let json = serde_json::to_string_pretty(article)?;
    create_dir(dir).await?;

    let path = dir.join(article_file_name(article));
    fs::write(&path, json).await?;
    info!(path = %path.display(), "Saved article");
    Ok(path)
}

/// Write every document found on `page_url` as one JSON array.
#[instrument(level = "info", skip_all, fields(page = %page_url, count = documents.len()))]
pub async fn write_documents(
    documents: &[DocumentRecord],
    output_dir: &Path,
    page_url: &Url,
) -> Result<PathBuf, ScrapeError> {
    let json = serde_json::to_string_pretty(documents)?;
    let dir = output_dir.join(DOCUMENTS_DIR);
    create_dir(&dir).await?;

    let path = dir.join(page_path_file_name(page_url));
    fs::write(&path, json).await?;
    info!(path = %path.display(), "Saved document collection");
    Ok(path)
}

async fn create_dir(dir: &Path) -> Result<(), ScrapeError> {
    if let Err(e) = fs::create_dir_all(dir).await {
        error!(dir = %dir.display(), error = %e, "Failed to create output dir");
        return Err(e.into());
    }
    Ok(())
}
