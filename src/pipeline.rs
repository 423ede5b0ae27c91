//! The two scraping workflows.
//!
//! 1. **Listing**: walk a paginated listing, then fetch, extract and save
//!    every article it links to, one at a time.
//! 2. **Documents**: fetch one circulars page and save all its download
//!    offers as a single collection.
//!
//! Failures are per item: a broken article is logged and skipped. Only an
//! unsupported domain for the starting URL ends a workflow early.

use crate::documents::extract_documents;
use crate::error::ScrapeError;
use crate::fetch::PageFetcher;
use crate::models::ArticleRecord;
use crate::outputs::json;
use crate::pagination;
use crate::sites::Site;
use futures::stream::{self, StreamExt};
use scraper::Html;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, instrument, warn};
use url::Url;

/// Counts reported at the end of a listing run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ListingSummary {
    pub pages: usize,
    pub urls_found: usize,
    pub saved: usize,
    pub failed: usize,
}

/// Walk the listing at `base_url` and save each of its articles under
/// `output_dir`.
///
/// # Arguments
///
/// * `fetcher` - Client used for every page of the run
/// * `base_url` - Page 1 of the listing; its host selects the site rule
/// * `output_dir` - Root under which `{site}/{listing}/` is created
/// * `max_pages` - Highest listing page to request
///
/// # Returns
///
/// Page, URL, saved and failed counts, or an error when `base_url` does not
/// parse or belongs to an unsupported domain.
#[instrument(level = "info", skip(fetcher, output_dir))]
pub async fn save_listing(
    fetcher: &PageFetcher,
    base_url: &str,
    output_dir: &Path,
    max_pages: usize,
) -> Result<ListingSummary, ScrapeError> {
    let base = Url::parse(base_url).map_err(|e| ScrapeError::invalid_url(base_url, e))?;
    let site = Site::from_url(&base)?;
    Ok(save_listing_with(fetcher, site, &base, output_dir, max_pages).await)
}

/// [`save_listing`] with the listing's rule chosen by the caller.
///
/// Articles on the listing's own host use `site`; links to any other host
/// go through [`Site::from_url`] and fail for unsupported domains.
pub async fn save_listing_with(
    fetcher: &PageFetcher,
    site: Site,
    base: &Url,
    output_dir: &Path,
    max_pages: usize,
) -> ListingSummary {
    info!(%site, "Walking listing");

    let listing = pagination::walk(fetcher, site, base.as_str(), max_pages).await;
    info!(
        pages = listing.page_count,
        urls = listing.article_urls.len(),
        "Listing pages and article URLs found"
    );

    let dir = json::listing_dir(output_dir, site, listing.listing_title.as_deref());
    let mut summary = ListingSummary {
        pages: listing.page_count,
        urls_found: listing.article_urls.len(),
        ..Default::default()
    };

    let outcomes: Vec<bool> = stream::iter(listing.article_urls)
        .then(|url| {
            let dir = dir.clone();
            async move { save_article(fetcher, site, base, &url, &dir).await }
        })
        .collect()
        .await;

    summary.saved = outcomes.iter().filter(|saved| **saved).count();
    summary.failed = outcomes.len() - summary.saved;
    summary
}

/// Fetch, extract and save one article. Returns whether a file was written.
async fn save_article(
    fetcher: &PageFetcher,
    listing_site: Site,
    listing_url: &Url,
    url: &str,
    dir: &Path,
) -> bool {
    let article = match fetch_listed_article(fetcher, listing_site, listing_url, url).await {
        Ok(article) => article,
        Err(e) => {
            warn!(%url, error = %e, "Could not extract article");
            return false;
        }
    };
    if !article.is_persistable() {
        warn!(%url, "Article has no title; skipping");
        return false;
    }
    match json::write_article(&article, dir).await {
        Ok(_) => true,
        Err(e) => {
            error!(%url, error = %e, "Failed to save article");
            false
        }
    }
}

async fn fetch_listed_article(
    fetcher: &PageFetcher,
    listing_site: Site,
    listing_url: &Url,
    url: &str,
) -> Result<ArticleRecord, ScrapeError> {
    let page_url = Url::parse(url).map_err(|e| ScrapeError::invalid_url(url, e))?;
    let site = if page_url.host_str() == listing_url.host_str() {
        listing_site
    } else {
        Site::from_url(&page_url)?
    };
    fetch_article_with(fetcher, site, &page_url).await
}

/// Fetch `page_url` and extract it with `site`'s article rule, whatever its host.
pub async fn fetch_article_with(
    fetcher: &PageFetcher,
    site: Site,
    page_url: &Url,
) -> Result<ArticleRecord, ScrapeError> {
    let html = fetcher.fetch(page_url.as_str()).await?;
    let document = Html::parse_document(&html);
    let article = site.extract_article(&document, page_url)?;
    debug!(title = %article.title, images = article.images.len(), "Extracted article");
    Ok(article)
}

/// Save every download offer on the circulars page at `page_url`.
#[instrument(level = "info", skip(fetcher, output_dir))]
pub async fn save_documents(
    fetcher: &PageFetcher,
    page_url: &str,
    output_dir: &Path,
) -> Result<PathBuf, ScrapeError> {
    let url = Url::parse(page_url).map_err(|e| ScrapeError::invalid_url(page_url, e))?;
    match Site::from_url(&url)? {
        Site::Ftf => {}
        other => return Err(ScrapeError::UnsupportedDomain(other.host().to_string())),
    }
    fetch_and_save_documents(fetcher, &url, output_dir).await
}

/// Documents workflow without the host check.
pub async fn fetch_and_save_documents(
    fetcher: &PageFetcher,
    url: &Url,
    output_dir: &Path,
) -> Result<PathBuf, ScrapeError> {
    let html = fetcher.fetch(url.as_str()).await?;
    let documents = extract_documents(&html, url);
    if documents.is_empty() {
        warn!(%url, "No download offers found");
    } else {
        info!(%url, count = documents.len(), "Download offers found");
    }
    json::write_documents(&documents, output_dir, url).await
}
