//! Data models for scraped articles, downloadable documents and listings.
//!
//! - [`ArticleRecord`]: one news item as extracted from its article page
//! - [`DocumentRecord`]: one download offer found on a circulars page
//! - [`ListingResult`]: what a pagination walk over a listing discovered
//!
//! The serialized field names are Spanish because the JSON files are
//! consumed as-is by the federation's editors.

use serde::{Deserialize, Serialize};

/// Listing name used when page 1 has no usable title.
pub const DEFAULT_LISTING_TITLE: &str = "listado_noticias";

/// A news article extracted from a single article page.
///
/// Every field may be empty: a record only tells that the site's article
/// container was found. Records with an empty title are not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleRecord {
    /// Article headline.
    #[serde(rename = "titulo")]
    pub title: String,
    /// Paragraph texts joined by `\n`.
    #[serde(rename = "contenido")]
    pub body: String,
    /// Date text exactly as shown on the page.
    #[serde(rename = "fecha")]
    pub date: String,
    /// Absolute image URLs in document order.
    #[serde(rename = "imagenes")]
    pub images: Vec<String>,
}

impl ArticleRecord {
    pub fn is_persistable(&self) -> bool {
        !self.title.is_empty()
    }
}

/// A downloadable file offered on a circulars page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DocumentRecord {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    /// Absolute URL, unique within one extraction pass.
    #[serde(rename = "url_descarga")]
    pub download_url: String,
}

/// Outcome of walking a paginated listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingResult {
    /// Pages that produced at least one item.
    pub page_count: usize,
    /// Article URLs in page order, then document order. Not deduplicated.
    pub article_urls: Vec<String>,
    /// Display title taken from page 1, when it was fetched.
    pub listing_title: Option<String>,
}
