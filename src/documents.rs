//! Download offers on `www.ftf.es` circulars pages.
//!
//! Each offer is a block (`section`, `div` or `article`) holding an `h3`/`h4`
//! title, an optional describing paragraph and a "Descargar" link. The whole
//! page is scanned at once; pagination does not apply.

use crate::html::{ancestor_named, stripped_text};
use crate::models::DocumentRecord;
use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};
use url::Url;

const DOWNLOAD_LABEL: &str = "descargar";
const BLOCK_TAGS: [&str; 3] = ["section", "div", "article"];

static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").expect("valid selector"));
static HEADING_OR_PARAGRAPH: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h3, h4, p").expect("valid selector"));

/// Every download offer on the page, in document order of its link.
///
/// Offers without a title or a resolvable link are dropped, then repeated
/// download URLs keep only their first occurrence.
#[instrument(level = "info", skip_all, fields(page = %page_url))]
pub fn extract_documents(html: &str, page_url: &Url) -> Vec<DocumentRecord> {
    let document = Html::parse_document(html);

    let records: Vec<DocumentRecord> = document
        .select(&ANCHOR)
        .filter(|a| stripped_text(*a).eq_ignore_ascii_case(DOWNLOAD_LABEL))
        .filter_map(|a| offer_for(a, page_url))
        .filter(|doc| !doc.title.is_empty())
        .unique_by(|doc| doc.download_url.clone())
        .collect();

    debug!(count = records.len(), "Extracted download offers");
    records
}

fn offer_for(anchor: ElementRef<'_>, page_url: &Url) -> Option<DocumentRecord> {
    let block = ancestor_named(anchor, &BLOCK_TAGS)?;
    // An empty href points back at the page itself, as in any URL join.
    let href = anchor.value().attr("href")?;
    let download_url = page_url.join(href).ok()?.to_string();

    let mut nodes = block.select(&HEADING_OR_PARAGRAPH);
    let heading = nodes
        .by_ref()
        .find(|el| matches!(el.value().name(), "h3" | "h4"));
    let description = heading
        .and_then(|_| nodes.find(|el| el.value().name() == "p"))
        .map(stripped_text)
        .unwrap_or_default();

    Some(DocumentRecord {
        title: heading.map(stripped_text).unwrap_or_default(),
        description,
        download_url,
    })
}
