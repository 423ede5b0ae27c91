//! Federación Interinsular de Fútbol de Las Palmas (`www.fiflp.com`).
//!
//! Listing pages keep their items as `div.item` blocks inside
//! `section.container`. Article pages split the headline and byline
//! (`header.blog-post`) from the body text (`<article>`) and the gallery
//! (`section.container`), so no field depends on another being present.

use crate::html::{
    first, first_in, first_text, joined_text, resolve_attr, resolved_attrs, stripped_text,
};
use crate::models::ArticleRecord;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::instrument;
use url::Url;

static H1: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").expect("valid selector"));
static CONTAINER: Lazy<Selector> =
    Lazy::new(|| Selector::parse("section.container").expect("valid selector"));
static ITEM: Lazy<Selector> = Lazy::new(|| Selector::parse("div.item").expect("valid selector"));
static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").expect("valid selector"));
static HEADER: Lazy<Selector> =
    Lazy::new(|| Selector::parse("header.blog-post").expect("valid selector"));
static BYLINE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("small.fsize13").expect("valid selector"));
static SPAN: Lazy<Selector> = Lazy::new(|| Selector::parse("span").expect("valid selector"));
static ARTICLE: Lazy<Selector> = Lazy::new(|| Selector::parse("article").expect("valid selector"));
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").expect("valid selector"));
static IMAGE: Lazy<Selector> = Lazy::new(|| Selector::parse("img").expect("valid selector"));

/// Title of a listing page.
///
/// # Returns
///
/// The stripped text of the first `<h1>`, or an empty string when the page
/// has none.
pub fn listing_title(document: &Html) -> String {
    first_in(document, &H1).map(stripped_text).unwrap_or_default()
}

/// Article links of one listing page.
///
/// Takes the first `<a>` of every `div.item` inside the first
/// `section.container`, resolved against the page URL.
///
/// # Arguments
///
/// * `document` - Parsed listing page
/// * `page_url` - URL the page was fetched from, used to resolve relative links
///
/// # Returns
///
/// The resolved links, or `None` when the container is missing or holds no
/// items, which ends the listing walk.
pub fn listing_links(document: &Html, page_url: &Url) -> Option<Vec<String>> {
    let section = first_in(document, &CONTAINER)?;
    let mut items = section.select(&ITEM).peekable();
    items.peek()?;

    let links = items
        .filter_map(|item| first(item, &ANCHOR))
        .filter_map(|a| resolve_attr(a, "href", page_url))
        .collect();
    Some(links)
}

/// Extract the article record from an article page.
///
/// Title and date come from `header.blog-post` (the `<h1>` and the second
/// byline `<span>`), body lines from the `<p>` elements of `<article>` and
/// images from `section.container`. A missing block leaves its fields empty.
///
/// # Arguments
///
/// * `document` - Parsed article page
/// * `page_url` - URL of the article, used to resolve image sources
///
/// # Returns
///
/// The [`ArticleRecord`]; this rule never fails.
#[instrument(level = "info", skip_all, fields(url = %page_url))]
pub fn extract_article(document: &Html, page_url: &Url) -> ArticleRecord {
    let header = first_in(document, &HEADER);

    let title = header.map(|h| first_text(h, &H1)).unwrap_or_default();
    let date = header
        .and_then(|h| first(h, &BYLINE))
        .and_then(|small| small.select(&SPAN).nth(1))
        .map(stripped_text)
        .unwrap_or_default();
    let body = first_in(document, &ARTICLE)
        .map(|article| joined_text(article, &PARAGRAPH))
        .unwrap_or_default();
    let images = first_in(document, &CONTAINER)
        .map(|section| resolved_attrs(section, &IMAGE, "src", page_url))
        .unwrap_or_default();

    ArticleRecord {
        title,
        body,
        date,
        images,
    }
}
