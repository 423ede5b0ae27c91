//! Federación Tinerfeña de Fútbol (`www.ftf.es`).
//!
//! Listing pages hold one `<article>` per news item with the link inside its
//! `<h3>`. Article pages wrap the whole item in the first `<article>` of the
//! body; the date sits next to a `ti-calendar` icon.

use crate::error::ScrapeError;
use crate::html::{
    ancestor_named, first, first_in, first_text, joined_text, next_sibling_text, resolve_attr,
    resolved_attrs, stripped_text,
};
use crate::models::{ArticleRecord, DEFAULT_LISTING_TITLE};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};
use url::Url;

static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").expect("valid selector"));
static ARTICLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("body article").expect("valid selector"));
static H2: Lazy<Selector> = Lazy::new(|| Selector::parse("h2").expect("valid selector"));
static H3: Lazy<Selector> = Lazy::new(|| Selector::parse("h3").expect("valid selector"));
static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").expect("valid selector"));
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").expect("valid selector"));
static IMAGE: Lazy<Selector> = Lazy::new(|| Selector::parse("img").expect("valid selector"));
static CALENDAR_ICON: Lazy<Selector> =
    Lazy::new(|| Selector::parse("i.ti-calendar").expect("valid selector"));

/// Title of a listing page.
///
/// # Returns
///
/// The trimmed `<title>` text, or [`DEFAULT_LISTING_TITLE`] when the page
/// has no `<title>` element.
pub fn listing_title(document: &Html) -> String {
    first_in(document, &TITLE)
        .map(|t| t.text().collect::<String>().trim().to_string())
        .unwrap_or_else(|| DEFAULT_LISTING_TITLE.to_string())
}

/// Article links of one listing page.
///
/// Takes the first `<a>` inside the `<h3>` of every `<article>`, resolved
/// against the page URL. Articles without a heading link are skipped.
///
/// # Arguments
///
/// * `document` - Parsed listing page
/// * `page_url` - URL the page was fetched from, used to resolve relative links
///
/// # Returns
///
/// The resolved links, or `None` when the page holds no `<article>` at all,
/// which ends the listing walk.
pub fn listing_links(document: &Html, page_url: &Url) -> Option<Vec<String>> {
    let mut articles = document.select(&ARTICLE).peekable();
    articles.peek()?;

    let links = articles
        .filter_map(|article| first(article, &H3))
        .filter_map(|h3| first(h3, &ANCHOR))
        .filter_map(|a| resolve_attr(a, "href", page_url))
        .collect();
    Some(links)
}

/// Extract the article record from an article page.
///
/// Every field is read from the first `<article>` in the body: the first
/// `<h2>` as title, each `<p>` as a body line, every `<img src>` and the
/// date next to the calendar icon.
///
/// # Arguments
///
/// * `document` - Parsed article page
/// * `page_url` - URL of the article, used to resolve image sources
///
/// # Returns
///
/// The [`ArticleRecord`], or [`ScrapeError::MissingContainer`] when the page
/// has no `<article>`.
#[instrument(level = "info", skip_all, fields(url = %page_url))]
pub fn extract_article(document: &Html, page_url: &Url) -> Result<ArticleRecord, ScrapeError> {
    let article = first_in(document, &ARTICLE).ok_or_else(|| ScrapeError::MissingContainer {
        url: page_url.to_string(),
        container: "article",
    })?;

    Ok(ArticleRecord {
        title: first_text(article, &H2),
        body: joined_text(article, &PARAGRAPH),
        date: article_date(article),
        images: resolved_attrs(article, &IMAGE, "src", page_url),
    })
}

/// Date shown beside the calendar icon.
///
/// Precedence: text of the enclosing `<a>`, then of the enclosing `<li>`
/// (both minus the icon's own text), then the text right after the icon.
fn article_date(article: ElementRef<'_>) -> String {
    let Some(icon) = first(article, &CALENDAR_ICON) else {
        return String::new();
    };
    let icon_text = stripped_text(icon);

    for parent in ["a", "li"] {
        if let Some(container) = ancestor_named(icon, &[parent]) {
            let text = stripped_text(container);
            if !text.is_empty() {
                debug!(parent, "Date taken from icon's enclosing element");
                return without(&text, &icon_text).trim().to_string();
            }
        }
    }
    next_sibling_text(icon)
}

fn without(text: &str, part: &str) -> String {
    if part.is_empty() {
        text.to_string()
    } else {
        text.replace(part, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://www.ftf.es/noticias/asamblea").unwrap()
    }

    #[test]
    fn test_listing_title_trimmed() {
        let doc = Html::parse_document(
            "<html><head><title>  Noticias FTF \n</title></head><body></body></html>",
        );
        assert_eq!(listing_title(&doc), "Noticias FTF");
    }

    #[test]
    fn test_listing_title_default() {
        let doc = Html::parse_document("<html><body><article></article></body></html>");
        assert_eq!(listing_title(&doc), DEFAULT_LISTING_TITLE);
    }

    #[test]
    fn test_listing_links_from_h3_anchors() {
        let doc = Html::parse_document(
            r#"<body>
                <article><h3><a href="/noticias/1">Uno</a></h3></article>
                <article><h3>Sin enlace</h3></article>
                <article><h3><a href="https://www.ftf.es/noticias/2">Dos</a></h3></article>
                <article><a href="/ignorado">fuera del h3</a></article>
            </body>"#,
        );
        let page = Url::parse("https://www.ftf.es/noticias?p=2").unwrap();
        assert_eq!(
            listing_links(&doc, &page).unwrap(),
            vec![
                "https://www.ftf.es/noticias/1".to_string(),
                "https://www.ftf.es/noticias/2".to_string(),
            ]
        );
    }

    #[test]
    fn test_listing_without_articles_is_none() {
        let doc = Html::parse_document("<body><div>Sin resultados</div></body>");
        assert!(listing_links(&doc, &base()).is_none());
    }

    #[test]
    fn test_extract_full_article() {
        let doc = Html::parse_document(
            r#"<body><article>
                <h2> Asamblea General 2024 </h2>
                <ul><li><a href="/archivo"><i class="ti-calendar"></i> 12/03/2024</a></li></ul>
                <p>Primer párrafo.</p>
                <div><p>Segundo <strong>párrafo</strong>.</p></div>
                <img src="/img/foto1.jpg"><img alt="sin src"><img src="foto2.jpg">
            </article></body>"#,
        );
        let record = extract_article(&doc, &base()).unwrap();
        assert_eq!(record.title, "Asamblea General 2024");
        assert_eq!(record.body, "Primer párrafo.\nSegundopárrafo.");
        assert_eq!(record.date, "12/03/2024");
        assert_eq!(
            record.images,
            vec![
                "https://www.ftf.es/img/foto1.jpg".to_string(),
                "https://www.ftf.es/noticias/foto2.jpg".to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_article_is_error() {
        let doc = Html::parse_document("<body><div><h2>Título</h2></div></body>");
        let err = extract_article(&doc, &base()).unwrap_err();
        assert!(matches!(err, ScrapeError::MissingContainer { container: "article", .. }));
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let doc = Html::parse_document("<body><article><span>nada</span></article></body>");
        let record = extract_article(&doc, &base()).unwrap();
        assert_eq!(record, ArticleRecord::default());
    }

    #[test]
    fn test_date_from_list_item_without_anchor() {
        let doc = Html::parse_document(
            r#"<body><article><ul>
                <li><i class="ti-calendar">cal</i> 5 de mayo</li>
            </ul></article></body>"#,
        );
        let record = extract_article(&doc, &base()).unwrap();
        assert_eq!(record.date, "5 de mayo");
    }

    #[test]
    fn test_date_from_next_sibling() {
        let doc = Html::parse_document(
            r#"<body><article>
                <span><i class="ti-calendar"></i> 01/02/2024 </span>
            </article></body>"#,
        );
        let record = extract_article(&doc, &base()).unwrap();
        assert_eq!(record.date, "01/02/2024");
    }

    #[test]
    fn test_anchor_text_wins_over_list_item() {
        let doc = Html::parse_document(
            r#"<body><article><ul>
                <li>Publicado <a href="/x"><i class="ti-calendar"></i>03/04/2024</a></li>
            </ul></article></body>"#,
        );
        let record = extract_article(&doc, &base()).unwrap();
        assert_eq!(record.date, "03/04/2024");
    }
}
