//! Walk a paginated listing and collect its article URLs.
//!
//! Page 1 is the base URL as given; page N is the base URL plus a `p=N`
//! query parameter. The walk stops at the first page that fails to fetch,
//! the first page with no listing items, or after `max_pages`.

use crate::fetch::PageFetcher;
use crate::models::ListingResult;
use crate::sites::Site;
use scraper::Html;
use tracing::{debug, info, instrument, warn};
use url::Url;

pub const DEFAULT_MAX_PAGES: usize = 100;

/// URL of listing page `page` (1-based).
pub fn page_url(base_url: &str, page: usize) -> String {
    if page <= 1 {
        base_url.to_string()
    } else if base_url.contains('?') {
        format!("{base_url}&p={page}")
    } else {
        format!("{base_url}?p={page}")
    }
}

/// Walk the listing at `base_url` with `site`'s listing rule.
#[instrument(level = "info", skip(fetcher))]
pub async fn walk(
    fetcher: &PageFetcher,
    site: Site,
    base_url: &str,
    max_pages: usize,
) -> ListingResult {
    let mut result = ListingResult::default();

    for page in 1..=max_pages {
        let url = page_url(base_url, page);
        let html = match fetcher.fetch(&url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(%url, error = %e, "Listing page fetch failed; stopping");
                break;
            }
        };
        let page_link = match Url::parse(&url) {
            Ok(u) => u,
            Err(e) => {
                warn!(%url, error = %e, "Listing page URL does not parse; stopping");
                break;
            }
        };

        let Some(links) = scan_page(site, &html, &page_link, page == 1, &mut result) else {
            debug!(page, "No listing items; stopping");
            break;
        };
        debug!(page, links = links, "Scanned listing page");
        result.page_count = page;
    }

    info!(
        pages = result.page_count,
        urls = result.article_urls.len(),
        "Listing walk finished"
    );
    result
}

/// Parse one listing page, appending its links. Returns how many links it
/// contributed, or `None` when it holds no listing items.
fn scan_page(
    site: Site,
    html: &str,
    page_url: &Url,
    first_page: bool,
    result: &mut ListingResult,
) -> Option<usize> {
    let document = Html::parse_document(html);
    if first_page {
        result.listing_title = Some(site.listing_title(&document));
    }
    let links = site.listing_links(&document, page_url)?;
    let count = links.len();
    result.article_urls.extend(links);
    Some(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> PageFetcher {
        PageFetcher::new(Duration::from_secs(5)).unwrap()
    }

    fn ftf_page(title: Option<&str>, slugs: &[&str]) -> String {
        let head = title
            .map(|t| format!("<head><title>{t}</title></head>"))
            .unwrap_or_default();
        let articles: String = slugs
            .iter()
            .map(|s| format!(r#"<article><h3><a href="/noticias/{s}">{s}</a></h3></article>"#))
            .collect();
        format!("<html>{head}<body>{articles}</body></html>")
    }

    async fn mount_page(server: &MockServer, page: Option<&str>, body: String) {
        let mut mock = Mock::given(method("GET")).and(path("/noticias"));
        if let Some(p) = page {
            mock = mock.and(query_param("p", p));
        }
        mock.respond_with(ResponseTemplate::new(200).set_body_string(body))
            .with_priority(if page.is_some() { 1 } else { 5 })
            .mount(server)
            .await;
    }

    #[test]
    fn test_page_url_first_page_is_verbatim() {
        assert_eq!(page_url("https://www.ftf.es/noticias", 1), "https://www.ftf.es/noticias");
    }

    #[test]
    fn test_page_url_appends_query() {
        assert_eq!(page_url("https://www.ftf.es/noticias", 2), "https://www.ftf.es/noticias?p=2");
        assert_eq!(
            page_url("https://www.ftf.es/noticias?cat=5", 2),
            "https://www.ftf.es/noticias?cat=5&p=2"
        );
    }

    #[tokio::test]
    async fn test_walk_counts_productive_pages() {
        let server = MockServer::start().await;
        mount_page(&server, None, ftf_page(Some(" Actualidad "), &["a1", "a2"])).await;
        mount_page(&server, Some("2"), ftf_page(None, &["b1", "b2"])).await;
        mount_page(&server, Some("3"), ftf_page(None, &["c1", "c2"])).await;
        mount_page(&server, Some("4"), ftf_page(None, &[])).await;

        let base = format!("{}/noticias", server.uri());
        let result = walk(&fetcher(), Site::Ftf, &base, DEFAULT_MAX_PAGES).await;

        assert_eq!(result.page_count, 3);
        assert_eq!(result.listing_title.as_deref(), Some("Actualidad"));
        let expected: Vec<String> = ["a1", "a2", "b1", "b2", "c1", "c2"]
            .iter()
            .map(|s| format!("{}/noticias/{s}", server.uri()))
            .collect();
        assert_eq!(result.article_urls, expected);
    }

    #[tokio::test]
    async fn test_walk_stops_when_first_page_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let base = format!("{}/noticias", server.uri());
        let result = walk(&fetcher(), Site::Ftf, &base, DEFAULT_MAX_PAGES).await;

        assert_eq!(result, ListingResult::default());
    }

    #[tokio::test]
    async fn test_walk_stops_on_later_fetch_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/noticias"))
            .and(query_param("p", "2"))
            .respond_with(ResponseTemplate::new(503))
            .with_priority(1)
            .mount(&server)
            .await;
        mount_page(&server, None, ftf_page(Some("Listado"), &["a1"])).await;

        let base = format!("{}/noticias", server.uri());
        let result = walk(&fetcher(), Site::Ftf, &base, DEFAULT_MAX_PAGES).await;

        assert_eq!(result.page_count, 1);
        assert_eq!(result.article_urls.len(), 1);
    }

    #[tokio::test]
    async fn test_walk_respects_max_pages() {
        let server = MockServer::start().await;
        // Every page answers with the same non-empty listing.
        mount_page(&server, None, ftf_page(Some("Sin fin"), &["x"])).await;

        let base = format!("{}/noticias", server.uri());
        let result = walk(&fetcher(), Site::Ftf, &base, 3).await;

        assert_eq!(result.page_count, 3);
        assert_eq!(result.article_urls.len(), 3);
    }

    #[tokio::test]
    async fn test_walk_keeps_existing_query_string() {
        let server = MockServer::start().await;
        let body = r#"<html><body><h1>Noticias</h1><section class="container">
            <div class="item"><a href="/noticias/ver/7">7</a></div></section></body></html>"#;
        Mock::given(method("GET"))
            .and(path("/noticias"))
            .and(query_param("cat", "5"))
            .and(query_param("p", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/noticias"))
            .and(query_param("cat", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .with_priority(5)
            .mount(&server)
            .await;

        let base = format!("{}/noticias?cat=5", server.uri());
        let result = walk(&fetcher(), Site::Fiflp, &base, DEFAULT_MAX_PAGES).await;

        assert_eq!(result.page_count, 1);
        assert_eq!(result.listing_title.as_deref(), Some("Noticias"));
        assert_eq!(
            result.article_urls,
            vec![format!("{}/noticias/ver/7", server.uri())]
        );
    }
}
