//! Per-site parsing rules.
//!
//! Each supported federation site has its own module with a listing rule
//! (article links and the listing's display title) and an article rule.
//! [`Site`] is the closed set of supported domains and dispatches to them.
//!
//! # Supported Sites
//!
//! | Site | Host | Module | Short name |
//! |------|------|--------|------------|
//! | Federación Tinerfeña de Fútbol | `www.ftf.es` | [`ftf`] | `ftf` |
//! | Federación Interinsular de Fútbol de Las Palmas | `www.fiflp.com` | [`fiflp`] | `fiflp` |
//!
//! Any other host is [`ScrapeError::UnsupportedDomain`].

pub mod fiflp;
pub mod ftf;

use crate::error::ScrapeError;
use crate::models::ArticleRecord;
use scraper::Html;
use std::fmt;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Site {
    Ftf,
    Fiflp,
}

impl Site {
    pub const ALL: [Site; 2] = [Site::Ftf, Site::Fiflp];

    /// Look up the rule for a network host such as `www.ftf.es`.
    pub fn from_host(host: &str) -> Result<Self, ScrapeError> {
        Site::ALL
            .into_iter()
            .find(|site| site.host() == host)
            .ok_or_else(|| ScrapeError::UnsupportedDomain(host.to_string()))
    }

    pub fn from_url(url: &Url) -> Result<Self, ScrapeError> {
        Site::from_host(url.host_str().unwrap_or_default())
    }

    pub fn host(self) -> &'static str {
        match self {
            Site::Ftf => "www.ftf.es",
            Site::Fiflp => "www.fiflp.com",
        }
    }

    /// Directory name used for this site's saved articles.
    pub fn short_name(self) -> &'static str {
        match self {
            Site::Ftf => "ftf",
            Site::Fiflp => "fiflp",
        }
    }

    /// Display title of a listing, read from its first page.
    pub fn listing_title(self, document: &Html) -> String {
        match self {
            Site::Ftf => ftf::listing_title(document),
            Site::Fiflp => fiflp::listing_title(document),
        }
    }

    /// Article links on one listing page, resolved against `page_url`.
    ///
    /// `None` means the page holds no listing items at all, which ends a
    /// pagination walk. `Some` may still be empty when items carry no link.
    pub fn listing_links(self, document: &Html, page_url: &Url) -> Option<Vec<String>> {
        match self {
            Site::Ftf => ftf::listing_links(document, page_url),
            Site::Fiflp => fiflp::listing_links(document, page_url),
        }
    }

    pub fn extract_article(
        self,
        document: &Html,
        page_url: &Url,
    ) -> Result<ArticleRecord, ScrapeError> {
        match self {
            Site::Ftf => ftf::extract_article(document, page_url),
            Site::Fiflp => Ok(fiflp::extract_article(document, page_url)),
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.host())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_hosts_resolve() {
        assert_eq!(Site::from_host("www.ftf.es").unwrap(), Site::Ftf);
        assert_eq!(Site::from_host("www.fiflp.com").unwrap(), Site::Fiflp);
    }

    #[test]
    fn test_other_hosts_are_unsupported() {
        for host in ["ftf.es", "www.fiflp.es", "example.com", ""] {
            match Site::from_host(host) {
                Err(ScrapeError::UnsupportedDomain(h)) => assert_eq!(h, host),
                other => panic!("expected unsupported for {host:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_from_url_uses_host() {
        let url = Url::parse("https://www.fiflp.com/noticias?cat=5").unwrap();
        assert_eq!(Site::from_url(&url).unwrap(), Site::Fiflp);
        let url = Url::parse("http://localhost:8080/noticias").unwrap();
        assert!(Site::from_url(&url).is_err());
    }

    #[test]
    fn test_short_names() {
        assert_eq!(Site::Ftf.short_name(), "ftf");
        assert_eq!(Site::Fiflp.short_name(), "fiflp");
        assert_eq!(Site::Ftf.to_string(), "www.ftf.es");
    }
}
