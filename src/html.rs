//! Small query helpers over a parsed `scraper` tree.
//!
//! Every site rule is built from "first match or nothing" lookups; these
//! helpers keep that pattern in one place.

use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

/// First element under `scope` matching `selector`.
pub fn first<'a>(scope: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    scope.select(selector).next()
}

/// First element anywhere in `document` matching `selector`.
pub fn first_in<'a>(document: &'a Html, selector: &Selector) -> Option<ElementRef<'a>> {
    document.select(selector).next()
}

/// Text of an element with every text node trimmed and empty ones dropped,
/// concatenated without a separator.
pub fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// [`stripped_text`] of the first match, or an empty string.
pub fn first_text(scope: ElementRef<'_>, selector: &Selector) -> String {
    first(scope, selector).map(stripped_text).unwrap_or_default()
}

/// Text of every match, one per line, in document order.
pub fn joined_text(scope: ElementRef<'_>, selector: &Selector) -> String {
    scope
        .select(selector)
        .map(stripped_text)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Nearest ancestor element whose tag name is one of `names`.
pub fn ancestor_named<'a>(element: ElementRef<'a>, names: &[&str]) -> Option<ElementRef<'a>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| names.contains(&el.value().name()))
}

/// Trimmed text of the node right after `element`, whether it is a bare
/// text node or another element.
pub fn next_sibling_text(element: ElementRef<'_>) -> String {
    let Some(sibling) = element.next_sibling() else {
        return String::new();
    };
    match sibling.value() {
        Node::Text(text) => text.trim().to_string(),
        Node::Element(_) => ElementRef::wrap(sibling)
            .map(stripped_text)
            .unwrap_or_default(),
        _ => String::new(),
    }
}

/// Resolve `attr` of every match against `base`, skipping elements without
/// the attribute or with a value that does not resolve.
pub fn resolved_attrs(
    scope: ElementRef<'_>,
    selector: &Selector,
    attr: &str,
    base: &Url,
) -> Vec<String> {
    scope
        .select(selector)
        .filter_map(|el| resolve_attr(el, attr, base))
        .collect()
}

/// Resolve one attribute of `element` against `base`.
pub fn resolve_attr(element: ElementRef<'_>, attr: &str, base: &Url) -> Option<String> {
    let value = element.value().attr(attr)?;
    if value.is_empty() {
        return None;
    }
    base.join(value).ok().map(String::from)
}
