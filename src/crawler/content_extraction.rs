//! Content and link extraction for crawled pages

use std::collections::HashSet;

use scraper::{ElementRef, Html, Selector};
use tracing::warn;
use url::Url;

use crate::crawler::url_filter::{normalize_link, same_authority};
use crate::crawler::{Heading, HeadingLevel, PageRecord};

/// Extract the structured content of a page.
///
/// The title comes from the first `<h1>`, falling back to the document
/// `<title>`. Body text, headings, and code snippets come from the main
/// content root: the first `<main>`, `<article>`, or `<div class="content">`
/// element, in that order of precedence. Pages without a main content root
/// produce a record with an empty body; the crawl loop discards those.
pub fn extract_content(document: &Html, url: &str) -> PageRecord {
    let mut record = PageRecord {
        url: url.to_string(),
        title: String::new(),
        content: String::new(),
        headings: Vec::new(),
        code_snippets: Vec::new(),
        links: Vec::new(),
    };

    if let Some(title) = first_text(document, "h1").or_else(|| first_text(document, "title")) {
        record.title = title;
    }

    let Some(root) = main_content_root(document) else {
        return record;
    };

    record.content = joined_text(root);

    match Selector::parse("h1, h2, h3, h4, h5, h6") {
        Ok(selector) => {
            for element in root.select(&selector) {
                if let Some(level) = HeadingLevel::from_tag(element.value().name()) {
                    record.headings.push(Heading {
                        level,
                        text: joined_text(element),
                    });
                }
            }
        }
        Err(e) => warn!("Failed to parse heading selector: {}", e),
    }

    match Selector::parse("code, pre") {
        Ok(selector) => {
            for element in root.select(&selector) {
                let snippet = joined_text(element);
                // Very short snippets are inline noise
                if snippet.chars().count() > 10 {
                    record.code_snippets.push(snippet);
                }
            }
        }
        Err(e) => warn!("Failed to parse code selector: {}", e),
    }

    record
}

/// Extract the same-domain links of a page, in document order.
///
/// Every anchor href is resolved against `current_url` and normalized
/// (fragment and query stripped). Links pointing off-domain relative to
/// `base_url`, or already present in `visited`, are dropped.
pub fn extract_links(
    document: &Html,
    current_url: &Url,
    base_url: &Url,
    visited: &HashSet<String>,
) -> Vec<String> {
    let selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(e) => {
            warn!("Failed to parse anchor selector: {}", e);
            return Vec::new();
        }
    };

    let mut links = Vec::new();
    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Some(resolved) = normalize_link(href, current_url) else {
            continue;
        };
        if !same_authority(&resolved, base_url) {
            continue;
        }
        let link = resolved.to_string();
        if !visited.contains(&link) {
            links.push(link);
        }
    }
    links
}

/// First element matching `selector_str`, as trimmed joined text
fn first_text(document: &Html, selector_str: &str) -> Option<String> {
    let selector = match Selector::parse(selector_str) {
        Ok(selector) => selector,
        Err(e) => {
            warn!("Failed to parse selector '{}': {}", selector_str, e);
            return None;
        }
    };
    document.select(&selector).next().map(joined_text)
}

/// The main content root of a document, if it has one
fn main_content_root(document: &Html) -> Option<ElementRef<'_>> {
    for selector_str in ["main", "article", "div.content"] {
        match Selector::parse(selector_str) {
            Ok(selector) => {
                if let Some(element) = document.select(&selector).next() {
                    return Some(element);
                }
            }
            Err(e) => warn!("Failed to parse selector '{}': {}", selector_str, e),
        }
    }
    None
}

/// Text of an element with each segment trimmed, joined by single spaces
fn joined_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> Html {
        Html::parse_document(html)
    }

    #[test]
    fn test_title_prefers_h1_over_title_tag() {
        let doc = parse(
            "<html><head><title>Doc Title</title></head>\
             <body><h1>Page Heading</h1><main><p>body</p></main></body></html>",
        );
        let record = extract_content(&doc, "https://docs.x.com/a");
        assert_eq!(record.title, "Page Heading");
    }

    #[test]
    fn test_title_falls_back_to_title_tag() {
        let doc = parse("<html><head><title>Doc Title</title></head><body></body></html>");
        let record = extract_content(&doc, "https://docs.x.com/a");
        assert_eq!(record.title, "Doc Title");
    }

    #[test]
    fn test_no_main_root_yields_empty_content() {
        let doc = parse(
            "<html><body><h1>Lonely Heading</h1><div><p>not the content root</p></div></body></html>",
        );
        let record = extract_content(&doc, "https://docs.x.com/a");
        assert_eq!(record.title, "Lonely Heading");
        assert!(record.content.is_empty());
        assert!(record.headings.is_empty());
        assert!(record.code_snippets.is_empty());
    }

    #[test]
    fn test_main_root_precedence() {
        let doc = parse(
            "<html><body>\
             <div class=\"content\"><p>div text</p></div>\
             <article><p>article text</p></article>\
             <main><p>main text</p></main>\
             </body></html>",
        );
        let record = extract_content(&doc, "https://docs.x.com/a");
        assert_eq!(record.content, "main text");
    }

    #[test]
    fn test_headings_in_document_order_with_levels() {
        let doc = parse(
            "<html><body><main>\
             <h2>Setup</h2><p>text</p><h3>Linux</h3><h3>macOS</h3>\
             </main></body></html>",
        );
        let record = extract_content(&doc, "https://docs.x.com/a");
        let levels: Vec<_> = record.headings.iter().map(|h| h.level).collect();
        let texts: Vec<_> = record.headings.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(
            levels,
            vec![HeadingLevel::H2, HeadingLevel::H3, HeadingLevel::H3]
        );
        assert_eq!(texts, vec!["Setup", "Linux", "macOS"]);
    }

    #[test]
    fn test_code_snippet_length_filter() {
        let doc = parse(
            "<html><body><main>\
             <code>short</code>\
             <code>cargo install x</code>\
             </main></body></html>",
        );
        let record = extract_content(&doc, "https://docs.x.com/a");
        assert_eq!(record.code_snippets, vec!["cargo install x"]);
    }

    #[test]
    fn test_content_whitespace_joined() {
        let doc = parse(
            "<html><body><main><p>  first  </p>\n<p>second</p></main></body></html>",
        );
        let record = extract_content(&doc, "https://docs.x.com/a");
        assert_eq!(record.content, "first second");
    }

    #[test]
    fn test_extract_links_filters_and_normalizes() {
        let doc = parse(
            "<html><body>\
             <a href=\"/guide?v=2#intro\">guide</a>\
             <a href=\"https://other.com/x\">elsewhere</a>\
             <a href=\"/visited\">seen</a>\
             <a href=\"api/auth\">auth</a>\
             </body></html>",
        );
        let current = Url::parse("https://docs.x.com/start/").unwrap();
        let base = Url::parse("https://docs.x.com/").unwrap();
        let visited = HashSet::from(["https://docs.x.com/visited".to_string()]);

        let links = extract_links(&doc, &current, &base, &visited);
        assert_eq!(
            links,
            vec![
                "https://docs.x.com/guide".to_string(),
                "https://docs.x.com/start/api/auth".to_string(),
            ]
        );
    }
}
