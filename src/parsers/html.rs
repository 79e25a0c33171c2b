use crate::parsers::{NON_CONTENT_TAGS, ParseResult};
use scraper::{ElementRef, Html, Node, Selector};
use std::sync::LazyLock;
use url::Url;

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("title selector is valid"));
static BODY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("body selector is valid"));
static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("anchor selector is valid"));

/// Parses HTML content to extract the title, readable text and links
pub fn parse(html: &str, page_url: &Url) -> ParseResult {
    let doc = Html::parse_document(html);

    let title = extract_title(&doc);
    let content = extract_text(&doc);
    let links = extract_links(&doc, page_url);

    ::log::debug!("HTML parser found {} links", links.len());
    if !links.is_empty() {
        ::log::trace!(
            "First few links: {:?}",
            links.iter().take(5).collect::<Vec<_>>()
        );
    }

    ParseResult::new(title, content, links)
}

/// Parses HTML content but only extracts title and text (no links)
pub fn parse_text_only(html: &str) -> ParseResult {
    let doc = Html::parse_document(html);
    ParseResult::new(extract_title(&doc), extract_text(&doc), Vec::new())
}

/// Text of the first `<title>` element, if it has any
pub fn extract_title(doc: &Html) -> Option<String> {
    let title = doc
        .select(&TITLE_SELECTOR)
        .next()?
        .text()
        .collect::<String>();
    let title = title.trim();
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

/// Visible body text with non-content subtrees removed
///
/// Each text run is trimmed, empty runs are dropped and the rest are joined
/// with newlines. A document without a body has no text.
pub fn extract_text(doc: &Html) -> String {
    let Some(body) = doc.select(&BODY_SELECTOR).next() else {
        return String::new();
    };

    let mut runs = Vec::new();
    collect_text(body, &mut runs);
    runs.join("\n")
}

fn collect_text<'a>(element: ElementRef<'a>, runs: &mut Vec<&'a str>) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    runs.push(trimmed);
                }
            }
            Node::Element(el) if NON_CONTENT_TAGS.contains(&el.name()) => {}
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    collect_text(child_element, runs);
                }
            }
            _ => {}
        }
    }
}

/// Anchor targets resolved to absolute URLs
///
/// Anchors inside non-content subtrees (navigation, footer, scripts) are
/// skipped just like their text. Empty hrefs and fragment-only anchors are
/// dropped, as are hrefs that cannot be resolved against `page_url`.
pub fn extract_links(doc: &Html, page_url: &Url) -> Vec<String> {
    doc.select(&LINK_SELECTOR)
        .filter(|e| !inside_non_content(e))
        .filter_map(|e| e.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty() && !href.starts_with('#'))
        .filter_map(|href| match page_url.join(href) {
            Ok(resolved) => Some(resolved.to_string()),
            Err(e) => {
                ::log::debug!("Dropping unresolvable link {:?}: {}", href, e);
                None
            }
        })
        .collect()
}

fn inside_non_content(element: &ElementRef) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| NON_CONTENT_TAGS.contains(&ancestor.value().name()))
}
