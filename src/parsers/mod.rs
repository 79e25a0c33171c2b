pub mod html;

#[cfg(test)]
mod tests;

use url::Url;

/// Elements whose subtrees never contribute readable text
pub const NON_CONTENT_TAGS: &[&str] = &["script", "style", "img", "input", "footer", "nav"];

/// Result of parsing a fetched document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    /// Document title (if available)
    pub title: Option<String>,
    /// Visible body text, one text run per line
    pub content: String,
    /// Absolute outbound links
    pub links: Vec<String>,
}

impl ParseResult {
    /// Creates a new parse result with the given title, content and links
    pub fn new(title: Option<String>, content: String, links: Vec<String>) -> Self {
        Self {
            title,
            content,
            links,
        }
    }

    /// Creates an empty parse result
    pub fn empty() -> Self {
        Self {
            title: None,
            content: String::new(),
            links: Vec::new(),
        }
    }
}

/// Main parser that turns raw HTML into title, text and links
pub struct Parser;

impl Parser {
    /// Parse a document fetched from `page_url`
    pub fn parse(html: &str, page_url: &Url) -> ParseResult {
        html::parse(html, page_url)
    }

    /// Parse a document, resolving links against a URL string
    ///
    /// An unparseable `page_url` yields no links since nothing can be resolved.
    pub fn parse_from_url(html: &str, page_url: &str) -> ParseResult {
        match Url::parse(page_url) {
            Ok(base) => html::parse(html, &base),
            Err(e) => {
                ::log::debug!("Cannot resolve links against {}: {}", page_url, e);
                html::parse_text_only(html)
            }
        }
    }
}
