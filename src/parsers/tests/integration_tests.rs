use crate::parsers::{ParseResult, Parser};
use url::Url;

#[cfg(test)]
mod tests {
    use super::*;

    const LANDING_PAGE: &str = r##"<!DOCTYPE html>
<html>
<head><title>Acme Rockets</title><style>body { margin: 0 }</style></head>
<body>
  <nav><a href="/">Home</a> <a href="#main">Skip</a></nav>
  <main id="main">
    <h1>Acme Rockets</h1>
    <p>Reusable launch vehicles.</p>
    <a href="/about">About us</a>
    <a href="/careers">Join us</a>
  </main>
  <footer><a href="/privacy">Privacy</a></footer>
</body>
</html>"##;

    #[test]
    fn test_parse_landing_page() {
        let url = Url::parse("https://acme.test").unwrap();
        let result = Parser::parse(LANDING_PAGE, &url);

        assert_eq!(result.title.as_deref(), Some("Acme Rockets"));
        assert_eq!(
            result.content,
            "Acme Rockets\nReusable launch vehicles.\nAbout us\nJoin us"
        );
        // Navigation and footer links are dropped along with their text
        assert_eq!(
            result.links,
            vec!["https://acme.test/about", "https://acme.test/careers"]
        );
    }

    #[test]
    fn test_chrome_only_links_are_dropped() {
        let url = Url::parse("https://acme.test").unwrap();
        let html = r#"<html><body>
            <nav><ul><li><a href="/about">About</a></li></ul></nav>
            <p>Rockets for everyone.</p>
            <footer><div><a href="/careers">Careers</a></div></footer>
            <script>document.write('<a href="/x">x</a>')</script>
        </body></html>"#;

        let result = Parser::parse(html, &url);
        assert_eq!(result.content, "Rockets for everyone.");
        assert!(result.links.is_empty(), "unexpected links: {:?}", result.links);
    }

    #[test]
    fn test_every_link_is_absolute() {
        let url = Url::parse("https://acme.test/products/index.html").unwrap();
        let result = Parser::parse(LANDING_PAGE, &url);
        for link in &result.links {
            assert!(Url::parse(link).is_ok(), "not absolute: {link}");
            assert!(!link.starts_with('#'));
        }
    }

    #[test]
    fn test_parse_from_url_with_bad_base() {
        let result = Parser::parse_from_url(LANDING_PAGE, "not a url");
        assert_eq!(result.title.as_deref(), Some("Acme Rockets"));
        assert!(result.links.is_empty());
    }

    #[test]
    fn test_parse_fragment_without_markup() {
        let url = Url::parse("https://acme.test").unwrap();
        let result = Parser::parse("just some words", &url);
        assert_eq!(result, ParseResult::new(None, "just some words".to_string(), vec![]));

        let result = Parser::parse("", &url);
        assert_eq!(result, ParseResult::empty());
    }
}
