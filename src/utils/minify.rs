//! Minification for rendered HTML and generated XML.

use std::borrow::Cow;

/// Content type for minification.
pub enum MinifyType<'a> {
    /// HTML content
    Html(&'a [u8]),
    /// XML content (feed, sitemap)
    Xml(&'a [u8]),
}

/// Minify content when `enabled`.
///
/// Returns `Cow::Borrowed` if minify is disabled, `Cow::Owned` otherwise.
pub fn minify(content: MinifyType<'_>, enabled: bool) -> Cow<'_, [u8]> {
    match (content, enabled) {
        (MinifyType::Html(html), false) => Cow::Borrowed(html),
        (MinifyType::Xml(xml), false) => Cow::Borrowed(xml),
        (MinifyType::Html(html), true) => Cow::Owned(minify_html_inner(html)),
        (MinifyType::Xml(xml), true) => Cow::Owned(minify_xml_inner(xml)),
    }
}

/// Minify HTML content using `minify_html` crate.
fn minify_html_inner(html: &[u8]) -> Vec<u8> {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.minify_js = true;
    minify_html::minify(html, &cfg)
}

/// Minify XML by dropping indentation and blank lines.
fn minify_xml_inner(xml: &[u8]) -> Vec<u8> {
    String::from_utf8_lossy(xml)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<String>()
        .into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minify_disabled_borrows() {
        let html = b"<html>\n  <body>\n  </body>\n</html>";
        let result = minify(MinifyType::Html(html), false);
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(&*result, html);
    }

    #[test]
    fn test_minify_html_shrinks() {
        let html = b"<html>\n  <head>\n  </head>\n  <body>\n    <p>Hello</p>\n  </body>\n</html>";
        let minified = minify(MinifyType::Html(html), true);
        let text = String::from_utf8_lossy(&minified);

        assert!(minified.len() < html.len());
        assert!(text.contains("<p>Hello</p>"));
    }

    #[test]
    fn test_minify_xml() {
        let xml = b"<?xml version=\"1.0\"?>\n<urlset>\n  <url>\n    <loc>https://example.com/</loc>\n  </url>\n</urlset>\n";
        let result = minify(MinifyType::Xml(xml), true);
        assert_eq!(
            String::from_utf8_lossy(&result),
            "<?xml version=\"1.0\"?><urlset><url><loc>https://example.com/</loc></url></urlset>"
        );
    }

    #[test]
    fn test_minify_is_deterministic() {
        let html = b"<div>\n  <p>a</p>\n  <p>b</p>\n</div>";
        let a = minify(MinifyType::Html(html), true).into_owned();
        let b = minify(MinifyType::Html(html), true).into_owned();
        assert_eq!(a, b);
    }
}
