//! `[theme]` section configuration.
//!
//! Options read by the default theme. Custom themes may ignore them.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[theme]` section in folio.toml.
///
/// # Example
/// ```toml
/// [theme]
/// title_separator = " · "
/// stylesheets = ["/styles.css", "/highlight.css"]
/// footer_links = [{ text = "GitHub", href = "https://github.com/me" }]
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeOptions {
    /// Placed between a location title and the site name in `<title>`.
    #[serde(default = "defaults::theme::title_separator")]
    #[educe(Default = defaults::theme::title_separator())]
    pub title_separator: String,

    /// Stylesheet hrefs linked from every page.
    #[serde(default = "defaults::theme::stylesheets")]
    #[educe(Default = defaults::theme::stylesheets())]
    pub stylesheets: Vec<String>,

    /// Show links to every section in the header.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub navigation: bool,

    /// Feed link text, defaults to `Subscribe to {site name}`.
    pub feed_title: Option<String>,

    pub footer_links: Vec<FooterLink>,

    /// Raw, trusted HTML appended to every `<head>`.
    pub head_elements: Vec<String>,

    /// Site path of the RSS feed, set from `[build.feed]` when enabled.
    #[serde(skip)]
    pub feed_path: Option<String>,
}

/// A link rendered in the page footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FooterLink {
    pub text: String,
    pub href: String,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    const SITE: &str = r#"
        [site]
        name = "Test"
        url = "https://example.com"
    "#;

    #[test]
    fn test_theme_defaults() {
        let config: SiteConfig = toml::from_str(SITE).unwrap();

        assert_eq!(config.theme.title_separator, " | ");
        assert_eq!(config.theme.stylesheets, ["/styles.css"]);
        assert!(config.theme.navigation);
        assert!(config.theme.feed_title.is_none());
        assert!(config.theme.footer_links.is_empty());
        assert!(config.theme.feed_path.is_none());
    }

    #[test]
    fn test_theme_full() {
        let config = format!(
            r#"{SITE}
            [theme]
            title_separator = " - "
            stylesheets = []
            navigation = false
            feed_title = "RSS"
            footer_links = [{{ text = "GitHub", href = "https://github.com/me" }}]
            head_elements = ['<meta name="x" content="y">']
        "#
        );
        let config: SiteConfig = toml::from_str(&config).unwrap();

        assert_eq!(config.theme.title_separator, " - ");
        assert!(config.theme.stylesheets.is_empty());
        assert!(!config.theme.navigation);
        assert_eq!(config.theme.feed_title.as_deref(), Some("RSS"));
        assert_eq!(config.theme.footer_links[0].text, "GitHub");
        assert_eq!(config.theme.head_elements.len(), 1);
    }

    #[test]
    fn test_feed_path_is_not_configurable() {
        let config = format!("{SITE}\n[theme]\nfeed_path = \"x.rss\"\n");
        assert!(toml::from_str::<SiteConfig>(&config).is_err());
    }
}
