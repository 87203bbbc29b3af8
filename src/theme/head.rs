//! `<head>` metadata shared by every page.
//!
//! A location's own title, description and image win; the site-wide
//! values fill in whatever the location leaves empty.

use crate::{
    config::{Site, ThemeOptions},
    content::Location,
    html::{Node, el, meta_name, meta_property, raw, text},
    utils::slug::href,
};

/// Twitter card layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TwitterCard {
    Summary,
    SummaryLargeImage,
}

impl TwitterCard {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::SummaryLargeImage => "summary_large_image",
        }
    }
}

/// Resolved head metadata for one location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadMeta {
    pub title: String,
    pub description: String,
    /// Canonical URL of the location.
    pub url: String,
    /// Absolute social image URL: the location's image, else the site's.
    pub image_url: Option<String>,
    pub twitter_card: TwitterCard,
}

impl HeadMeta {
    pub fn resolve<L: Location + ?Sized>(location: &L, site: &Site, separator: &str) -> Self {
        let title = match location.title() {
            "" => site.name.clone(),
            title => format!("{title}{separator}{}", site.name),
        };

        let description = match location.description() {
            "" => site.description.clone(),
            description => description.to_owned(),
        };

        let own_image = location.image_path();
        let image_url = own_image
            .or(site.image_path.as_deref())
            .map(|path| site.url_for(path));

        let twitter_card = if own_image.is_some() {
            TwitterCard::SummaryLargeImage
        } else {
            TwitterCard::Summary
        };

        Self {
            title,
            description,
            url: site.url_for(&location.path()),
            image_url,
            twitter_card,
        }
    }

    /// Every `<head>` child, in a fixed order.
    pub fn to_nodes(&self, site: &Site, options: &ThemeOptions) -> Vec<Node> {
        let mut nodes: Vec<Node> = vec![
            el("meta").attr("charset", "UTF-8").into(),
            meta_property("og:site_name", site.name.clone()).into(),
            el("link")
                .attr("rel", "canonical")
                .attr("href", self.url.clone())
                .into(),
            meta_name("twitter:url", self.url.clone()).into(),
            meta_property("og:url", self.url.clone()).into(),
            el("title").child(text(self.title.clone())).into(),
            meta_name("twitter:title", self.title.clone()).into(),
            meta_property("og:title", self.title.clone()).into(),
            meta_name("description", self.description.clone()).into(),
            meta_name("twitter:description", self.description.clone()).into(),
            meta_property("og:description", self.description.clone()).into(),
            meta_name("twitter:card", self.twitter_card.as_str()).into(),
        ];

        nodes.extend(options.stylesheets.iter().map(|sheet| {
            Node::from(el("link").attr("rel", "stylesheet").attr("href", sheet.clone()))
        }));

        nodes.push(
            meta_name("viewport", "width=device-width, initial-scale=1.0").into(),
        );

        if let Some(favicon) = &site.favicon {
            let mime = mime_guess::from_path(favicon).first_or_octet_stream();
            nodes.push(
                el("link")
                    .attr("rel", "shortcut icon")
                    .attr("href", href(favicon))
                    .attr("type", mime.essence_str().to_owned())
                    .into(),
            );
        }

        if let Some(feed) = &options.feed_path {
            let title = options
                .feed_title
                .clone()
                .unwrap_or_else(|| format!("Subscribe to {}", site.name));
            nodes.push(
                el("link")
                    .attr("rel", "alternate")
                    .attr("href", href(feed))
                    .attr("type", "application/rss+xml")
                    .attr("title", title)
                    .into(),
            );
        }

        if let Some(image) = &self.image_url {
            nodes.push(meta_name("twitter:image", image.clone()).into());
            nodes.push(meta_property("og:image", image.clone()).into());
        }

        nodes.extend(options.head_elements.iter().map(|element| raw(element.clone())));
        nodes
    }
}
