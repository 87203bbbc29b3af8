//! The built-in blog theme.
//!
//! Every page shares the same frame: a header with the site name (and,
//! optionally, section navigation), a `wrapper` div holding the page
//! content and a footer with the feed link and configured footer links.

use super::{Theme, head::HeadMeta};
use crate::{
    config::{Site, ThemeOptions},
    content::{Index, Item, Location, Page, Section, SectionId, Tag, TagDetails, TagList, Video},
    html::{Document, Element, Node, el, group, link, raw, text},
    utils::{date, slug::href},
};

const PROJECT_URL: &str = "https://github.com/folio-ssg/folio";

pub struct DefaultTheme {
    options: ThemeOptions,
}

impl DefaultTheme {
    pub fn new(options: ThemeOptions) -> Self {
        Self { options }
    }

    fn document<L: Location + ?Sized>(
        &self,
        site: &Site,
        location: &L,
        selected: Option<&SectionId>,
        body_class: Option<&str>,
        content: Vec<Node>,
    ) -> Document {
        let meta = HeadMeta::resolve(location, site, &self.options.title_separator);
        let body = el("body")
            .attr_opt("class", body_class)
            .child(self.header(site, selected))
            .child(wrapper(content))
            .child(self.footer());
        Document::new(site.language.clone(), meta.to_nodes(site, &self.options), body)
    }

    fn header(&self, site: &Site, selected: Option<&SectionId>) -> Element {
        let nav = (self.options.navigation && site.sections.len() > 1).then(|| {
            el("nav").child(el("ul").children(site.sections.iter().map(|id| {
                let class = if Some(id) == selected { "selected" } else { "" };
                el("li").child(
                    link(href(id.as_str()), id.default_title()).attr_opt(
                        "class",
                        (!class.is_empty()).then_some(class),
                    ),
                )
            })))
        });

        el("header").child(wrapper(vec![
            el("a")
                .class("site-name")
                .attr("href", "/")
                .child(text(site.name.clone()))
                .into(),
            nav.into(),
        ]))
    }

    fn footer(&self) -> Element {
        let mut links: Vec<Node> = Vec::new();
        if let Some(feed) = &self.options.feed_path {
            links.push(link(href(feed), "RSS feed").into());
        }
        for footer_link in &self.options.footer_links {
            if !links.is_empty() {
                links.push(text(" | "));
            }
            links.push(
                link(footer_link.href.clone(), footer_link.text.clone())
                    .attr("target", "_blank")
                    .into(),
            );
        }

        el("footer")
            .child(
                el("p").child(text("Generated using ")).child(
                    link(PROJECT_URL, "folio").attr("target", "_blank"),
                ),
            )
            .child((!links.is_empty()).then(|| el("p").children(links)))
    }
}

impl Theme for DefaultTheme {
    fn render_index(&self, site: &Site, items: &[&Item]) -> Document {
        self.document(site, &Index, None, None, vec![item_list(site, items).into()])
    }

    fn render_section(&self, site: &Site, section: &Section) -> Document {
        let items: Vec<&Item> = section.items.iter().collect();
        self.document(
            site,
            section,
            Some(&section.id),
            None,
            vec![
                el("h1").child(text(section.title.clone())).into(),
                content_body(&section.body),
                item_list(site, &items).into(),
            ],
        )
    }

    fn render_item(&self, site: &Site, item: &Item) -> Document {
        let article = el("article")
            .child(
                el("div")
                    .class("content")
                    .child(el("h1").child(text(item.title.clone())))
                    .child(
                        el("p")
                            .class("date")
                            .child(text(date::format_medium(&item.date))),
                    )
                    .child(content_body(&item.body))
                    .child(item.video.as_ref().map(video_player)),
            )
            .child(el("span").child(text("Tagged with: ")))
            .child(tag_list(site, item));

        self.document(
            site,
            item,
            Some(&item.section),
            Some("item-page"),
            vec![article.into()],
        )
    }

    fn render_page(&self, site: &Site, page: &Page) -> Document {
        self.document(site, page, None, None, vec![content_body(&page.body)])
    }

    fn render_tag_list(&self, site: &Site, tags: &[&Tag]) -> Document {
        let all_tags = el("ul").class("all-tags").children(tags.iter().map(|tag| {
            el("li")
                .class("tag")
                .child(link(href(&site.path_for_tag(tag)), tag.as_str()))
        }));

        self.document(
            site,
            &TagList,
            None,
            None,
            vec![
                el("h1").child(text("Browse all tags")).into(),
                all_tags.into(),
            ],
        )
    }

    fn render_tag_details(&self, site: &Site, tag: &Tag, items: &[&Item]) -> Document {
        let heading = el("h1")
            .child(text("Tagged with "))
            .child(el("span").class("tag").child(text(tag.as_str())));
        let browse_all = link(href(site.tag_list_path()), "Browse all tags").class("browse-all");

        self.document(
            site,
            &TagDetails::new(tag),
            None,
            None,
            vec![
                heading.into(),
                browse_all.into(),
                item_list(site, items).into(),
            ],
        )
    }
}

fn wrapper(nodes: Vec<Node>) -> Element {
    el("div").class("wrapper").child(group(nodes))
}

/// Pre-rendered HTML bodies are trusted.
fn content_body(body: &str) -> Node {
    if body.is_empty() {
        Node::Empty
    } else {
        raw(body)
    }
}

fn item_list(site: &Site, items: &[&Item]) -> Element {
    el("ul").class("item-list").children(items.iter().map(|item| {
        el("li").child(
            el("article")
                .child(
                    el("aside")
                        .class("date")
                        .child(text(date::format_medium(&item.date))),
                )
                .child(link(href(&item.path()), item.title.clone()))
                .child(
                    (!item.description.is_empty())
                        .then(|| el("h2").child(text(item.description.clone()))),
                )
                .child(tag_list(site, item)),
        )
    }))
}

fn tag_list(site: &Site, item: &Item) -> Element {
    el("ul").class("tag-list").children(item.tags.iter().map(|tag| {
        el("li").child(link(href(&site.path_for_tag(tag)), tag.as_str()))
    }))
}

fn video_player(video: &Video) -> Node {
    match video {
        Video::Youtube(id) => embed(format!("https://www.youtube-nocookie.com/embed/{id}")),
        Video::Vimeo(id) => embed(format!("https://player.vimeo.com/video/{id}")),
        Video::Url(url) => el("video")
            .attr("controls", "")
            .child(el("source").attr("src", url.clone()))
            .into(),
    }
}

fn embed(src: String) -> Node {
    el("div")
        .class("video-player")
        .child(
            el("iframe")
                .attr("frameborder", "0")
                .attr("allow", "accelerometer; encrypted-media; gyroscope; picture-in-picture")
                .attr("allowfullscreen", "true")
                .attr("src", src),
        )
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FooterLink;
    use std::collections::BTreeSet;

    fn site() -> Site {
        Site {
            name: "bekditlevsen.dk".into(),
            url: "https://bekditlevsen.dk".into(),
            description: "Blog about Swift and Firebase".into(),
            sections: vec![SectionId::new("swift-evolution"), SectionId::new("firebase")],
            ..Site::default()
        }
    }

    fn item(slug: &str, day: &str, tags: &[&str]) -> Item {
        Item {
            section: SectionId::new("firebase"),
            slug: slug.into(),
            title: format!("Post {slug}"),
            description: format!("About {slug}"),
            body: format!("<p>{slug} body</p>"),
            date: date::parse(day).unwrap(),
            tags: tags.iter().map(|t| Tag::new(*t)).collect::<BTreeSet<_>>(),
            image_path: None,
            video: None,
        }
    }

    fn render(doc: Document) -> String {
        String::from_utf8(doc.to_bytes().unwrap()).unwrap()
    }

    fn theme() -> DefaultTheme {
        DefaultTheme::new(ThemeOptions {
            feed_path: Some("feed.rss".into()),
            footer_links: vec![FooterLink {
                text: "GitHub".into(),
                href: "https://github.com/me".into(),
            }],
            ..ThemeOptions::default()
        })
    }

    #[test]
    fn test_index_lists_items_in_given_order() {
        let (a, b) = (item("a", "2024-01-01", &["x"]), item("b", "2024-02-01", &["x", "y"]));
        let html = render(theme().render_index(&site(), &[&b, &a]));

        assert!(html.starts_with("<!DOCTYPE html><html lang=\"en\">"));
        assert!(html.contains("<title>bekditlevsen.dk</title>"));
        let (pos_b, pos_a) = (
            html.find(r#"href="/firebase/b""#).unwrap(),
            html.find(r#"href="/firebase/a""#).unwrap(),
        );
        assert!(pos_b < pos_a);
        assert!(html.contains(r#"<aside class="date">Feb 1, 2024</aside>"#));
        assert!(html.contains(r#"<a href="/tags/y">y</a>"#));
    }

    #[test]
    fn test_item_page() {
        let mut post = item("a", "2024-01-01", &["Swift UI"]);
        post.video = Some(Video::Youtube("abc123".into()));
        let html = render(theme().render_item(&site(), &post));

        assert!(html.contains(r#"<body class="item-page">"#));
        assert!(html.contains("<title>Post a | bekditlevsen.dk</title>"));
        assert!(html.contains("<p>a body</p>"));
        assert!(html.contains("https://www.youtube-nocookie.com/embed/abc123"));
        assert!(html.contains(r#"<a href="/tags/swift-ui">Swift UI</a>"#));
        assert!(html.contains(r#"<a href="/firebase" class="selected">Firebase</a>"#));
    }

    #[test]
    fn test_section_page() {
        let mut section = Section::new(SectionId::new("firebase"));
        section.body = "<p>intro</p>".into();
        section.items.push(item("a", "2024-01-01", &[]));
        let html = render(theme().render_section(&site(), &section));

        assert!(html.contains("<h1>Firebase</h1><p>intro</p>"));
        assert!(html.contains(r#"<ul class="item-list">"#));
    }

    #[test]
    fn test_tag_pages() {
        let (x, y) = (Tag::new("x"), Tag::new("y"));
        let html = render(theme().render_tag_list(&site(), &[&x, &y]));
        assert!(html.contains("<h1>Browse all tags</h1>"));
        assert!(html.contains(r#"<li class="tag"><a href="/tags/x">x</a></li>"#));

        let post = item("a", "2024-01-01", &["x"]);
        let html = render(theme().render_tag_details(&site(), &x, &[&post]));
        assert!(html.contains(r#"<h1>Tagged with <span class="tag">x</span></h1>"#));
        assert!(html.contains(r#"<a href="/tags" class="browse-all">Browse all tags</a>"#));
        assert!(html.contains("<title>Tagged with x | bekditlevsen.dk</title>"));
    }

    #[test]
    fn test_page_and_footer() {
        let page = Page {
            path: "about".into(),
            title: "About".into(),
            description: String::new(),
            body: "<p>me</p>".into(),
            image_path: None,
        };
        let html = render(theme().render_page(&site(), &page));

        assert!(html.contains(r#"<div class="wrapper"><p>me</p></div>"#));
        assert!(html.contains(r#"<a href="/feed.rss">RSS feed</a> | <a href="https://github.com/me" target="_blank">GitHub</a>"#));
        assert!(html.contains("Generated using "));
    }

    #[test]
    fn test_navigation_hidden_for_single_section() {
        let site = Site {
            sections: vec![SectionId::new("posts")],
            ..site()
        };
        let html = render(theme().render_page(
            &site,
            &Page {
                path: "about".into(),
                title: String::new(),
                description: String::new(),
                body: String::new(),
                image_path: None,
            },
        ));
        assert!(!html.contains("<nav>"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let post = item("a", "2024-01-01", &["x", "y"]);
        let theme = theme();
        assert_eq!(
            theme.render_item(&site(), &post).to_bytes().unwrap(),
            theme.render_item(&site(), &post).to_bytes().unwrap()
        );
    }
}
