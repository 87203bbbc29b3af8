//! RSS feed generation.
//!
//! The feed lists the newest items across all sections, including their
//! full pre-rendered body as `content:encoded`.

use super::GenerateError;
use crate::{
    config::{FeedConfig, Site},
    content::Item,
    output::OutputDocument,
    utils::date,
};
use rss::{CategoryBuilder, ChannelBuilder, GuidBuilder, ItemBuilder, validation::Validate};

pub const FEED_MEDIA_TYPE: &str = "application/rss+xml";

/// Build the feed document from `items`, which must be newest first.
///
/// The channel's build date is the newest item's date rather than the
/// current time, so rebuilding unchanged content yields the same bytes.
pub fn build_feed(
    site: &Site,
    items: &[&Item],
    config: &FeedConfig,
) -> Result<OutputDocument, GenerateError> {
    let newest: Vec<&Item> = items.iter().take(config.max_items).copied().collect();
    let last_build_date = newest.first().map(|item| date::format_rfc2822(&item.date));

    let channel = ChannelBuilder::default()
        .title(site.name.clone())
        .link(site.url_for(""))
        .description(site.description.clone())
        .language(Some(site.language.clone()))
        .generator(Some("folio".to_string()))
        .last_build_date(last_build_date)
        .items(newest.iter().map(|item| to_rss_item(site, item)).collect::<Vec<_>>())
        .build();

    channel
        .validate()
        .map_err(|e| GenerateError::Feed(e.to_string()))?;

    Ok(OutputDocument::new(
        config.path.trim_matches('/'),
        channel.to_string().into_bytes(),
        FEED_MEDIA_TYPE,
    ))
}

fn to_rss_item(site: &Site, item: &Item) -> rss::Item {
    let link = site.url_for(&item.path());
    let categories = item
        .tags
        .iter()
        .map(|tag| CategoryBuilder::default().name(tag.as_str()).build())
        .collect::<Vec<_>>();

    ItemBuilder::default()
        .title(Some(item.title.clone()))
        .link(Some(link.clone()))
        .guid(Some(GuidBuilder::default().permalink(true).value(link).build()))
        .description((!item.description.is_empty()).then(|| item.description.clone()))
        .content((!item.body.is_empty()).then(|| item.body.clone()))
        .pub_date(Some(date::format_rfc2822(&item.date)))
        .categories(categories)
        .build()
}
