//! Site building orchestration.
//!
//! Turns a validated content tree into an [`OutputTree`] without touching
//! the disk.
//!
//! # Architecture
//!
//! ```text
//! build()
//!     │
//!     ├── ContentModel::validate() ──► abort before any render call
//!     │
//!     ├── SiteIndex::new() ──► sorted items, items per tag
//!     │
//!     ├── render_jobs() ──► one job per location (parallel, order kept)
//!     │
//!     ├── build_feed() / build_sitemap()
//!     │
//!     └── BuildStep::run() ──► staged, committed only without collisions
//! ```

use crate::{
    config::{BuildConfig, Site},
    content::{
        ContentModel, Index, Item, Location, Page, Section, Tag, TagDetails, TagList,
        ValidationErrors, model::by_date_desc,
    },
    generator::{GenerateError, SitemapEntry, build_feed, build_sitemap},
    html::Document,
    index::SiteIndex,
    log,
    output::{OutputDocument, OutputTree},
    steps::StepError,
    theme::Theme,
    utils::{
        minify::{MinifyType, minify},
        slug::html_output_path,
    },
};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use std::{borrow::Cow, cmp::Ordering, collections::BTreeSet, io};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    InvalidContent(#[from] ValidationErrors),

    #[error("output path `{0}` is produced twice")]
    PathCollision(String),

    #[error("failed to serialize `{path}`")]
    Render {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("build step `{step}` failed")]
    Step {
        step: String,
        #[source]
        source: StepError,
    },

    #[error(transparent)]
    Generate(#[from] GenerateError),
}

/// A location the theme is asked to render.
#[derive(Debug, Clone, Copy)]
enum Job<'a> {
    Index,
    Section(&'a Section),
    Item(&'a Item),
    Page(&'a Page),
    TagList,
    TagDetails(&'a Tag),
}

impl Job<'_> {
    fn path(&self) -> String {
        match self {
            Self::Index => Index.path(),
            Self::Section(section) => section.path().to_owned(),
            Self::Item(item) => item.path(),
            Self::Page(page) => page.path.clone(),
            Self::TagList => TagList.path(),
            Self::TagDetails(tag) => TagDetails::new(tag).path(),
        }
    }

    fn render(&self, site: &Site, theme: &dyn Theme, index: &SiteIndex<'_>) -> Document {
        match *self {
            Self::Index => theme.render_index(site, &index.items),
            Self::Section(section) => theme.render_section(site, section),
            Self::Item(item) => theme.render_item(site, item),
            Self::Page(page) => theme.render_page(site, page),
            Self::TagList => theme.render_tag_list(site, &index.tags()),
            Self::TagDetails(tag) => theme.render_tag_details(site, tag, index.items_tagged(tag)),
        }
    }

    /// Newest content date shown on the location.
    fn lastmod(&self, index: &SiteIndex<'_>) -> Option<DateTime<Utc>> {
        match *self {
            Self::Index | Self::TagList => newest(&index.items),
            Self::Section(section) => section.items.iter().map(|item| item.date).max(),
            Self::Item(item) => Some(item.date),
            Self::Page(_) => None,
            Self::TagDetails(tag) => newest(index.items_tagged(tag)),
        }
    }
}

fn newest(items: &[&Item]) -> Option<DateTime<Utc>> {
    items.iter().map(|item| item.date).max()
}

/// Sections with their items newest first, cloning only the ones that
/// are not already sorted.
fn sorted_sections(content: &ContentModel) -> Vec<Cow<'_, Section>> {
    content
        .sections
        .iter()
        .map(|section| {
            let sorted = section
                .items
                .is_sorted_by(|a, b| by_date_desc(a, b) != Ordering::Greater);
            if sorted {
                Cow::Borrowed(section)
            } else {
                let mut owned = section.clone();
                owned.items.sort_by(by_date_desc);
                Cow::Owned(owned)
            }
        })
        .collect()
}

/// Every location in a fixed order: index, sections, items, pages,
/// tag list, then one details page per tag.
fn render_jobs<'a>(
    sections: &'a [Cow<'a, Section>],
    content: &'a ContentModel,
    index: &SiteIndex<'a>,
) -> Vec<Job<'a>> {
    let mut jobs = vec![Job::Index];
    jobs.extend(sections.iter().map(|section| Job::Section(section.as_ref())));
    jobs.extend(
        sections
            .iter()
            .flat_map(|section| section.items.iter())
            .map(Job::Item),
    );
    jobs.extend(content.pages.iter().map(Job::Page));
    jobs.push(Job::TagList);
    jobs.extend(index.tags().into_iter().map(Job::TagDetails));
    jobs
}

fn insert(tree: &mut OutputTree, document: OutputDocument) -> Result<(), BuildError> {
    tree.insert(document).map_err(BuildError::PathCollision)
}

/// Build the whole site in memory.
///
/// Content is validated first; on failure no theme function is called.
/// Rendering runs in parallel, but documents are inserted in job order,
/// so equal input always yields an equal tree.
pub fn build(
    site: &Site,
    content: &ContentModel,
    theme: &dyn Theme,
    options: &BuildConfig,
) -> Result<OutputTree, BuildError> {
    content.validate(site, &options.generated_paths())?;

    let index = SiteIndex::new(content);
    let sections = sorted_sections(content);
    let jobs = render_jobs(&sections, content, &index);
    log!("build"; "rendering {} locations", jobs.len());

    let rendered: Vec<Result<OutputDocument, BuildError>> = jobs
        .par_iter()
        .map(|job| {
            let path = job.path();
            let bytes = job
                .render(site, theme, &index)
                .to_bytes()
                .map_err(|source| BuildError::Render {
                    path: path.clone(),
                    source,
                })?;
            let bytes = minify(MinifyType::Html(&bytes), options.minify).into_owned();
            Ok(OutputDocument::html(html_output_path(&path), bytes))
        })
        .collect();

    let mut tree = OutputTree::new();
    for document in rendered {
        insert(&mut tree, document?)?;
    }

    if options.feed.enable {
        let feed = build_feed(site, &index.items, &options.feed)?;
        log!("feed"; "{}", feed.path);
        insert(&mut tree, feed)?;
    }

    if options.sitemap.enable {
        let entries: Vec<SitemapEntry> = jobs
            .iter()
            .map(|job| SitemapEntry {
                path: job.path(),
                lastmod: job.lastmod(&index),
            })
            .collect();
        let mut sitemap = build_sitemap(site, &entries, &options.sitemap.path);
        sitemap.content = minify(MinifyType::Xml(&sitemap.content), options.minify).into_owned();
        log!("sitemap"; "{} urls", entries.len());
        insert(&mut tree, sitemap)?;
    }

    for step in &options.steps {
        let documents = step.run().map_err(|source| BuildError::Step {
            step: step.name(),
            source,
        })?;
        commit_step(&mut tree, documents)?;
        log!("step"; "{}", step.name());
    }

    log!("build"; "{} documents", tree.len());
    Ok(tree)
}

/// Add a step's documents only if none of them collides with the tree
/// or with each other.
fn commit_step(tree: &mut OutputTree, documents: Vec<OutputDocument>) -> Result<(), BuildError> {
    let mut seen = BTreeSet::new();
    for document in &documents {
        if tree.contains(&document.path) || !seen.insert(document.path.as_str()) {
            return Err(BuildError::PathCollision(document.path.clone()));
        }
    }
    for document in documents {
        insert(tree, document)?;
    }
    Ok(())
}
