//! Loading a [`ContentModel`] from a content directory.
//!
//! ```text
//! content/
//!   about.html                  -> Page `about`
//!   posts/_section.html         -> metadata and body of section `posts`
//!   posts/hello.html            -> Item `posts/hello`
//! ```
//!
//! Every file is an optional TOML front matter block fenced by `+++`
//! lines, followed by the pre-rendered HTML body:
//!
//! ```text
//! +++
//! title = "Hello"
//! date = "2024-01-01"
//! tags = ["swift"]
//! +++
//! <p>Body</p>
//! ```

use super::model::{ContentModel, Item, Page, Section, SectionId, Tag, Video, by_date_desc};
use crate::{config::Site, log, utils::{date, slug::sanitize_segment}};
use serde::Deserialize;
use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// File holding a section's own metadata.
const SECTION_FILE: &str = "_section.html";
const FENCE: &str = "+++";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to walk content directory")]
    Walk(#[from] walkdir::Error),

    #[error("unterminated front matter in `{0}`")]
    Unterminated(PathBuf),

    #[error("invalid front matter in `{path}`")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("`{path}`: {reason}")]
    Date { path: PathBuf, reason: String },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FrontMatter {
    title: Option<String>,
    description: Option<String>,
    date: Option<String>,
    tags: Vec<String>,
    image: Option<String>,
    video: Option<Video>,
    slug: Option<String>,
}

/// A parsed source file.
struct Source {
    meta: FrontMatter,
    body: String,
}

/// Load every page, section and item below `dir`.
///
/// Sections declared by the site come first, in declaration order, even
/// when they have no directory. Directories for undeclared sections are
/// still loaded so that validation can report their items. An undeclared
/// directory without items (e.g. `images/`) is not a section at all.
pub fn load(dir: &Path, site: &Site) -> Result<ContentModel, LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::Io {
            path: dir.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "content directory not found"),
        });
    }

    let mut sections: Vec<Section> = site.sections.iter().cloned().map(Section::new).collect();
    let mut lookup: BTreeMap<SectionId, usize> = sections
        .iter()
        .enumerate()
        .map(|(i, s)| (s.id.clone(), i))
        .collect();
    let mut pages = Vec::new();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(2)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e));

    for entry in walker {
        let entry = entry?;
        let path = entry.path();

        if entry.file_type().is_dir() || !is_html(path) {
            continue;
        }

        let source = read_source(path)?;
        match entry.depth() {
            1 => pages.push(page_from(path, source)),
            _ => {
                let id = dir_id(path.parent().unwrap_or(dir));
                let slot = section_slot(&mut sections, &mut lookup, id);
                let section = &mut sections[slot];
                if file_name(path) == SECTION_FILE {
                    apply_section_meta(section, source);
                } else {
                    let item = item_from(path, section.id.clone(), source)?;
                    section.items.push(item);
                }
            }
        }
    }

    sections.retain(|section| site.sections.contains(&section.id) || !section.items.is_empty());
    for section in &mut sections {
        section.items.sort_by(by_date_desc);
    }

    let content = ContentModel { sections, pages };
    log!(
        "content";
        "loaded {} items in {} sections, {} pages",
        content.item_count(),
        content.sections.len(),
        content.pages.len()
    );
    Ok(content)
}

/// Index of the section with `id`, creating it on first sight.
fn section_slot(
    sections: &mut Vec<Section>,
    lookup: &mut BTreeMap<SectionId, usize>,
    id: SectionId,
) -> usize {
    *lookup.entry(id).or_insert_with_key(|id| {
        sections.push(Section::new(id.clone()));
        sections.len() - 1
    })
}

fn read_source(path: &Path) -> Result<Source, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_source(path, &text)
}

fn parse_source(path: &Path, text: &str) -> Result<Source, LoadError> {
    let (front, body) = split_front_matter(text)
        .ok_or_else(|| LoadError::Unterminated(path.to_path_buf()))?;

    let meta = match front {
        Some(front) => toml::from_str(front).map_err(|source| LoadError::FrontMatter {
            path: path.to_path_buf(),
            source,
        })?,
        None => FrontMatter::default(),
    };

    Ok(Source {
        meta,
        body: body.trim().to_owned(),
    })
}

/// Split `text` into `(front matter, body)`.
///
/// Returns `None` when an opening fence has no closing fence.
fn split_front_matter(text: &str) -> Option<(Option<&str>, &str)> {
    let text = text.trim_start_matches('\u{feff}');
    let Some(rest) = text.strip_prefix(FENCE) else {
        return Some((None, text));
    };
    let rest = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            let front = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((Some(front), body));
        }
        offset += line.len();
    }
    None
}

fn page_from(path: &Path, source: Source) -> Page {
    Page {
        path: file_stem(path),
        title: source.meta.title.unwrap_or_default(),
        description: source.meta.description.unwrap_or_default(),
        body: source.body,
        image_path: source.meta.image,
    }
}

fn item_from(path: &Path, section: SectionId, source: Source) -> Result<Item, LoadError> {
    let meta = source.meta;
    let raw_date = meta.date.ok_or_else(|| LoadError::Date {
        path: path.to_path_buf(),
        reason: "missing `date`".into(),
    })?;
    let date = date::parse(&raw_date).ok_or_else(|| LoadError::Date {
        path: path.to_path_buf(),
        reason: format!("unrecognized date `{raw_date}`"),
    })?;

    let slug = meta
        .slug
        .as_deref()
        .map(sanitize_segment)
        .unwrap_or_else(|| file_stem(path));

    Ok(Item {
        section,
        slug,
        title: meta.title.unwrap_or_default(),
        description: meta.description.unwrap_or_default(),
        body: source.body,
        date,
        tags: meta.tags.into_iter().map(Tag::new).collect(),
        image_path: meta.image,
        video: meta.video,
    })
}

fn apply_section_meta(section: &mut Section, source: Source) {
    if let Some(title) = source.meta.title {
        section.title = title;
    }
    if let Some(description) = source.meta.description {
        section.description = description;
    }
    section.body = source.body;
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

fn is_html(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("html"))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn file_stem(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    sanitize_segment(&stem)
}

fn dir_id(path: &Path) -> SectionId {
    SectionId::new(file_name(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn site(sections: &[&str]) -> Site {
        Site {
            name: "Test".into(),
            url: "https://example.com".into(),
            sections: sections.iter().map(|s| SectionId::new(*s)).collect(),
            ..Site::default()
        }
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_split_front_matter() {
        let (front, body) = split_front_matter("+++\ntitle = \"A\"\n+++\n<p>x</p>").unwrap();
        assert_eq!(front, Some("title = \"A\"\n"));
        assert_eq!(body, "<p>x</p>");

        let (front, body) = split_front_matter("<p>no front matter</p>").unwrap();
        assert!(front.is_none());
        assert_eq!(body, "<p>no front matter</p>");

        let (front, _) = split_front_matter("+++\r\ntitle = \"A\"\r\n+++\r\nbody").unwrap();
        assert_eq!(front, Some("title = \"A\"\r\n"));

        assert!(split_front_matter("+++\ntitle = \"A\"\n").is_none());
    }

    #[test]
    fn test_load_full_tree() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "about.html", "+++\ntitle = \"About\"\n+++\n<p>me</p>");
        write(
            root,
            "posts/_section.html",
            "+++\ntitle = \"Posts\"\ndescription = \"All posts\"\n+++\n<p>intro</p>",
        );
        write(
            root,
            "posts/first.html",
            "+++\ntitle = \"First\"\ndate = \"2024-01-01\"\ntags = [\"x\"]\n+++\n<p>1</p>",
        );
        write(
            root,
            "posts/second.html",
            "+++\ntitle = \"Second\"\ndate = \"2024-02-01 10:30\"\ntags = [\"x\", \"y\"]\nvideo = { youtube = \"abc\" }\n+++\n<p>2</p>",
        );
        write(root, "posts/notes.txt", "ignored");
        write(root, ".hidden/secret.html", "ignored");

        let content = load(root, &site(&["posts", "firebase"])).unwrap();

        assert_eq!(content.pages.len(), 1);
        assert_eq!(content.pages[0].path, "about");
        assert_eq!(content.pages[0].title, "About");

        let ids: Vec<_> = content.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["posts", "firebase"]);

        let posts = &content.sections[0];
        assert_eq!(posts.title, "Posts");
        assert_eq!(posts.description, "All posts");
        assert_eq!(posts.body, "<p>intro</p>");

        let slugs: Vec<_> = posts.items.iter().map(|i| i.slug.as_str()).collect();
        assert_eq!(slugs, ["second", "first"]);
        assert_eq!(posts.items[0].video, Some(Video::Youtube("abc".into())));
        assert_eq!(posts.items[0].tags.len(), 2);

        let firebase = &content.sections[1];
        assert_eq!(firebase.title, "Firebase");
        assert!(firebase.items.is_empty());
    }

    #[test]
    fn test_undeclared_section_is_kept() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "drafts/wip.html",
            "+++\ndate = \"2024-01-01\"\n+++\n",
        );

        let content = load(dir.path(), &site(&["posts"])).unwrap();
        let ids: Vec<_> = content.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["posts", "drafts"]);
        assert_eq!(content.sections[1].items[0].path(), "drafts/wip");
        assert_eq!(content.sections[1].items[0].title, "");
    }

    #[test]
    fn test_asset_directory_is_not_a_section() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "images/logo.png", "png");
        write(dir.path(), "drafts/_section.html", "+++\ntitle = \"Drafts\"\n+++\n");
        fs::create_dir_all(dir.path().join("empty")).unwrap();
        write(
            dir.path(),
            "posts/a.html",
            "+++\ntitle = \"A\"\ndate = \"2024-01-01\"\n+++\n",
        );

        let site = site(&["posts"]);
        let content = load(dir.path(), &site).unwrap();
        let ids: Vec<_> = content.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["posts"]);
        assert!(content.validate(&site, &[]).is_ok());
    }

    #[test]
    fn test_missing_title_stays_empty() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "colophon.html", "<p>made with folio</p>");
        write(dir.path(), "posts/a.html", "+++\ndate = \"2024-01-01\"\n+++\n");

        let content = load(dir.path(), &site(&["posts"])).unwrap();
        assert_eq!(content.pages[0].path, "colophon");
        assert!(content.pages[0].title.is_empty());
        assert!(content.sections[0].items[0].title.is_empty());
    }

    #[test]
    fn test_slug_override() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "posts/2024-01-01-hello.html",
            "+++\ndate = \"2024-01-01\"\nslug = \"hello world\"\n+++\n",
        );
        let content = load(dir.path(), &site(&["posts"])).unwrap();
        assert_eq!(content.sections[0].items[0].path(), "posts/hello-world");
    }

    #[test]
    fn test_item_without_date() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "posts/a.html", "+++\ntitle = \"A\"\n+++\n");
        let err = load(dir.path(), &site(&["posts"])).unwrap_err();
        assert!(matches!(err, LoadError::Date { .. }));
        assert!(err.to_string().contains("missing `date`"));
    }

    #[test]
    fn test_item_with_bad_date() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "posts/a.html", "+++\ndate = \"yesterday\"\n+++\n");
        let err = load(dir.path(), &site(&["posts"])).unwrap_err();
        assert!(err.to_string().contains("yesterday"));
    }

    #[test]
    fn test_malformed_front_matter_names_file() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "about.html", "+++\ntitle = \n+++\n");
        let err = load(dir.path(), &site(&[])).unwrap_err();
        assert!(matches!(err, LoadError::FrontMatter { .. }));
        assert!(err.to_string().contains("about.html"));
    }

    #[test]
    fn test_unknown_front_matter_key() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "about.html", "+++\nauthor = \"me\"\n+++\n");
        let err = load(dir.path(), &site(&[])).unwrap_err();
        assert!(matches!(err, LoadError::FrontMatter { .. }));
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let err = load(&dir.path().join("nope"), &site(&[])).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
