//! Content validation.
//!
//! Unlike every other stage, validation does not stop at the first
//! problem: it walks the whole tree and reports all violations at once.

use super::{
    location::{TAG_LIST_PATH, tag_path},
    model::{ContentModel, SectionId, Tag},
};
use crate::config::Site;
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};
use thiserror::Error;

/// A single content defect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Two or more locations resolve to the same output path.
    DuplicatePath { path: String, owners: Vec<String> },
    /// Content refers to a section the site does not declare.
    UnknownSection { section: SectionId, location: String },
    /// An item carries an empty tag.
    EmptyTag { item: String },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicatePath { path, owners } => {
                write!(f, "duplicate path `/{path}` used by {}", owners.join(", "))
            }
            Self::UnknownSection { section, location } => {
                write!(f, "`{location}` belongs to undeclared section `{section}`")
            }
            Self::EmptyTag { item } => write!(f, "item `{item}` has an empty tag"),
        }
    }
}

/// Every violation found in one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationErrors(pub Vec<Violation>);

impl ValidationErrors {
    pub fn violations(&self) -> &[Violation] {
        &self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} content violation(s)", self.0.len())?;
        for violation in &self.0 {
            write!(f, "\n  - {violation}")?;
        }
        Ok(())
    }
}

impl ContentModel {
    /// Check the content against the site declaration.
    ///
    /// `generated` lists the paths of files the build adds on its own
    /// (feed, sitemap); no location may claim them.
    ///
    /// Reports, in this order: items in undeclared sections, empty tags,
    /// then duplicate output paths sorted by path.
    pub fn validate(&self, site: &Site, generated: &[&str]) -> Result<(), ValidationErrors> {
        let declared: BTreeSet<&SectionId> = site.sections.iter().collect();
        let mut violations = Vec::new();

        for item in self.items() {
            if !declared.contains(&item.section) {
                violations.push(Violation::UnknownSection {
                    section: item.section.clone(),
                    location: item.path(),
                });
            }
        }

        for item in self.items() {
            if item.tags.iter().any(Tag::is_blank) {
                violations.push(Violation::EmptyTag { item: item.path() });
            }
        }

        let duplicates = self
            .claimed_paths(generated)
            .into_iter()
            .filter(|(_, owners)| owners.len() > 1)
            .map(|(path, owners)| Violation::DuplicatePath { path, owners });
        violations.extend(duplicates);

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(violations))
        }
    }

    /// Every site path the build will produce, with who claims it.
    fn claimed_paths(&self, generated: &[&str]) -> BTreeMap<String, Vec<String>> {
        let mut claims: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut claim = |path: String, owner: String| {
            claims
                .entry(path.trim_matches('/').to_owned())
                .or_default()
                .push(owner);
        };

        claim(String::new(), "index".into());
        claim(TAG_LIST_PATH.into(), "tag list".into());
        for path in generated {
            claim((*path).to_owned(), format!("generated `{path}`"));
        }

        for section in &self.sections {
            claim(section.path().to_owned(), format!("section `{}`", section.id));
            for item in &section.items {
                claim(item.path(), format!("item `{}`", item.path()));
            }
        }
        for page in &self.pages {
            claim(page.path.clone(), format!("page `{}`", page.path));
        }

        let tags: BTreeSet<&Tag> = self
            .items()
            .flat_map(|item| item.tags.iter())
            .filter(|tag| !tag.is_blank())
            .collect();
        for tag in tags {
            claim(tag_path(tag), format!("tag `{tag}`"));
        }

        claims
    }
}
