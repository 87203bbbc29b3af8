//! Additional build steps run after the theme documents are rendered.

use crate::output::OutputDocument;
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum StepError {
    #[error("resource path `{0}` does not exist")]
    MissingSource(PathBuf),

    #[error("i/o error on `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to walk resources")]
    Walk(#[from] walkdir::Error),
}

/// Copy files from `from` to `to` (relative to the output root).
///
/// With `include_folder` the source folder itself is recreated under
/// `to`; otherwise only its contents are copied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CopyResources {
    pub from: PathBuf,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub include_folder: bool,
}

impl CopyResources {
    /// Every file to copy, as `(source, output-relative destination)`,
    /// sorted by destination.
    pub fn plan(&self) -> Result<Vec<(PathBuf, String)>, StepError> {
        if !self.from.exists() {
            return Err(StepError::MissingSource(self.from.clone()));
        }

        let mut prefix: Vec<String> = self
            .to
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect();

        if self.from.is_file() {
            prefix.push(file_name(&self.from));
            return Ok(vec![(self.from.clone(), prefix.join("/"))]);
        }

        if self.include_folder {
            prefix.push(file_name(&self.from));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.from).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(&self.from).unwrap_or(entry.path());
            let dest: Vec<String> = prefix
                .iter()
                .cloned()
                .chain(
                    relative
                        .components()
                        .map(|c| c.as_os_str().to_string_lossy().into_owned()),
                )
                .collect();
            files.push((entry.path().to_path_buf(), dest.join("/")));
        }
        files.sort_by(|a, b| a.1.cmp(&b.1));
        Ok(files)
    }

    /// Read every planned file into a document.
    pub fn documents(&self) -> Result<Vec<OutputDocument>, StepError> {
        self.plan()?
            .into_iter()
            .map(|(source, dest)| {
                let content = fs::read(&source).map_err(|err| StepError::Io {
                    path: source.clone(),
                    source: err,
                })?;
                let media_type = mime_guess::from_path(&dest).first_or_octet_stream();
                Ok(OutputDocument::new(dest, content, media_type.essence_str()))
            })
            .collect()
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// A step that contributes documents to the output tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum BuildStep {
    CopyResources(CopyResources),
}

impl BuildStep {
    pub fn name(&self) -> String {
        match self {
            Self::CopyResources(copy) => format!("copy_resources({})", copy.from.display()),
        }
    }

    /// Produce this step's documents without touching the tree.
    pub fn run(&self) -> Result<Vec<OutputDocument>, StepError> {
        match self {
            Self::CopyResources(copy) => copy.documents(),
        }
    }
}
