//! The output tree and where it gets written.
//!
//! A build produces an [`OutputTree`]: an ordered, path-unique map of
//! documents. [`write`] hands every document to an [`OutputTarget`] in
//! tree order and stops at the first failure. Nothing is staged, so a
//! failed write leaves a partial tree behind.

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Component, Path, PathBuf},
};
use thiserror::Error;

pub const HTML_MEDIA_TYPE: &str = "text/html; charset=utf-8";

/// One file of the generated site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDocument {
    /// Path relative to the output root, `/`-separated.
    pub path: String,
    pub content: Vec<u8>,
    pub media_type: String,
}

impl OutputDocument {
    pub fn new(path: impl Into<String>, content: Vec<u8>, media_type: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content,
            media_type: media_type.into(),
        }
    }

    pub fn html(path: impl Into<String>, content: Vec<u8>) -> Self {
        Self::new(path, content, HTML_MEDIA_TYPE)
    }

}

/// Path-unique documents in deterministic (path) order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputTree(BTreeMap<String, OutputDocument>);

impl OutputTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new document. An occupied path is returned as the error
    /// and leaves the tree unchanged.
    pub fn insert(&mut self, document: OutputDocument) -> Result<(), String> {
        if self.0.contains_key(&document.path) {
            return Err(document.path);
        }
        self.0.insert(document.path.clone(), document);
        Ok(())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.contains_key(path)
    }

    pub fn get(&self, path: &str) -> Option<&OutputDocument> {
        self.0.get(path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn documents(&self) -> impl Iterator<Item = &OutputDocument> {
        self.0.values()
    }
}

// ============================================================================
// Targets
// ============================================================================

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to write `{path}`")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Destination for generated documents.
pub trait OutputTarget {
    fn write(&mut self, document: &OutputDocument) -> io::Result<()>;
}

/// Writes documents below a directory on disk.
#[derive(Debug)]
pub struct FsTarget {
    root: PathBuf,
}

impl FsTarget {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the output directory, removing it first when `clean`.
    pub fn prepare(&self, clean: bool) -> Result<(), WriteError> {
        let to_error = |source| WriteError::Io {
            path: self.root.display().to_string(),
            source,
        };
        if clean && self.root.exists() {
            fs::remove_dir_all(&self.root).map_err(to_error)?;
        }
        fs::create_dir_all(&self.root).map_err(to_error)
    }

    fn resolve(&self, path: &str) -> io::Result<PathBuf> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes || path.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "document path must stay inside the output directory",
            ));
        }
        Ok(self.root.join(relative))
    }
}

impl OutputTarget for FsTarget {
    fn write(&mut self, document: &OutputDocument) -> io::Result<()> {
        let path = self.resolve(&document.path)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, &document.content)
    }
}

/// Collects documents in memory.
#[derive(Debug, Default)]
pub struct MemoryTarget {
    pub files: BTreeMap<String, Vec<u8>>,
}

impl OutputTarget for MemoryTarget {
    fn write(&mut self, document: &OutputDocument) -> io::Result<()> {
        self.files
            .insert(document.path.clone(), document.content.clone());
        Ok(())
    }
}

/// Write every document once, in tree order, failing fast.
pub fn write(tree: &OutputTree, target: &mut dyn OutputTarget) -> Result<(), WriteError> {
    for document in tree.documents() {
        target.write(document).map_err(|source| WriteError::Io {
            path: document.path.clone(),
            source,
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tree(paths: &[&str]) -> OutputTree {
        let mut tree = OutputTree::new();
        for path in paths {
            tree.insert(OutputDocument::html(*path, path.as_bytes().to_vec()))
                .unwrap();
        }
        tree
    }

    /// Fails on the n-th write.
    struct FailingTarget {
        writes: Vec<String>,
        fail_at: usize,
    }

    impl OutputTarget for FailingTarget {
        fn write(&mut self, document: &OutputDocument) -> io::Result<()> {
            if self.writes.len() == self.fail_at {
                return Err(io::Error::other("disk full"));
            }
            self.writes.push(document.path.clone());
            Ok(())
        }
    }

    #[test]
    fn test_insert_rejects_existing_path() {
        let mut tree = tree(&["index.html"]);
        let err = tree
            .insert(OutputDocument::html("index.html", b"other".to_vec()))
            .unwrap_err();
        assert_eq!(err, "index.html");
        assert_eq!(tree.get("index.html").unwrap().content, b"index.html");
    }

    #[test]
    fn test_iteration_is_sorted() {
        let tree = tree(&["tags/index.html", "index.html", "posts/a/index.html"]);
        let paths: Vec<_> = tree.paths().collect();
        assert_eq!(paths, ["index.html", "posts/a/index.html", "tags/index.html"]);
    }

    #[test]
    fn test_memory_target() {
        let tree = tree(&["index.html", "a/index.html"]);
        let mut target = MemoryTarget::default();
        write(&tree, &mut target).unwrap();
        assert_eq!(target.files.len(), 2);
        assert_eq!(target.files["a/index.html"], b"a/index.html");
    }

    #[test]
    fn test_write_stops_at_first_failure() {
        let tree = tree(&["a", "b", "c"]);
        let mut target = FailingTarget {
            writes: Vec::new(),
            fail_at: 1,
        };
        let err = write(&tree, &mut target).unwrap_err();

        assert_eq!(target.writes, ["a"]);
        let WriteError::Io { path, .. } = err;
        assert_eq!(path, "b");
    }

    #[test]
    fn test_fs_target_writes_nested_files() {
        let dir = TempDir::new().unwrap();
        let mut target = FsTarget::new(dir.path().join("public"));
        target.prepare(false).unwrap();

        write(&tree(&["index.html", "posts/a/index.html"]), &mut target).unwrap();
        assert_eq!(
            fs::read(dir.path().join("public/posts/a/index.html")).unwrap(),
            b"posts/a/index.html"
        );
    }

    #[test]
    fn test_fs_target_prepare_clean() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("public");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("stale.html"), "old").unwrap();

        FsTarget::new(&root).prepare(false).unwrap();
        assert!(root.join("stale.html").exists());

        FsTarget::new(&root).prepare(true).unwrap();
        assert!(root.exists());
        assert!(!root.join("stale.html").exists());
    }

    #[test]
    fn test_fs_target_rejects_escaping_paths() {
        let dir = TempDir::new().unwrap();
        let mut target = FsTarget::new(dir.path());
        let doc = OutputDocument::html("../evil.html", Vec::new());
        assert!(target.write(&doc).is_err());
    }
}
