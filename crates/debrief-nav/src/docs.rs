//! Index of known document ids.
//!
//! Document ids are source paths relative to the docs directory, without the
//! extension and with `/` separators: `features/rest-api.md` has id
//! `features/rest-api`. Files and directories starting with `_` or `.` are
//! partials or hidden and are not documents.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;

/// Extensions of files that are documents.
const DOC_EXTENSIONS: &[&str] = &["md", "mdx"];

/// Set of known document ids.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocIndex {
    ids: BTreeSet<String>,
}

impl DocIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan a docs directory for documents.
    ///
    /// Returns an empty index if `source_dir` doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if a directory cannot be read.
    pub fn scan(source_dir: &Path) -> io::Result<Self> {
        let mut index = Self::new();
        if source_dir.exists() {
            scan_directory(source_dir, "", &mut index)?;
        } else {
            tracing::warn!(path = %source_dir.display(), "Docs directory does not exist");
        }
        tracing::debug!(path = %source_dir.display(), count = index.len(), "Scanned documents");
        Ok(index)
    }

    /// Add a document id. Returns `false` if it was already present.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.ids.insert(id.into())
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Document ids in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for DocIndex {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

fn scan_directory(dir: &Path, prefix: &str, index: &mut DocIndex) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            tracing::warn!(path = %entry.path().display(), "Skipping non UTF-8 path");
            continue;
        };
        if name.starts_with('_') || name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        if entry.file_type()?.is_dir() {
            let child_prefix = join_id(prefix, name);
            scan_directory(&path, &child_prefix, index)?;
        } else if let Some(stem) = doc_stem(&path) {
            let id = join_id(prefix, stem);
            if !index.insert(id.clone()) {
                tracing::warn!(id = %id, path = %path.display(), "Document id declared by more than one file");
            }
        }
    }
    Ok(())
}

/// File stem if the path has a document extension.
fn doc_stem(path: &Path) -> Option<&str> {
    let ext = path.extension()?.to_str()?;
    if !DOC_EXTENSIONS.contains(&ext) {
        return None;
    }
    path.file_stem()?.to_str()
}

fn join_id(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}/{name}")
    }
}
