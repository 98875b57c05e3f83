//! Content tree walker - classifies every entry of the content directory

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::pages::PageKind;

/// What to do with one content entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Mirror as a directory
    Directory,
    /// Render as the given page
    Page(PageKind),
    /// `.html` file that is not a page; neither rendered nor copied
    SkippedTemplate,
    /// Copy byte-for-byte
    Asset,
}

/// One classified entry of the content tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentEntry {
    pub source: PathBuf,
    /// Path relative to the content root
    pub relative: PathBuf,
    /// Matching path under the output directory
    pub destination: PathBuf,
    pub kind: EntryKind,
}

/// Classify a non-root entry
pub fn classify(path: &Path, is_dir: bool) -> EntryKind {
    if is_dir {
        return EntryKind::Directory;
    }

    if path.extension().and_then(|e| e.to_str()) != Some("html") {
        return EntryKind::Asset;
    }

    path.file_stem()
        .and_then(|s| s.to_str())
        .and_then(PageKind::from_stem)
        .map_or(EntryKind::SkippedTemplate, EntryKind::Page)
}

/// Recursive, sorted walk over the content tree
///
/// Directories are yielded before their children, so a caller can create the
/// output directory first, or call [`skip_subtree`](Self::skip_subtree) to
/// drop it.
pub struct ContentTreeWalker {
    root: PathBuf,
    output_dir: PathBuf,
    inner: walkdir::IntoIter,
}

impl ContentTreeWalker {
    /// Start a walk; fails if `root` cannot be listed at all
    pub fn new(root: &Path, output_dir: &Path) -> io::Result<Self> {
        fs::read_dir(root)?;

        let inner = WalkDir::new(root)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter();

        Ok(Self {
            root: root.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            inner,
        })
    }

    /// Do not descend into the directory that was just yielded
    pub fn skip_subtree(&mut self) {
        self.inner.skip_current_dir();
    }

    fn entry(&self, entry: walkdir::DirEntry) -> ContentEntry {
        let source = entry.path().to_path_buf();
        let relative = source
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| PathBuf::from(entry.file_name()));
        let destination = self.output_dir.join(&relative);
        let kind = classify(&source, entry.file_type().is_dir());

        ContentEntry {
            source,
            relative,
            destination,
            kind,
        }
    }
}

impl Iterator for ContentTreeWalker {
    type Item = Result<ContentEntry, walkdir::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.inner.next()?;
        Some(next.map(|entry| self.entry(entry)))
    }
}
