//! Build report - per-item outcomes of one build

use serde::{Serialize, Serializer};
use std::fmt::Display;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::templates::RenderError;

/// The three build phases, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Setup,
    PostRender,
    ResourceProcess,
}

/// A failure that skipped one artifact (or, for `TreeWalk` at the root, the
/// rest of the content phase)
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Failed to prepare {path:?}: {source}")]
    DirectorySetup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read posts directory {path:?}: {source}")]
    PostsDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to copy {from:?} to {to:?}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to walk {path:?}: {message}")]
    TreeWalk { path: PathBuf, message: String },
}

/// One recorded failure
#[derive(Debug, Serialize)]
pub struct Failure {
    pub phase: Phase,
    /// Source item the failure belongs to
    pub item: PathBuf,
    #[serde(serialize_with = "as_display")]
    pub error: BuildError,
}

/// A post source file that did not produce a post
#[derive(Debug, Serialize)]
pub struct DroppedSource {
    pub path: PathBuf,
    pub reason: String,
}

/// Everything that happened during one build
///
/// Paths of generated artifacts are relative to the output directory.
#[derive(Debug, Default, Serialize)]
pub struct BuildReport {
    pub posts_rendered: Vec<PathBuf>,
    pub pages_rendered: Vec<PathBuf>,
    pub assets_copied: Vec<PathBuf>,
    pub directories_created: Vec<PathBuf>,
    /// `.html` files under the content tree that match no page kind
    pub skipped_templates: Vec<PathBuf>,
    /// Post sources without the required metadata; not failures
    pub dropped_posts: Vec<DroppedSource>,
    pub failures: Vec<Failure>,
}

impl BuildReport {
    /// Record a failure and log it
    pub fn fail(&mut self, phase: Phase, item: impl Into<PathBuf>, error: BuildError) {
        let item = item.into();
        tracing::warn!("[{:?}] {}: {}", phase, item.display(), error);
        self.failures.push(Failure { phase, item, error });
    }

    /// True when no item failed
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Failures recorded during `phase`
    pub fn failures_in(&self, phase: Phase) -> impl Iterator<Item = &Failure> {
        self.failures.iter().filter(move |f| f.phase == phase)
    }

    /// One-line summary for the console
    pub fn summary(&self) -> String {
        format!(
            "{} posts, {} pages, {} assets, {} dropped posts, {} skipped templates, {} failures",
            self.posts_rendered.len(),
            self.pages_rendered.len(),
            self.assets_copied.len(),
            self.dropped_posts.len(),
            self.skipped_templates.len(),
            self.failures.len()
        )
    }
}

fn as_display<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}
