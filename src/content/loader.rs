//! Content loader - loads posts from the posts directory

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::{FrontMatter, MarkdownRenderer, Post, PostList};
use crate::config::HighlightConfig;
use crate::helpers::{is_url_safe, parse_metadata_date, METADATA_DATE_FORMAT};

/// Why a source file did not produce a post
#[derive(Error, Debug)]
pub enum PostError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Missing required metadata key `{0}`")]
    MissingKey(&'static str),

    #[error("Date `{0}` does not match {}", METADATA_DATE_FORMAT)]
    InvalidDate(String),

    #[error("File name `{0}` is not URL-safe")]
    UnsafeSlug(String),

    #[error("Slug `{0}` is already taken by another post")]
    DuplicateSlug(String),
}

/// A source file that was skipped, with the reason
#[derive(Debug)]
pub struct DroppedPost {
    pub path: PathBuf,
    pub reason: PostError,
}

/// Result of loading a whole posts directory
#[derive(Debug, Default)]
pub struct LoadedPosts {
    pub posts: PostList,
    pub dropped: Vec<DroppedPost>,
}

/// Parses markdown files into posts
pub struct PostLoader {
    renderer: MarkdownRenderer,
}

impl PostLoader {
    /// Create a new post loader
    pub fn new(highlight: &HighlightConfig) -> Self {
        Self {
            renderer: MarkdownRenderer::with_options(highlight),
        }
    }

    /// Load every file directly inside `dir` (non-recursive)
    ///
    /// Files are visited in file-name order, so when two files map to the same
    /// slug the first one wins. Only a failure to list `dir` is an error;
    /// individual files that do not parse end up in `dropped`.
    pub fn load_dir(&self, dir: &Path) -> io::Result<LoadedPosts> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() || entry.path().is_file() {
                files.push(entry.path());
            }
        }
        files.sort();

        let mut seen = HashSet::new();
        let mut posts = Vec::new();
        let mut dropped = Vec::new();

        for path in files {
            let result = self.load(&path).and_then(|post| {
                if seen.insert(post.slug.clone()) {
                    Ok(post)
                } else {
                    Err(PostError::DuplicateSlug(post.slug))
                }
            });

            match result {
                Ok(post) => posts.push(post),
                Err(reason) => {
                    tracing::debug!("Skipping {:?}: {}", path, reason);
                    dropped.push(DroppedPost { path, reason });
                }
            }
        }

        Ok(LoadedPosts {
            posts: PostList::new(posts),
            dropped,
        })
    }

    /// Load a single post from a file
    pub fn load(&self, path: &Path) -> Result<Post, PostError> {
        let content = fs::read_to_string(path)?;
        self.parse(path, &content)
    }

    /// Parse file contents; `path` only supplies the slug
    pub fn parse(&self, path: &Path, content: &str) -> Result<Post, PostError> {
        let (fm, body) = FrontMatter::parse(content);

        let title = fm.get("title").ok_or(PostError::MissingKey("title"))?;
        let summary = fm.get("summary").ok_or(PostError::MissingKey("summary"))?;
        let date_str = fm.get("date").ok_or(PostError::MissingKey("date"))?;
        let date = parse_metadata_date(date_str)
            .ok_or_else(|| PostError::InvalidDate(date_str.to_string()))?;

        let slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        if !is_url_safe(&slug) {
            return Err(PostError::UnsafeSlug(
                path.file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default(),
            ));
        }

        let html = self.renderer.render(body);

        Ok(Post::new(
            title.to_string(),
            summary.to_string(),
            date,
            html,
            slug,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn loader() -> PostLoader {
        PostLoader::new(&HighlightConfig::default())
    }

    fn source(title: Option<&str>, summary: Option<&str>, date: Option<&str>) -> String {
        let mut s = String::from("---\n");
        if let Some(t) = title {
            s.push_str(&format!("title: {}\n", t));
        }
        if let Some(sm) = summary {
            s.push_str(&format!("summary: {}\n", sm));
        }
        if let Some(d) = date {
            s.push_str(&format!("date: {}\n", d));
        }
        s.push_str("---\n\nHello *world*.\n");
        s
    }

    #[test]
    fn test_parse_valid_post() {
        let content = source(Some("Hello"), Some("First"), Some("25-12-2023"));
        let post = loader()
            .parse(Path::new("/posts/hello-world.md"), &content)
            .unwrap();
        assert_eq!(post.slug, "hello-world");
        assert_eq!(post.title, "Hello");
        assert_eq!(post.summary, "First");
        assert_eq!(post.date, NaiveDate::from_ymd_opt(2023, 12, 25).unwrap());
        assert_eq!(post.publish_date, "Dec 25, 2023");
        assert!(post.html.contains("<em>world</em>"));
    }

    #[test]
    fn test_missing_keys_reject_post() {
        let cases = [
            (source(None, Some("s"), Some("01-01-2023")), "title"),
            (source(Some("t"), None, Some("01-01-2023")), "summary"),
            (source(Some("t"), Some("s"), None), "date"),
        ];
        for (content, key) in cases {
            match loader().parse(Path::new("p.md"), &content) {
                Err(PostError::MissingKey(k)) => assert_eq!(k, key),
                other => panic!("expected missing {}, got {:?}", key, other),
            }
        }
    }

    #[test]
    fn test_colon_and_hash_in_values_are_kept() {
        let content = source(
            Some("Rust: a tour"),
            Some("Why we are #1 again"),
            Some("01-02-2023"),
        );
        let post = loader().parse(Path::new("tour.md"), &content).unwrap();
        assert_eq!(post.title, "Rust: a tour");
        assert_eq!(post.summary, "Why we are #1 again");
    }

    #[test]
    fn test_unparsable_date_rejects_post() {
        let content = source(Some("t"), Some("s"), Some("2023-12-25"));
        assert!(matches!(
            loader().parse(Path::new("p.md"), &content),
            Err(PostError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_no_front_matter_rejects_post() {
        assert!(matches!(
            loader().parse(Path::new("p.md"), "# Just a heading\n"),
            Err(PostError::MissingKey("title"))
        ));
    }

    #[test]
    fn test_unsafe_slug_rejects_post() {
        let content = source(Some("t"), Some("s"), Some("01-01-2023"));
        assert!(matches!(
            loader().parse(Path::new("my post.md"), &content),
            Err(PostError::UnsafeSlug(_))
        ));
    }

    #[test]
    fn test_load_dir() {
        let dir = TempDir::new().unwrap();
        let write = |name: &str, content: &str| fs::write(dir.path().join(name), content).unwrap();

        write("a.md", &source(Some("A"), Some("s"), Some("01-01-2023")));
        write("b.md", &source(Some("B"), Some("s"), Some("01-06-2023")));
        write("c.md", &source(Some("C"), Some("s"), Some("01-03-2023")));
        write("broken.md", &source(Some("X"), None, Some("01-03-2023")));
        write("a.markdown", &source(Some("A again"), Some("s"), Some("01-01-2023")));
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(
            dir.path().join("nested/d.md"),
            source(Some("D"), Some("s"), Some("01-01-2023")),
        )
        .unwrap();

        let loaded = loader().load_dir(dir.path()).unwrap();
        let slugs: Vec<_> = loaded.posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["b", "c", "a"]);
        // `a.markdown` sorts before `a.md`
        assert_eq!(loaded.posts[2].title, "A again");

        assert_eq!(loaded.dropped.len(), 2);
        assert!(loaded
            .dropped
            .iter()
            .any(|d| matches!(d.reason, PostError::DuplicateSlug(ref s) if s == "a")));
        assert!(loaded
            .dropped
            .iter()
            .any(|d| matches!(d.reason, PostError::MissingKey("summary"))));
    }

    #[test]
    fn test_load_dir_missing() {
        let dir = TempDir::new().unwrap();
        assert!(loader().load_dir(&dir.path().join("nope")).is_err());
    }
}
