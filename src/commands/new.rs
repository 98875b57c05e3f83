//! Create a new post

use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use crate::helpers::{format_date, METADATA_DATE_FORMAT};
use crate::Site;

/// Metadata block written at the top of a new post
#[derive(Serialize)]
struct Scaffold<'a> {
    title: &'a str,
    summary: &'a str,
    date: String,
}

/// Create a new post in the posts directory, dated today
pub fn create_post(site: &Site, title: &str, summary: Option<&str>) -> Result<PathBuf> {
    let today = chrono::Local::now().date_naive();
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Title {:?} does not produce a usable file name", title);
    }

    let filename = site
        .config
        .new_post_name
        .replace(":title", &slug)
        .replace(":year", &today.format("%Y").to_string())
        .replace(":month", &today.format("%m").to_string())
        .replace(":day", &today.format("%d").to_string());

    let target_dir = site.base_dir.join(&site.config.posts_dir);
    fs::create_dir_all(&target_dir)?;
    let file_path = target_dir.join(&filename);

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let metadata = serde_yaml::to_string(&Scaffold {
        title,
        summary: summary.unwrap_or_default(),
        date: format_date(&today, METADATA_DATE_FORMAT),
    })?;
    let content = format!("---\n{}---\n\n", metadata);

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HighlightConfig;
    use crate::content::PostLoader;
    use tempfile::TempDir;

    #[test]
    fn test_new_post_loads_back() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();

        let path = site
            .new_post("Hello: World!", Some("First post"))
            .unwrap();
        assert_eq!(path, site.base_dir.join("_posts/hello-world.md"));

        let post = PostLoader::new(&HighlightConfig::default())
            .load(&path)
            .unwrap();
        assert_eq!(post.title, "Hello: World!");
        assert_eq!(post.summary, "First post");
        assert_eq!(post.slug, "hello-world");
        assert_eq!(post.date, chrono::Local::now().date_naive());
    }

    #[test]
    fn test_new_post_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        site.new_post("Same", None).unwrap();
        assert!(site.new_post("Same", None).is_err());
    }

    #[test]
    fn test_new_post_rejects_empty_slug() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        assert!(site.new_post("!!!", None).is_err());
    }
}
