//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // URL
    pub url: String,

    // Directory
    pub posts_dir: String,
    pub content_dir: String,
    pub partials_dir: String,
    pub output_dir: String,

    // Rendering
    pub post_template: String,
    pub index_post_limit: usize,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Writing
    pub new_post_name: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: "http://example.com".to_string(),

            posts_dir: "_posts".to_string(),
            content_dir: "Content".to_string(),
            partials_dir: "_partials".to_string(),
            output_dir: "Output".to_string(),

            post_template: "post.html".to_string(),
            index_post_limit: 5,
            highlight: HighlightConfig::default(),

            new_post_name: ":title.md".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.posts_dir, "_posts");
        assert_eq!(config.content_dir, "Content");
        assert_eq!(config.output_dir, "Output");
        assert_eq!(config.index_post_limit, 5);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
url: https://blog.example.org
content_dir: site
index_post_limit: 3
highlight:
  line_number: true
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.url, "https://blog.example.org");
        assert_eq!(config.content_dir, "site");
        assert_eq!(config.index_post_limit, 3);
        assert!(config.highlight.line_number);
        // untouched fields keep their defaults
        assert_eq!(config.posts_dir, "_posts");
        assert_eq!(config.highlight.theme, "base16-ocean.dark");
    }
}
