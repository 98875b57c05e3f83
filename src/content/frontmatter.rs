//! Front-matter parsing

use std::collections::BTreeMap;

/// Metadata block from the top of a post
///
/// ```text
/// ---
/// title: Hello World
/// summary: First post
/// date: 25-12-2023
/// ---
/// ```
///
/// Each line is read as `key: value`, split at the first colon, so values may
/// contain `: ` and `#` freely. A value wrapped in matching quotes is
/// unquoted. Lines without a colon are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    fields: BTreeMap<String, String>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    ///
    /// Content without a `---` fenced block yields empty metadata and the
    /// whole input as the body.
    pub fn parse(content: &str) -> (Self, &str) {
        let trimmed = content.trim_start();

        let Some(rest) = trimmed.strip_prefix("---") else {
            return (FrontMatter::default(), content);
        };
        let rest = rest.trim_start_matches([' ', '\t']);
        let Some(rest) = rest
            .strip_prefix("\r\n")
            .or_else(|| rest.strip_prefix('\n'))
        else {
            // `---title` is not a fence
            return (FrontMatter::default(), content);
        };

        let Some((end, after)) = find_closing_fence(rest) else {
            return (FrontMatter::default(), content);
        };
        let remaining = rest[after..].trim_start_matches(['\n', '\r']);

        let fields = rest[..end].lines().filter_map(parse_line).collect();
        (FrontMatter { fields }, remaining)
    }

    /// Get a metadata value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

/// Locate the closing `---` line.
/// Returns (end of metadata, start of body).
fn find_closing_fence(s: &str) -> Option<(usize, usize)> {
    let mut offset = 0;
    for line in s.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some((offset, offset + line.len()));
        }
        offset += line.len();
    }
    None
}

fn parse_line(line: &str) -> Option<(String, String)> {
    if line.trim_start().starts_with('#') {
        return None;
    }
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), unquote(value.trim())))
}

/// Strip one pair of matching quotes, undoing YAML's quote escapes
fn unquote(value: &str) -> String {
    if value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'') {
        return value[1..value.len() - 1].replace("''", "'");
    }
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        return serde_yaml::from_str::<String>(value)
            .unwrap_or_else(|_| value[1..value.len() - 1].to_string());
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_metadata_block() {
        let content = r#"---
title: Hello World
summary: A first post
date: 25-12-2023
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content);
        assert_eq!(fm.get("title"), Some("Hello World"));
        assert_eq!(fm.get("summary"), Some("A first post"));
        assert_eq!(fm.get("date"), Some("25-12-2023"));
        assert_eq!(remaining, "This is the content.\n");
    }

    #[test]
    fn test_no_front_matter() {
        let content = "# Just markdown\n\nNo metadata here.";
        let (fm, remaining) = FrontMatter::parse(content);
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_unclosed_fence_is_body() {
        let content = "---\ntitle: Lost\n\nnever closed";
        let (fm, remaining) = FrontMatter::parse(content);
        assert_eq!(fm.get("title"), None);
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_values_split_at_first_colon() {
        let content = "---\ntitle: Rust: a tour\nsummary: Why we are #1 again\nurl:https://x.dev/a\n---\nbody";
        let (fm, remaining) = FrontMatter::parse(content);
        assert_eq!(fm.get("title"), Some("Rust: a tour"));
        assert_eq!(fm.get("summary"), Some("Why we are #1 again"));
        assert_eq!(fm.get("url"), Some("https://x.dev/a"));
        assert_eq!(remaining, "body");
    }

    #[test]
    fn test_lines_without_colon_are_ignored() {
        let content = "---\n# a comment: here\ntags:\n  - a\n\ndraft: true\n---\nbody";
        let (fm, _) = FrontMatter::parse(content);
        assert_eq!(fm.get("draft"), Some("true"));
        assert_eq!(fm.get("tags"), Some(""));
        assert_eq!(fm.get("# a comment"), None);
    }

    #[test]
    fn test_quoted_values() {
        let content = "---\ntitle: 'It''s here: today'\nsummary: \"Tab\\tseparated\"\ndate: 01-01-2023\n---\n";
        let (fm, _) = FrontMatter::parse(content);
        assert_eq!(fm.get("title"), Some("It's here: today"));
        assert_eq!(fm.get("summary"), Some("Tab\tseparated"));
        assert_eq!(fm.get("date"), Some("01-01-2023"));
    }

    #[test]
    fn test_crlf_line_endings() {
        let content = "---\r\ntitle: Windows\r\n---\r\nbody";
        let (fm, remaining) = FrontMatter::parse(content);
        assert_eq!(fm.get("title"), Some("Windows"));
        assert_eq!(remaining, "body");
    }
}
