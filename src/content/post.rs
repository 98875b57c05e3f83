//! Post model and the ordered post list

use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;
use std::ops::Deref;

use crate::helpers::display_date;

/// A blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Post title
    pub title: String,

    /// Short description shown in listings
    pub summary: String,

    /// Publication date
    pub date: NaiveDate,

    /// Rendered HTML content
    pub html: String,

    /// File stem of the source; also the output file name
    pub slug: String,

    /// Publication date formatted for display (`Dec 25, 2023`)
    pub publish_date: String,
}

impl Post {
    /// Create a new post, deriving the display date from `date`
    pub fn new(title: String, summary: String, date: NaiveDate, html: String, slug: String) -> Self {
        let publish_date = display_date(&date);
        Self {
            title,
            summary,
            date,
            html,
            slug,
            publish_date,
        }
    }

    /// Output path of this post relative to the output root
    pub fn output_path(&self) -> String {
        format!("posts/{}.html", self.slug)
    }
}

/// Newest first; same-day posts ordered by slug
fn newest_first(a: &Post, b: &Post) -> Ordering {
    b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug))
}

/// Previous/next neighbours of a post in the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation<'a> {
    pub previous: Option<&'a Post>,
    pub next: Option<&'a Post>,
}

/// All posts of one build, newest first
///
/// The order is fixed at construction and drives both listing pages and
/// previous/next navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostList {
    posts: Vec<Post>,
}

impl PostList {
    /// Sort `posts` into publication order
    pub fn new(mut posts: Vec<Post>) -> Self {
        posts.sort_by(newest_first);
        Self { posts }
    }

    /// The first `n` posts (fewer if the list is shorter)
    pub fn latest(&self, n: usize) -> &[Post] {
        &self.posts[..n.min(self.posts.len())]
    }

    /// Circular navigation for the post at `index`
    ///
    /// The first post's previous is the last post and the last post's next is
    /// the first, so a single post links to itself both ways.
    pub fn navigation(&self, index: usize) -> Navigation<'_> {
        let len = self.posts.len();
        if index >= len {
            return Navigation {
                previous: None,
                next: None,
            };
        }

        let previous = if index == 0 { len - 1 } else { index - 1 };
        let next = if index + 1 == len { 0 } else { index + 1 };

        Navigation {
            previous: self.posts.get(previous),
            next: self.posts.get(next),
        }
    }

    pub fn as_slice(&self) -> &[Post] {
        &self.posts
    }
}

impl Deref for PostList {
    type Target = [Post];

    fn deref(&self) -> &[Post] {
        &self.posts
    }
}
