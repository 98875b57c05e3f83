//! Content module - loads posts and renders their markdown

mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use frontmatter::FrontMatter;
pub use loader::{DroppedPost, LoadedPosts, PostError, PostLoader};
pub use markdown::MarkdownRenderer;
pub use post::{Navigation, Post, PostList};
