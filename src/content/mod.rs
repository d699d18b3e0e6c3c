//! Content module - posts, front-matter and the post store

mod frontmatter;
pub mod loader;
mod post;

pub use frontmatter::{split_document, FieldValue, FrontMatter, DELIMITER};
pub use loader::{ContentRepository, DirectoryRepository, PostStore, RawDocument};
pub use post::{split_tags, Category, Post, PostDraft};

use crate::error::Result;

/// Parse raw file text into a post. See [`Post::parse`].
pub fn parse(raw_text: &str, source_name: &str) -> Result<Post> {
    Post::parse(raw_text, source_name)
}
