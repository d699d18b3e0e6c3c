//! Content loader - reads post files and parses them into posts

use std::cmp::Ordering;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Component, Path, PathBuf};

use super::Post;
use crate::error::{ContentError, Result};

/// Raw text of one content file and the name it was loaded under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub source_name: String,
    pub raw_text: String,
}

impl RawDocument {
    pub fn new(source_name: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            raw_text: raw_text.into(),
        }
    }
}

/// Source of raw post documents
pub trait ContentRepository {
    /// All documents, in no particular order
    fn list(&self) -> Result<Vec<RawDocument>>;

    /// Store a new document. Fails if one with the same name exists.
    fn create(&self, doc: &RawDocument) -> Result<PathBuf>;
}

/// Markdown files in a single directory
#[derive(Debug, Clone)]
pub struct DirectoryRepository {
    dir: PathBuf,
}

impl DirectoryRepository {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

impl ContentRepository for DirectoryRepository {
    fn list(&self) -> Result<Vec<RawDocument>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut docs = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(&path) {
                continue;
            }

            let source_name = entry.file_name().to_string_lossy().to_string();
            match fs::read_to_string(&path) {
                Ok(raw_text) => docs.push(RawDocument {
                    source_name,
                    raw_text,
                }),
                Err(e) => tracing::warn!("Failed to read {:?}: {}", path, e),
            }
        }

        Ok(docs)
    }

    fn create(&self, doc: &RawDocument) -> Result<PathBuf> {
        if !is_plain_file_name(&doc.source_name) {
            return Err(ContentError::InvalidName(doc.source_name.clone()));
        }

        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(&doc.source_name);
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(ContentError::AlreadyExists(path));
            }
            Err(e) => return Err(e.into()),
        };
        file.write_all(doc.raw_text.as_bytes())?;
        Ok(path)
    }
}

/// A single normal path component with no line breaks
pub fn is_plain_file_name(name: &str) -> bool {
    if name.contains(['\n', '\r', '/', '\\']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension().map(|e| e == "md").unwrap_or(false)
}

/// Parses posts out of a repository on every call
pub struct PostStore<R> {
    repo: R,
}

impl<R: ContentRepository> PostStore<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Parse every document, newest first.
    ///
    /// A malformed document is logged and skipped.
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        let (mut posts, _) = self.load_all()?;
        sort_newest_first(&mut posts);
        Ok(posts)
    }

    /// Parse every document, returning the posts and the names of
    /// documents that failed to parse. Both are ordered by source name.
    pub fn load_all(&self) -> Result<(Vec<Post>, Vec<String>)> {
        let mut docs = self.repo.list()?;
        docs.sort_by(|a, b| a.source_name.cmp(&b.source_name));
        let mut posts = Vec::with_capacity(docs.len());
        let mut malformed = Vec::new();

        for doc in docs {
            match Post::parse(&doc.raw_text, &doc.source_name) {
                Ok(post) => posts.push(post),
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", doc.source_name, e);
                    malformed.push(doc.source_name);
                }
            }
        }

        tracing::debug!("Parsed {} posts", posts.len());
        Ok((posts, malformed))
    }

    /// Find a post by its parsed id. When several files declare the same
    /// id, the one with the first source name wins.
    pub fn find_post(&self, id: &str) -> Result<Option<Post>> {
        let (posts, _) = self.load_all()?;
        Ok(posts.into_iter().find(|p| p.id == id))
    }

    /// Write a new post as `<id>.md`
    pub fn save_post(&self, post: &Post) -> Result<PathBuf> {
        self.save_post_as(post, &format!("{}.md", post.id))
    }

    /// Write a new post under the given file name
    pub fn save_post_as(&self, post: &Post, source_name: &str) -> Result<PathBuf> {
        let doc = RawDocument::new(source_name, post.to_markdown());
        let path = self.repo.create(&doc)?;
        tracing::info!("Saved post {} to {:?}", post.id, path);
        Ok(path)
    }
}

/// Sort by parsed date descending. Posts with unrecognized dates go last;
/// ties are ordered by id.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| {
        let by_date = match (a.sort_date(), b.sort_date()) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_date.then_with(|| a.id.cmp(&b.id))
    });
}
