//! folio: content engine for a personal portfolio and blog
//!
//! Posts are markdown files with a small `key: value` front-matter block.
//! This crate parses them into [`content::Post`] records, writes new ones,
//! and serves them as JSON next to a single-page frontend.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod server;

use anyhow::Result;
use std::path::Path;

use content::{DirectoryRepository, PostStore};

/// The main application handle
#[derive(Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Directory holding post markdown files
    pub posts_dir: std::path::PathBuf,
    /// Built frontend served for non-API routes
    pub dist_dir: std::path::PathBuf,
}

impl Folio {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let posts_dir = base_dir.join(&config.posts_dir);
        let dist_dir = base_dir.join(&config.dist_dir);

        Self {
            config,
            base_dir,
            posts_dir,
            dist_dir,
        }
    }

    /// Post store over the posts directory
    pub fn store(&self) -> PostStore<DirectoryRepository> {
        PostStore::new(DirectoryRepository::new(&self.posts_dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_without_config_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let folio = Folio::new(tmp.path()).unwrap();
        assert_eq!(folio.posts_dir, tmp.path().join("posts"));
        assert_eq!(folio.dist_dir, tmp.path().join("dist"));
    }

    #[test]
    fn test_new_reads_config() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("_config.yml"), "posts_dir: writing\n").unwrap();
        let folio = Folio::new(tmp.path()).unwrap();
        assert_eq!(folio.posts_dir, tmp.path().join("writing"));
    }
}
