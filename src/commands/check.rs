//! Validate every post file

use anyhow::Result;
use std::collections::HashMap;

use crate::Folio;

/// Outcome of checking the posts directory
#[derive(Debug, Default)]
pub struct CheckReport {
    pub parsed: usize,
    pub malformed: Vec<String>,
    /// Ids declared by more than one file
    pub duplicate_ids: Vec<String>,
    /// Posts whose category is not a known one, as `(id, category)`
    pub unknown_categories: Vec<(String, String)>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.malformed.is_empty() && self.duplicate_ids.is_empty()
    }
}

/// Parse every post and collect problems
pub fn check(folio: &Folio) -> Result<CheckReport> {
    let (posts, mut malformed) = folio.store().load_all()?;
    malformed.sort();

    let mut seen: HashMap<&str, usize> = HashMap::new();
    for post in &posts {
        *seen.entry(post.id.as_str()).or_insert(0) += 1;
    }
    let mut duplicate_ids: Vec<String> = seen
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(id, _)| id.to_string())
        .collect();
    duplicate_ids.sort();

    let mut unknown_categories: Vec<(String, String)> = posts
        .iter()
        .filter(|p| !p.category.is_empty() && p.category_kind().is_none())
        .map(|p| (p.id.clone(), p.category.clone()))
        .collect();
    unknown_categories.sort();

    Ok(CheckReport {
        parsed: posts.len(),
        malformed,
        duplicate_ids,
        unknown_categories,
    })
}

/// Run the check command; fails if any file is malformed or ids collide
pub fn run(folio: &Folio) -> Result<()> {
    let report = check(folio)?;

    println!("Parsed {} posts", report.parsed);
    for name in &report.malformed {
        println!("  malformed: {}", name);
    }
    for id in &report.duplicate_ids {
        println!("  duplicate id: {}", id);
    }
    for (id, category) in &report.unknown_categories {
        tracing::warn!("Post {} has unknown category {:?}", id, category);
    }

    if !report.is_ok() {
        anyhow::bail!(
            "{} malformed file(s), {} duplicate id(s)",
            report.malformed.len(),
            report.duplicate_ids.len()
        );
    }

    Ok(())
}
