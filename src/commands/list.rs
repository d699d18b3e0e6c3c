//! List site content

use anyhow::Result;
use std::collections::HashMap;

use crate::content::Post;
use crate::Folio;

/// List site content by type
pub fn run(folio: &Folio, content_type: &str) -> Result<()> {
    let posts = folio.store().load_posts()?;

    match content_type {
        "post" | "posts" => {
            println!("Posts ({}):", posts.len());
            for post in &posts {
                println!("  {} - {} [{}]", post.date, post.title, post.id);
            }
        }
        "tag" | "tags" => {
            let tags = count_by(&posts, |post| post.tags.clone());
            println!("Tags ({}):", tags.len());
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        "category" | "categories" => {
            let categories = count_by(&posts, |post| {
                if post.category.is_empty() {
                    Vec::new()
                } else {
                    vec![post.category.clone()]
                }
            });
            println!("Categories ({}):", categories.len());
            for (category, count) in categories {
                println!("  {} ({})", category, count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, category",
                content_type
            );
        }
    }

    Ok(())
}

/// Count occurrences of each key, most frequent first, then by name
fn count_by<F>(posts: &[Post], keys: F) -> Vec<(String, usize)>
where
    F: Fn(&Post) -> Vec<String>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for post in posts {
        for key in keys(post) {
            *counts.entry(key).or_insert(0) += 1;
        }
    }

    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}
