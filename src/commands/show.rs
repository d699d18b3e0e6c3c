//! Print a single post as JSON

use anyhow::Result;

use crate::Folio;

/// Print the post with the given id
pub fn run(folio: &Folio, id: &str) -> Result<()> {
    let Some(post) = folio.store().find_post(id)? else {
        anyhow::bail!("Post not found: {}", id);
    };

    println!("{}", serde_json::to_string_pretty(&post)?);
    Ok(())
}
