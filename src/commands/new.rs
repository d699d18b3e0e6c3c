//! Create a new post

use anyhow::Result;
use chrono::NaiveDate;
use std::path::PathBuf;

use crate::content::loader::is_plain_file_name;
use crate::content::{Post, PostDraft};
use crate::helpers::date;
use crate::Folio;

/// Write a new post built from `draft`, dated today
pub fn create_post(folio: &Folio, draft: PostDraft) -> Result<PathBuf> {
    create_post_on(folio, draft, date::today())
}

/// Write a new post built from `draft` with an explicit date
pub fn create_post_on(folio: &Folio, mut draft: PostDraft, day: NaiveDate) -> Result<PathBuf> {
    if draft.title.trim().is_empty() {
        anyhow::bail!("A post needs a title");
    }
    if draft.category.is_empty() {
        draft.category = folio.config.default_category.clone();
    }

    let post = draft.into_post(day);
    let filename = file_name_for(&folio.config.new_post_name, &post, day);
    validate(&post, &filename)?;

    let store = folio.store();
    if store.find_post(&post.id)?.is_some() {
        anyhow::bail!("A post with id {:?} already exists", post.id);
    }

    let path = store.save_post_as(&post, &filename)?;
    println!("Created: {:?}", path);

    Ok(path)
}

/// Refuse posts whose file would land outside the posts directory or
/// would not parse back to the same post
fn validate(post: &Post, filename: &str) -> Result<()> {
    if !is_plain_file_name(&post.id) {
        anyhow::bail!("Invalid post id {:?}: must be a single file name", post.id);
    }
    if !is_plain_file_name(filename) {
        anyhow::bail!("Invalid post file name {:?}", filename);
    }

    let scalars = [
        ("id", post.id.as_str()),
        ("title", post.title.as_str()),
        ("excerpt", post.excerpt.as_str()),
        ("category", post.category.as_str()),
        ("coverImage", post.cover_image.as_deref().unwrap_or_default()),
    ];
    for (key, value) in scalars {
        if value.ends_with("---") {
            anyhow::bail!("The {} must not end with \"---\": {:?}", key, value);
        }
    }

    if Post::parse(&post.to_markdown(), filename)? != *post {
        anyhow::bail!(
            "Post {:?} cannot be stored faithfully (tags may not contain ',' or ']')",
            post.id
        );
    }

    Ok(())
}

/// Expand the `new_post_name` pattern
fn file_name_for(pattern: &str, post: &Post, day: NaiveDate) -> String {
    let name = pattern
        .replace(":title", &post.id)
        .replace(":id", &post.id)
        .replace(":year", &day.format("%Y").to_string())
        .replace(":month", &day.format("%m").to_string())
        .replace(":day", &day.format("%d").to_string());

    if name.ends_with(".md") {
        name
    } else {
        format!("{}.md", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::split_tags;
    use std::fs;
    use tempfile::TempDir;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
    }

    fn draft(title: &str) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            excerpt: "Short".to_string(),
            content: "# Body\n\ntext".to_string(),
            tags: split_tags("Rust, Axum"),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_post_writes_parseable_file() {
        let tmp = TempDir::new().unwrap();
        let folio = Folio::new(tmp.path()).unwrap();

        let path = create_post_on(&folio, draft("My First Post"), day()).unwrap();
        assert_eq!(path, tmp.path().join("posts").join("my-first-post.md"));

        let raw = fs::read_to_string(&path).unwrap();
        let post = Post::parse(&raw, "my-first-post.md").unwrap();
        assert_eq!(post.id, "my-first-post");
        assert_eq!(post.date, "2024-07-01");
        assert_eq!(post.category, "Dev");
        assert_eq!(post.tags, vec!["Rust", "Axum"]);
        assert_eq!(post.content, "# Body\n\ntext");
    }

    #[test]
    fn test_create_post_rejects_duplicates_and_empty_titles() {
        let tmp = TempDir::new().unwrap();
        let folio = Folio::new(tmp.path()).unwrap();

        create_post_on(&folio, draft("Same"), day()).unwrap();
        assert!(create_post_on(&folio, draft("Same"), day()).is_err());
        assert!(create_post_on(&folio, draft("   "), day()).is_err());
    }

    #[test]
    fn test_create_post_rejects_escaping_id() {
        let tmp = TempDir::new().unwrap();
        let folio = Folio::new(tmp.path()).unwrap();

        for id in ["../escaped", "nested/post", ".."] {
            let mut d = draft("Escape");
            d.id = Some(id.to_string());
            assert!(create_post_on(&folio, d, day()).is_err(), "id {:?}", id);
        }
        assert!(!tmp.path().join("escaped.md").exists());
        assert!(!tmp.path().join("posts").join("nested").exists());
    }

    #[test]
    fn test_create_post_title_cannot_inject_fields() {
        let tmp = TempDir::new().unwrap();
        let folio = Folio::new(tmp.path()).unwrap();

        let path =
            create_post_on(&folio, draft("Hello\ncategory: MICE\nid: hijack"), day()).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        let post = Post::parse(&raw, "x.md").unwrap();
        assert_eq!(post.id, "hello-category-mice-id-hijack");
        assert_eq!(post.title, "Hello category: MICE id: hijack");
        assert_eq!(post.category, "Dev");
        assert!(folio.store().find_post("hijack").unwrap().is_none());
    }

    #[test]
    fn test_create_post_rejects_trailing_delimiter() {
        let tmp = TempDir::new().unwrap();
        let folio = Folio::new(tmp.path()).unwrap();

        assert!(create_post_on(&folio, draft("Breaking ---"), day()).is_err());

        let mut d = draft("Fine title");
        d.excerpt = "ends badly---".to_string();
        assert!(create_post_on(&folio, d, day()).is_err());
        assert!(folio.store().load_posts().unwrap().is_empty());
    }

    #[test]
    fn test_create_post_rejects_unrepresentable_tags() {
        let tmp = TempDir::new().unwrap();
        let folio = Folio::new(tmp.path()).unwrap();

        let mut d = draft("Tagged");
        d.tags = vec!["a,b".to_string()];
        assert!(create_post_on(&folio, d, day()).is_err());
        assert!(!tmp.path().join("posts").join("tagged.md").exists());
    }

    #[test]
    fn test_file_name_pattern() {
        let post = draft("Hello").into_post(day());
        assert_eq!(file_name_for(":year-:month-:day-:title", &post, day()), "2024-07-01-hello.md");
        assert_eq!(file_name_for(":title.md", &post, day()), "hello.md");
    }
}
