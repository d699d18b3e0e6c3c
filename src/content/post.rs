//! Post model

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::frontmatter::{self, FieldValue, FrontMatter, DELIMITER};
use crate::error::{ContentError, Result};

/// Front-matter keys projected onto named `Post` fields
const KNOWN_KEYS: [&str; 8] = [
    "id",
    "title",
    "excerpt",
    "date",
    "tags",
    "category",
    "coverImage",
    "content",
];

/// A blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Lookup key and URL slug
    pub id: String,

    pub title: String,

    /// Short summary
    pub excerpt: String,

    /// Publication date, kept verbatim
    pub date: String,

    pub tags: Vec<String>,

    /// Usually one of [`Category`], but not enforced
    pub category: String,

    /// Markdown body without the front-matter
    pub content: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,

    /// Front-matter keys with no named field, in source order
    #[serde(flatten)]
    pub extra: IndexMap<String, FieldValue>,
}

impl Post {
    /// Parse a post from raw file text.
    ///
    /// `source_name` is only used for the id when the front-matter has no
    /// non-empty `id`; a trailing `.md` is stripped from it. The id is
    /// therefore never empty unless both the declared id and the stripped
    /// source name are empty (e.g. a source name of `""` or `".md"`).
    pub fn parse(raw_text: &str, source_name: &str) -> Result<Self> {
        let (block, content) =
            frontmatter::split_document(raw_text).ok_or_else(|| ContentError::MalformedDocument {
                source_name: source_name.to_string(),
            })?;

        let mut fm = FrontMatter::parse(&block);
        let mut scalar = |key: &str| fm.remove(key).map(FieldValue::into_scalar);

        let id = scalar("id")
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| id_from_source_name(source_name));
        let title = scalar("title").unwrap_or_default();
        let excerpt = scalar("excerpt").unwrap_or_default();
        let date = scalar("date").unwrap_or_default();
        let category = scalar("category").unwrap_or_default();
        let cover_image = scalar("coverImage").filter(|c| !c.is_empty());
        let tags = fm
            .remove("tags")
            .map(FieldValue::into_list)
            .unwrap_or_default();

        // The body always wins over a `content` key
        fm.remove("content");

        Ok(Self {
            id,
            title,
            excerpt,
            date,
            tags,
            category,
            content,
            cover_image,
            extra: fm.into_fields(),
        })
    }

    /// Serialize back to the front-matter file format.
    ///
    /// The bracket encoding has no escaping, so some values do not survive
    /// a parse of the output:
    ///
    /// - tags containing `,` or `]` are split differently;
    /// - a string field holding a bracketed value is read back as a list and
    ///   re-encoded, so `[a,b]` becomes `[a, b]` and `[ ]` becomes `[]`;
    /// - values containing a newline or ending in `---` break the block.
    pub fn to_markdown(&self) -> String {
        let mut fm = FrontMatter::default();
        fm.insert("id", FieldValue::Scalar(self.id.clone()));
        fm.insert("title", FieldValue::Scalar(self.title.clone()));
        fm.insert("excerpt", FieldValue::Scalar(self.excerpt.clone()));
        fm.insert("date", FieldValue::Scalar(self.date.clone()));
        fm.insert("tags", FieldValue::List(self.tags.clone()));
        fm.insert("category", FieldValue::Scalar(self.category.clone()));
        if let Some(cover) = &self.cover_image {
            fm.insert("coverImage", FieldValue::Scalar(cover.clone()));
        }
        for (key, value) in &self.extra {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                fm.insert(key.clone(), value.clone());
            }
        }

        format!(
            "{}{}{}\n{}\n",
            DELIMITER,
            fm.render(),
            DELIMITER,
            self.content
        )
    }

    /// The category as a known enum value, if it is one
    pub fn category_kind(&self) -> Option<Category> {
        self.category.parse().ok()
    }

    /// Date used for ordering; `None` when the string is not a recognizable date
    pub fn sort_date(&self) -> Option<NaiveDate> {
        crate::helpers::date::parse_date(&self.date)
    }
}

/// Strip a trailing `.md` from a file name
fn id_from_source_name(source_name: &str) -> String {
    source_name
        .strip_suffix(".md")
        .unwrap_or(source_name)
        .to_string()
}

/// Post categories understood by the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Dev,
    #[serde(rename = "MICE")]
    Mice,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Dev => "Dev",
            Category::Mice => "MICE",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Dev" => Ok(Category::Dev),
            "MICE" => Ok(Category::Mice),
            other => Err(format!("unknown category: {}", other)),
        }
    }
}

/// Input for authoring a new post
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub id: Option<String>,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub tags: Vec<String>,
    pub category: String,
    pub cover_image: Option<String>,
}

impl PostDraft {
    /// Build the post, deriving the id from the title when none is given.
    ///
    /// Front-matter values are folded onto a single line.
    pub fn into_post(self, date: NaiveDate) -> Post {
        let title = single_line(&self.title);
        let id = self
            .id
            .map(|id| single_line(&id))
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| slug_for(&title));

        Post {
            id,
            title,
            excerpt: single_line(&self.excerpt),
            date: date.format("%Y-%m-%d").to_string(),
            tags: self
                .tags
                .iter()
                .map(|t| single_line(t))
                .filter(|t| !t.is_empty())
                .collect(),
            category: single_line(&self.category),
            content: self.content.trim().to_string(),
            cover_image: self
                .cover_image
                .map(|c| single_line(&c))
                .filter(|c| !c.is_empty()),
            extra: IndexMap::new(),
        }
    }
}

/// Join the trimmed non-blank lines of `s` with single spaces
fn single_line(s: &str) -> String {
    s.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn slug_for(title: &str) -> String {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug
    }
}

/// Split a comma separated tag string, dropping empty entries
pub fn split_tags(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
