//! Front-matter parsing

use indexmap::IndexMap;
use serde::Serialize;

/// Delimiter line separating the front-matter block from the body
pub const DELIMITER: &str = "---\n";

/// A single front-matter value: either a plain string or a `[a, b]` list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Scalar(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Interpret an already trimmed raw value
    fn parse(raw: &str) -> Self {
        match raw.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
            Some(inner) if inner.trim().is_empty() => FieldValue::List(Vec::new()),
            Some(inner) => FieldValue::List(inner.split(',').map(|s| s.trim().to_string()).collect()),
            None => FieldValue::Scalar(raw.to_string()),
        }
    }

    /// Render the value the way it appears after `key: `
    pub fn encode(&self) -> String {
        match self {
            FieldValue::Scalar(s) => s.clone(),
            FieldValue::List(items) => format!("[{}]", items.join(", ")),
        }
    }

    /// Project into a string field. Lists are re-encoded in bracket form.
    pub fn into_scalar(self) -> String {
        match self {
            FieldValue::Scalar(s) => s,
            list => list.encode(),
        }
    }

    /// Project into a list field. A non-empty scalar becomes a one-element list.
    pub fn into_list(self) -> Vec<String> {
        match self {
            FieldValue::List(items) => items,
            FieldValue::Scalar(s) if s.is_empty() => Vec::new(),
            FieldValue::Scalar(s) => vec![s],
        }
    }
}

/// Ordered key/value pairs read from a front-matter block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    fields: IndexMap<String, FieldValue>,
}

impl FrontMatter {
    /// Parse the lines of a front-matter block.
    ///
    /// Each line is split at its first `:`. Lines without a colon are
    /// skipped. A repeated key keeps its first position but takes the
    /// last value.
    pub fn parse(block: &str) -> Self {
        let mut fields = IndexMap::new();

        for line in block.split('\n') {
            let Some(colon) = line.find(':') else {
                continue;
            };
            let key = line[..colon].trim();
            let value = line[colon + 1..].trim();
            fields.insert(key.to_string(), FieldValue::parse(value));
        }

        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Remove a key, preserving the order of the remaining ones
    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.fields.shift_remove(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) {
        self.fields.insert(key.into(), value);
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }

    pub fn into_fields(self) -> IndexMap<String, FieldValue> {
        self.fields
    }

    /// Render as `key: value` lines, each terminated by a newline
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.fields {
            out.push_str(key);
            out.push_str(": ");
            out.push_str(&value.encode());
            out.push('\n');
        }
        out
    }
}

/// Split a document into its front-matter block and trimmed body.
///
/// Line endings are normalized to `\n` first. Returns `None` when the
/// text has fewer than two delimiters. Everything after the second
/// delimiter is the body, including further `---` lines.
pub fn split_document(raw: &str) -> Option<(String, String)> {
    let normalized = raw.replace("\r\n", "\n");
    let mut parts = normalized.split(DELIMITER);

    let _preamble = parts.next()?;
    let block = parts.next()?;
    let rest: Vec<&str> = parts.collect();
    if rest.is_empty() {
        return None;
    }

    let body = rest.join(DELIMITER).trim().to_string();
    Some((block.to_string(), body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scalar_and_list() {
        let fm = FrontMatter::parse("title: Hello World\ntags: [React, Node.js, AI]\n");
        assert_eq!(
            fm.get("title"),
            Some(&FieldValue::Scalar("Hello World".to_string()))
        );
        assert_eq!(
            fm.get("tags"),
            Some(&FieldValue::List(vec![
                "React".to_string(),
                "Node.js".to_string(),
                "AI".to_string()
            ]))
        );
    }

    #[test]
    fn test_value_split_at_first_colon() {
        let fm = FrontMatter::parse("coverImage: https://example.com/a.png\n");
        assert_eq!(
            fm.get("coverImage"),
            Some(&FieldValue::Scalar("https://example.com/a.png".to_string()))
        );
    }

    #[test]
    fn test_lines_without_colon_are_skipped() {
        let fm = FrontMatter::parse("just some noise\n\ntitle: Kept\n   \n");
        assert_eq!(fm.len(), 1);
        assert_eq!(fm.get("title").cloned().map(FieldValue::into_scalar), Some("Kept".to_string()));
    }

    #[test]
    fn test_repeated_key_last_wins_first_position() {
        let fm = FrontMatter::parse("a: 1\nb: 2\na: 3\n");
        let keys: Vec<_> = fm.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(fm.get("a"), Some(&FieldValue::Scalar("3".to_string())));
    }

    #[test]
    fn test_empty_brackets_are_empty_list() {
        let fm = FrontMatter::parse("tags: []\nother: [ ]\n");
        assert_eq!(fm.get("tags"), Some(&FieldValue::List(Vec::new())));
        assert_eq!(fm.get("other"), Some(&FieldValue::List(Vec::new())));
    }

    #[test]
    fn test_list_keeps_duplicates_and_empty_elements() {
        let fm = FrontMatter::parse("tags: [a, a,, b]");
        assert_eq!(
            fm.get("tags").cloned().map(FieldValue::into_list),
            Some(vec![
                "a".to_string(),
                "a".to_string(),
                String::new(),
                "b".to_string()
            ])
        );
    }

    #[test]
    fn test_comma_inside_tag_splits() {
        let fm = FrontMatter::parse("tags: [Hello, World]");
        assert_eq!(
            fm.get("tags").cloned().map(FieldValue::into_list),
            Some(vec!["Hello".to_string(), "World".to_string()])
        );
    }

    #[test]
    fn test_projection_between_shapes() {
        let list = FieldValue::List(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(list.into_scalar(), "[a, b]");
        assert_eq!(
            FieldValue::Scalar("rust".to_string()).into_list(),
            vec!["rust".to_string()]
        );
        assert!(FieldValue::Scalar(String::new()).into_list().is_empty());
    }

    #[test]
    fn test_render_round_trips() {
        let fm = FrontMatter::parse("id: x\ntags: [a, b]\nempty:\n");
        assert_eq!(fm.render(), "id: x\ntags: [a, b]\nempty: \n");
        assert_eq!(FrontMatter::parse(&fm.render()), fm);
    }

    #[test]
    fn test_split_document_rejoins_body() {
        let raw = "---\ntitle: T\n---\n\nbefore\n---\nafter\n";
        let (block, body) = split_document(raw).unwrap();
        assert_eq!(block, "title: T\n");
        assert_eq!(body, "before\n---\nafter");
    }

    #[test]
    fn test_split_document_normalizes_crlf() {
        let raw = "---\r\ntitle: T\r\n---\r\nbody\r\n";
        let (block, body) = split_document(raw).unwrap();
        assert_eq!(block, "title: T\n");
        assert_eq!(body, "body");
    }

    #[test]
    fn test_split_document_requires_two_delimiters() {
        assert!(split_document("# Just markdown\n\nNo frontmatter.").is_none());
        assert!(split_document("---\ntitle: Only opened\n").is_none());
        assert!(split_document("").is_none());
    }

    #[test]
    fn test_split_document_discards_preamble() {
        let (block, body) = split_document("junk\n---\nid: a\n---\nbody").unwrap();
        assert_eq!(block, "id: a\n");
        assert_eq!(body, "body");
    }
}
