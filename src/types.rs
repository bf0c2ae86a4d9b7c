//! Shared types passed from the document pipeline to the collection stage.

use crate::date;
use crate::frontmatter::FrontMatter;
use crate::template::Fields;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_AUTHOR: &str = "Anonymous";

/// A published post: its front matter plus the derived fields.
///
/// Only non-draft documents become posts. Display defaults (`"Untitled"`,
/// `"Anonymous"`, empty strings) are resolved by the accessors, so the raw
/// front matter stays available as written.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub meta: FrontMatter,
    /// Output directory name and URL segment. Never empty.
    pub slug: String,
    /// Minutes, at least 1.
    pub read_time: u32,
    /// Source file, for reporting and duplicate-slug errors.
    pub source: PathBuf,
}

impl Post {
    pub fn title(&self) -> &str {
        self.meta.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    pub fn description(&self) -> &str {
        self.meta.description.as_deref().unwrap_or_default()
    }

    pub fn author(&self) -> &str {
        self.meta.author.as_deref().unwrap_or(DEFAULT_AUTHOR)
    }

    /// Date exactly as written in the front matter, or empty.
    pub fn date(&self) -> &str {
        self.meta.date.as_deref().unwrap_or_default()
    }

    pub fn image(&self) -> &str {
        self.meta.image.as_deref().unwrap_or_default()
    }

    /// Parsed publish date; `None` if missing or unparseable.
    pub fn published(&self) -> Option<DateTime<Utc>> {
        self.meta.date.as_deref().and_then(date::parse_date)
    }

    /// Path of the generated page relative to the output root.
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(&self.slug).join("index.html")
    }

    /// Field map for the post template, with `content` as the rendered body.
    pub fn template_fields(&self, content: String) -> Fields<'static> {
        Fields::from([
            ("title", self.title().to_string()),
            ("description", self.description().to_string()),
            ("author", self.author().to_string()),
            ("date", self.date().to_string()),
            ("image", self.image().to_string()),
            ("readTime", self.read_time.to_string()),
            ("slug", self.slug.clone()),
            ("content", content),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(meta: FrontMatter) -> Post {
        Post {
            meta,
            slug: "hello".to_string(),
            read_time: 2,
            source: PathBuf::from("content/hello.md"),
        }
    }

    #[test]
    fn defaults_for_missing_fields() {
        let p = post(FrontMatter::default());
        assert_eq!(p.title(), "Untitled");
        assert_eq!(p.description(), "");
        assert_eq!(p.author(), "Anonymous");
        assert_eq!(p.date(), "");
        assert_eq!(p.image(), "");
        assert_eq!(p.published(), None);
    }

    #[test]
    fn template_fields_cover_every_placeholder() {
        let p = post(FrontMatter {
            title: Some("Hi".to_string()),
            date: Some("2024-01-01".to_string()),
            ..Default::default()
        });
        let fields = p.template_fields("<p>x</p>".to_string());
        let keys: Vec<&str> = fields.keys().copied().collect();
        assert_eq!(
            keys,
            [
                "author",
                "content",
                "date",
                "description",
                "image",
                "readTime",
                "slug",
                "title"
            ]
        );
        assert_eq!(fields["title"], "Hi");
        assert_eq!(fields["author"], "Anonymous");
        assert_eq!(fields["readTime"], "2");
        assert_eq!(fields["slug"], "hello");
        assert_eq!(fields["content"], "<p>x</p>");
    }

    #[test]
    fn output_path_is_clean_url() {
        let p = post(FrontMatter::default());
        assert_eq!(p.output_path(), PathBuf::from("hello/index.html"));
    }
}
