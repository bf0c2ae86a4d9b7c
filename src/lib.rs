//! # Quill
//!
//! A minimal static site generator for markdown blogs. A flat directory of
//! markdown posts with YAML front matter becomes one clean-URL page per post,
//! a homepage listing, and a `sitemap.xml`.
//!
//! # Architecture: One Pass, Two Aggregates
//!
//! ```text
//! content/*.md ──► pipeline ──► dist/<slug>/index.html
//!                     │
//!                     ▼
//!                 Vec<Post> ──► collection ──► dist/index.html
//!                                          └─► dist/sitemap.xml
//! ```
//!
//! Every post is rendered and written as soon as it is parsed; its [`types::Post`]
//! record is collected. Once all posts are in, the collection is sorted once and
//! both the homepage and the sitemap are rendered from that same order.
//!
//! The output directory is wiped at the start of every build. There is no
//! incremental state: a rebuild with unchanged input produces identical files,
//! apart from the sitemap's root `lastmod`, which is the build time.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`build`] | Orchestrator: output directory lifecycle, stage sequencing, final writes |
//! | [`scan`] | Discovers `*.md` files in the content directory |
//! | [`pipeline`] | Per-document: front matter → draft filter → markdown → read time → template |
//! | [`collection`] | Date ordering, homepage listing, sitemap |
//! | [`frontmatter`] | Splits a document into typed metadata and markdown body |
//! | [`markdown`] | Markdown to HTML via pulldown-cmark |
//! | [`template`] | `{{ key }}` substitution and template loading |
//! | [`read_time`] | Words-per-minute reading time estimate |
//! | [`date`] | Front matter date parsing and ISO formatting |
//! | [`assets`] | Copies the public directory into the output root |
//! | [`config`] | `config.toml` loading, merging, CLI overrides, validation |
//! | [`types`] | The [`types::Post`] record shared between stages |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Drafts Are Invisible
//!
//! A post with `draft: true` produces nothing at all: no page, no listing
//! entry, no sitemap URL. It is not merely hidden from the homepage.
//!
//! ## Duplicate Slugs Are Errors
//!
//! Two posts resolving to the same slug would write to the same directory and
//! the later one would silently win. The pipeline rejects this instead.
//!
//! ## Dumb Templates
//!
//! Templates are user-editable HTML files with `{{ key }}` tokens and nothing
//! else. No escaping, no logic. Values come from a fixed field set with fixed
//! defaults, so a template can never end up with an unresolved known field.

pub mod assets;
pub mod build;
pub mod collection;
pub mod config;
pub mod date;
pub mod frontmatter;
pub mod markdown;
pub mod output;
pub mod pipeline;
pub mod read_time;
pub mod scan;
pub mod template;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
