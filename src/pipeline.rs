//! Per-document build pipeline.
//!
//! Each source file goes through:
//!
//! ```text
//! read → front matter → draft filter → markdown → read time → slug → template → write
//! ```
//!
//! [`render_document`] is the pure part (text in, page + [`Post`] out);
//! [`run`] adds the filesystem reads and writes and enforces slug uniqueness.
//! The first error aborts the whole run.

use crate::frontmatter::{self, FrontMatterError};
use crate::types::Post;
use crate::{markdown, read_time, scan, template};
use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },
    #[error("slug '{slug}' is used by both {first} and {second}")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
    #[error("{path}: slug '{slug}' must be a relative path without '..'")]
    InvalidSlug { slug: String, path: PathBuf },
}

/// A post ready to be written.
#[derive(Debug, Clone)]
pub struct RenderedPost {
    pub post: Post,
    /// Full HTML page from the post template.
    pub html: String,
}

/// Result of running the pipeline over all discovered documents.
#[derive(Debug, Default)]
pub struct PipelineOutcome {
    /// Published posts in discovery order.
    pub posts: Vec<Post>,
    /// Source files skipped because they are drafts.
    pub drafts: Vec<PathBuf>,
}

/// Render one document. Returns `Ok(None)` for drafts.
pub fn render_document(
    source: &Path,
    raw: &str,
    post_template: &str,
) -> Result<Option<RenderedPost>, FrontMatterError> {
    let (meta, body) = frontmatter::parse(raw)?;
    if meta.draft {
        return Ok(None);
    }

    let content = markdown::render(body);
    let read_time = read_time::estimate(body);
    let slug = resolve_slug(meta.slug.as_deref(), source);

    let post = Post {
        meta,
        slug,
        read_time,
        source: source.to_path_buf(),
    };
    let html = template::render(post_template, &post.template_fields(content));

    Ok(Some(RenderedPost { post, html }))
}

/// Front matter `slug` if set and non-blank, otherwise the file stem.
pub fn resolve_slug(explicit: Option<&str>, source: &Path) -> String {
    explicit
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| scan::file_stem(source))
}

/// Reject slugs that would place the page outside the output directory.
///
/// Only plain path segments are allowed: `2024/hello` is fine, while `/etc`,
/// `../up` and `.` are not.
pub fn check_slug(slug: &str, source: &Path) -> Result<(), PipelineError> {
    let contained = Path::new(slug)
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    if contained {
        Ok(())
    } else {
        Err(PipelineError::InvalidSlug {
            slug: slug.to_string(),
            path: source.to_path_buf(),
        })
    }
}

/// Write a rendered post to `<dist_dir>/<slug>/index.html`.
pub fn write_post(dist_dir: &Path, rendered: &RenderedPost) -> Result<PathBuf, PipelineError> {
    let page_path = dist_dir.join(rendered.post.output_path());
    if let Some(parent) = page_path.parent() {
        fs::create_dir_all(parent).map_err(|source| PipelineError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(&page_path, &rendered.html).map_err(|source| PipelineError::Io {
        path: page_path.clone(),
        source,
    })?;
    Ok(page_path)
}

/// Run every source through the pipeline, writing pages into `dist_dir`.
///
/// When `dist_dir` is `None` nothing is written; documents are still parsed,
/// rendered, and checked for duplicate slugs.
pub fn run(
    sources: &[PathBuf],
    post_template: &str,
    dist_dir: Option<&Path>,
) -> Result<PipelineOutcome, PipelineError> {
    let mut outcome = PipelineOutcome::default();
    let mut seen: HashMap<String, PathBuf> = HashMap::new();

    for source in sources {
        let raw = fs::read_to_string(source).map_err(|e| PipelineError::Io {
            path: source.clone(),
            source: e,
        })?;

        let rendered = render_document(source, &raw, post_template).map_err(|e| {
            PipelineError::Metadata {
                path: source.clone(),
                source: e,
            }
        })?;

        let Some(rendered) = rendered else {
            outcome.drafts.push(source.clone());
            continue;
        };

        check_slug(&rendered.post.slug, source)?;
        if let Some(first) = seen.get(&rendered.post.slug) {
            return Err(PipelineError::DuplicateSlug {
                slug: rendered.post.slug.clone(),
                first: first.clone(),
                second: source.clone(),
            });
        }
        seen.insert(rendered.post.slug.clone(), source.clone());

        if let Some(dist) = dist_dir {
            write_post(dist, &rendered)?;
        }
        outcome.posts.push(rendered.post);
    }

    Ok(outcome)
}
