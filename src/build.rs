//! Build orchestration.
//!
//! Owns the output directory lifecycle and runs every stage in order:
//!
//! ```text
//! 1. Clear   dist/ is removed and recreated empty
//! 2. Assets  public/ → dist/ (if public/ exists)
//! 3. Load    templates/post.html, templates/index.html
//! 4. Posts   content/*.md → dist/<slug>/index.html
//! 5. Collect dist/index.html, dist/sitemap.xml
//! ```
//!
//! Every step is fatal on error. A failed build can leave `dist/` partially
//! populated; rebuilding is the only recovery and starts from scratch.

use crate::assets::{self, AssetError};
use crate::collection;
use crate::config::{ConfigError, SiteConfig};
use crate::pipeline::{self, PipelineError};
use crate::scan;
use crate::template::{TemplateError, Templates};
use crate::types::Post;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const HOMEPAGE_FILE: &str = "index.html";
pub const SITEMAP_FILE: &str = "sitemap.xml";

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Assets(#[from] AssetError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> BuildError + '_ {
    move |source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Summary of a finished build.
#[derive(Debug)]
pub struct BuildReport {
    /// Published posts, newest first.
    pub posts: Vec<Post>,
    /// Draft sources that were skipped.
    pub drafts: Vec<PathBuf>,
    /// Number of static files copied from the public directory.
    pub assets_copied: usize,
    pub dist_dir: PathBuf,
}

/// Summary of a dry run: what a build would publish.
#[derive(Debug)]
pub struct CheckReport {
    /// Published posts, newest first.
    pub posts: Vec<Post>,
    pub drafts: Vec<PathBuf>,
}

/// Run a full build. `built_at` becomes the sitemap root `lastmod`.
pub fn build(config: &SiteConfig, built_at: DateTime<Utc>) -> Result<BuildReport, BuildError> {
    let dist = &config.dist_dir;

    config.check_output_dir()?;
    reset_output_dir(dist)?;

    let assets_copied = if config.public_dir.is_dir() {
        assets::copy_dir_recursive(&config.public_dir, dist)?
    } else {
        0
    };

    let templates = Templates::load(&config.template_dir)?;

    let sources = scan::discover(&config.content_dir).map_err(io_error(&config.content_dir))?;
    let outcome = pipeline::run(&sources, &templates.post, Some(dist))?;

    let mut posts = outcome.posts;
    collection::sort_posts(&mut posts);

    let homepage = collection::render_homepage(&templates.index, &posts, &config.base_path());
    let homepage_path = dist.join(HOMEPAGE_FILE);
    fs::write(&homepage_path, homepage).map_err(io_error(&homepage_path))?;

    let sitemap = collection::render_sitemap(&posts, &config.site_url, &built_at);
    let sitemap_path = dist.join(SITEMAP_FILE);
    fs::write(&sitemap_path, sitemap).map_err(io_error(&sitemap_path))?;

    Ok(BuildReport {
        posts,
        drafts: outcome.drafts,
        assets_copied,
        dist_dir: dist.clone(),
    })
}

/// Parse every post and check slugs without writing anything.
///
/// Templates are still loaded so a missing template is reported here too.
pub fn check(config: &SiteConfig) -> Result<CheckReport, BuildError> {
    let templates = Templates::load(&config.template_dir)?;
    let sources = scan::discover(&config.content_dir).map_err(io_error(&config.content_dir))?;
    let outcome = pipeline::run(&sources, &templates.post, None)?;

    let mut posts = outcome.posts;
    collection::sort_posts(&mut posts);

    Ok(CheckReport {
        posts,
        drafts: outcome.drafts,
    })
}

/// Remove `dist` if it exists and recreate it empty.
fn reset_output_dir(dist: &Path) -> Result<(), BuildError> {
    if dist.exists() {
        fs::remove_dir_all(dist).map_err(io_error(dist))?;
    }
    fs::create_dir_all(dist).map_err(io_error(dist))
}
