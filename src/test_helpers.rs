//! Shared test utilities for the quill test suite.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let config = fixture_config(tmp.path());
//! let report = build(&config, now).unwrap();
//! assert_eq!(post_slugs(&report.posts), ["rust-ownership", "hello-world"]);
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::assets::copy_dir_recursive;
use crate::config::SiteConfig;
use crate::types::Post;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

/// Stock config rooted at a fixture copy.
pub fn fixture_config(root: &Path) -> SiteConfig {
    SiteConfig::default().rooted_at(root)
}

/// An empty site: bare templates, no posts, no public directory.
pub fn minimal_site(root: &Path) -> SiteConfig {
    let config = fixture_config(root);
    fs::create_dir_all(&config.content_dir).unwrap();
    fs::create_dir_all(&config.template_dir).unwrap();
    fs::write(config.template_dir.join("post.html"), "{{ content }}").unwrap();
    fs::write(config.template_dir.join("index.html"), "{{ posts }}").unwrap();
    config
}

// =========================================================================
// Lookups
// =========================================================================

/// All slugs in collection order.
pub fn post_slugs(posts: &[Post]) -> Vec<&str> {
    posts.iter().map(|p| p.slug.as_str()).collect()
}

/// Read a generated file, panicking with the path on failure.
pub fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
}
