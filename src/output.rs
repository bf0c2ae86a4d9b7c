//! CLI output formatting.
//!
//! Output is **post-centric**: each published post is listed by position and
//! title, with its output path, source file, and date as context lines.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Posts
//! 001 Understanding Ownership → rust-ownership/index.html
//!     Source: ownership.md
//!     2024-06-01 · 1 min read
//! 002 Hello World → hello-world/index.html
//!     Source: hello-world.md
//!     2024-01-01 · 1 min read
//!
//! Skipped 1 draft
//!     secret-plans.md
//! Copied 2 static assets
//! Successfully built 2 posts → dist
//! ```
//!
//! ## Check
//!
//! Same post listing without output paths, followed by
//! `Content is valid: 2 posts, 1 draft`.
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::build::{BuildReport, CheckReport};
use crate::types::Post;
use std::path::{Path, PathBuf};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// `2024-06-01 · 3 min read`, or just the read time for undated posts.
fn post_detail(post: &Post) -> String {
    match post.date() {
        "" => format!("{} min read", post.read_time),
        date => format!("{date} · {} min read", post.read_time),
    }
}

fn format_posts(posts: &[Post], with_output: bool) -> Vec<String> {
    let mut lines = vec!["Posts".to_string()];
    for (i, post) in posts.iter().enumerate() {
        let header = format!("{} {}", format_index(i + 1), post.title());
        if with_output {
            lines.push(format!(
                "{header} → {}",
                post.output_path().to_string_lossy().replace('\\', "/")
            ));
        } else {
            lines.push(header);
        }
        lines.push(format!("{}Source: {}", indent(1), file_name(&post.source)));
        lines.push(format!("{}{}", indent(1), post_detail(post)));
    }
    lines
}

fn format_drafts(drafts: &[PathBuf]) -> Vec<String> {
    if drafts.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![format!("Skipped {}", plural(drafts.len(), "draft"))];
    lines.extend(
        drafts
            .iter()
            .map(|d| format!("{}{}", indent(1), file_name(d))),
    );
    lines
}

/// Format the result of a full build.
pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines = Vec::new();

    if !report.posts.is_empty() {
        lines.extend(format_posts(&report.posts, true));
        lines.push(String::new());
    }
    lines.extend(format_drafts(&report.drafts));
    if report.assets_copied > 0 {
        lines.push(format!(
            "Copied {}",
            plural(report.assets_copied, "static asset")
        ));
    }
    lines.push(format!(
        "Successfully built {} posts → {}",
        report.posts.len(),
        report.dist_dir.display()
    ));

    lines
}

/// Print build output to stdout.
pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

/// Format the result of a content check.
pub fn format_check_output(report: &CheckReport) -> Vec<String> {
    let mut lines = Vec::new();

    if !report.posts.is_empty() {
        lines.extend(format_posts(&report.posts, false));
        lines.push(String::new());
    }
    lines.extend(format_drafts(&report.drafts));
    lines.push(format!(
        "Content is valid: {}, {}",
        plural(report.posts.len(), "post"),
        plural(report.drafts.len(), "draft")
    ));

    lines
}

/// Print check output to stdout.
pub fn print_check_output(report: &CheckReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}
