//! Source document discovery.
//!
//! Only `*.md` files directly inside the content directory are posts.
//! Subdirectories, hidden files, and other extensions are ignored. Results
//! are sorted by file name so builds are reproducible regardless of
//! directory iteration order.

use std::fs;
use std::path::{Path, PathBuf};

/// Extension recognized as a post.
pub const POST_EXTENSION: &str = "md";

/// List post files in `content_dir`, sorted.
///
/// Any error reading the directory or stat-ing a candidate post (a dangling
/// `*.md` symlink, say) is returned rather than skipped.
pub fn discover(content_dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(content_dir)? {
        let path = entry?.path();
        if is_post(&path) && fs::metadata(&path)?.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

fn is_post(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(true);
    !hidden && path.extension().is_some_and(|e| e == POST_EXTENSION)
}

/// Fallback slug: the file name without its `.md` extension.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn finds_only_markdown_files_sorted() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("b-post.md"), "").unwrap();
        fs::write(tmp.path().join("a-post.md"), "").unwrap();
        fs::write(tmp.path().join("notes.txt"), "").unwrap();
        fs::write(tmp.path().join("README.markdown"), "").unwrap();

        let files = discover(tmp.path()).unwrap();
        let names: Vec<String> = files.iter().map(|p| file_stem(p)).collect();
        assert_eq!(names, ["a-post", "b-post"]);
    }

    #[test]
    fn does_not_recurse() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("nested")).unwrap();
        fs::write(tmp.path().join("nested/deep.md"), "").unwrap();
        fs::create_dir(tmp.path().join("dir.md")).unwrap();

        assert!(discover(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn skips_hidden_files() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".draft.md"), "").unwrap();
        assert!(discover(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_directory_is_error() {
        let tmp = TempDir::new().unwrap();
        assert!(discover(&tmp.path().join("nope")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn dangling_post_symlink_is_error() {
        let tmp = TempDir::new().unwrap();
        std::os::unix::fs::symlink(tmp.path().join("gone.md"), tmp.path().join("ghost.md"))
            .unwrap();
        assert!(discover(tmp.path()).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_post_is_followed() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("real.txt"), "").unwrap();
        std::os::unix::fs::symlink(tmp.path().join("real.txt"), tmp.path().join("linked.md"))
            .unwrap();
        let names: Vec<String> = discover(tmp.path()).unwrap().iter().map(|p| file_stem(p)).collect();
        assert_eq!(names, ["linked"]);
    }

    #[test]
    fn file_stem_strips_extension_only() {
        assert_eq!(file_stem(Path::new("content/my.first-post.md")), "my.first-post");
    }
}
