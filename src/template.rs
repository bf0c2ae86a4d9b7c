//! Placeholder substitution for the post and homepage templates.
//!
//! Templates are plain HTML files containing `{{ key }}` tokens. There are no
//! conditionals, loops, includes, or escaping: each recognized token is
//! replaced by its value verbatim, every time it occurs. Tokens whose key is
//! not in the field map are left in the output as written.
//!
//! The token syntax is exact: one space after `{{` and one before `}}`.
//! `{{title}}` is not a placeholder.
//!
//! Substitution is a single left-to-right pass, so values are never
//! re-scanned. A post that documents `{{ title }}` in its body keeps it.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("template {path} could not be read: {source}")]
    Missing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Placeholder name → replacement text.
pub type Fields<'a> = BTreeMap<&'a str, String>;

const OPEN: &str = "{{ ";
const CLOSE: &str = " }}";

/// Substitute every recognized `{{ key }}` in `template`.
pub fn render(template: &str, fields: &Fields<'_>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        let after_open = &rest[start + OPEN.len()..];
        let replacement = after_open
            .find(CLOSE)
            .map(|end| (&after_open[..end], end))
            .filter(|(key, _)| is_key(key))
            .and_then(|(key, end)| fields.get(key).map(|value| (value, end)));

        match replacement {
            Some((value, end)) => {
                out.push_str(&rest[..start]);
                out.push_str(value);
                rest = &after_open[end + CLOSE.len()..];
            }
            None => {
                // Not ours: keep the opening braces and continue after them.
                out.push_str(&rest[..start + OPEN.len()]);
                rest = after_open;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Keys are single identifiers; anything with whitespace or braces is text.
fn is_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

/// The two templates every build needs.
#[derive(Debug, Clone)]
pub struct Templates {
    /// Page for a single post (`post.html`).
    pub post: String,
    /// Homepage with the `{{ posts }}` listing (`index.html`).
    pub index: String,
}

pub const POST_TEMPLATE: &str = "post.html";
pub const INDEX_TEMPLATE: &str = "index.html";

impl Templates {
    /// Read `post.html` and `index.html` from `dir`. Either missing is fatal.
    pub fn load(dir: &Path) -> Result<Self, TemplateError> {
        Ok(Self {
            post: read_template(&dir.join(POST_TEMPLATE))?,
            index: read_template(&dir.join(INDEX_TEMPLATE))?,
        })
    }
}

fn read_template(path: &Path) -> Result<String, TemplateError> {
    fs::read_to_string(path).map_err(|source| TemplateError::Missing {
        path: path.to_path_buf(),
        source,
    })
}
