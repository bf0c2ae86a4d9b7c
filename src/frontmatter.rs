//! Front matter extraction.
//!
//! Splits a raw markdown document into its YAML metadata block and the
//! remaining body:
//!
//! ```text
//! ---
//! title: Hello
//! date: 2024-06-01
//! draft: false
//! ---
//! # Body starts here
//! ```
//!
//! The block must start on the first line. Documents without one get
//! [`FrontMatter::default`] and their full text as body.

use serde::{Deserialize, Deserializer};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("front matter block opened with '---' but never closed")]
    Unterminated,
    #[error("invalid front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Typed metadata record parsed from the front matter block.
///
/// All fields are optional. Defaults for display are applied at the template
/// boundary (see [`crate::types::Post`]), not here.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "scalar_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub author: Option<String>,
    /// Publish date as written. Parsed lazily by [`crate::date::parse_date`].
    #[serde(deserialize_with = "scalar_string")]
    pub date: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub image: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub slug: Option<String>,
    /// Drafts are excluded from every output artifact.
    pub draft: bool,
}

/// Accept any YAML scalar for a string field: `title: 2024` is `"2024"`.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_yaml::Value;

    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(D::Error::custom(format!(
            "expected a scalar value, found {other:?}"
        ))),
    }
}

const DELIMITER: &str = "---";

/// Split `raw` into front matter and body.
pub fn parse(raw: &str) -> Result<(FrontMatter, &str), FrontMatterError> {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let Some(after_open) = strip_delimiter_line(text) else {
        return Ok((FrontMatter::default(), raw));
    };

    // Find the closing delimiter on a line of its own.
    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            let yaml = &after_open[..offset];
            let body = &after_open[offset + line.len()..];
            return Ok((parse_yaml(yaml)?, body));
        }
        offset += line.len();
    }

    Err(FrontMatterError::Unterminated)
}

/// If `text` starts with a `---` line, return what follows it.
fn strip_delimiter_line(text: &str) -> Option<&str> {
    let (first, rest) = match text.find('\n') {
        Some(pos) => (&text[..pos], &text[pos + 1..]),
        None => (text, ""),
    };
    (first.trim_end() == DELIMITER).then_some(rest)
}

fn parse_yaml(yaml: &str) -> Result<FrontMatter, FrontMatterError> {
    if yaml.trim().is_empty() {
        return Ok(FrontMatter::default());
    }
    Ok(serde_yaml::from_str(yaml)?)
}
