//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Configuration is
//! layered: stock defaults are overridden by the project's `config.toml`,
//! which is in turn overridden by command-line flags.
//!
//! ## Config File Location
//!
//! Place `config.toml` in the project root, next to the content directory:
//!
//! ```text
//! my-blog/
//! ├── config.toml              # Optional (overrides stock defaults)
//! ├── content/                 # Markdown posts
//! ├── templates/               # post.html + index.html
//! ├── public/                  # Static assets, copied verbatim
//! └── dist/                    # Output (wiped on every build)
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//! content_dir = "content"
//! template_dir = "templates"
//! public_dir = "public"
//! dist_dir = "dist"
//! site_url = "https://example.com/blog"
//! ```
//!
//! Relative directories are resolved against the project root. Unknown keys
//! are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory holding the markdown posts (scanned non-recursively).
    pub content_dir: PathBuf,
    /// Directory holding `post.html` and `index.html`.
    pub template_dir: PathBuf,
    /// Static asset tree copied into the output root. Optional on disk.
    pub public_dir: PathBuf,
    /// Output directory. Removed and recreated on every build.
    pub dist_dir: PathBuf,
    /// Absolute public URL of the site, used for the sitemap and to derive
    /// the homepage link prefix.
    pub site_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            template_dir: PathBuf::from("templates"),
            public_dir: PathBuf::from("public"),
            dist_dir: PathBuf::from("dist"),
            site_url: "https://example.com/blog".to_string(),
        }
    }
}

/// Per-key overrides coming from the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub content_dir: Option<PathBuf>,
    pub template_dir: Option<PathBuf>,
    pub public_dir: Option<PathBuf>,
    pub dist_dir: Option<PathBuf>,
    pub site_url: Option<String>,
}

impl SiteConfig {
    /// Validate config values and normalize the site URL.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.site_url).map_err(|e| {
            ConfigError::Validation(format!("site_url '{}' is not a URL: {e}", self.site_url))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::Validation(format!(
                "site_url must use http or https, got '{}'",
                url.scheme()
            )));
        }
        self.site_url = self.site_url.trim_end_matches('/').to_string();

        for (key, dir) in [
            ("content_dir", &self.content_dir),
            ("template_dir", &self.template_dir),
            ("public_dir", &self.public_dir),
            ("dist_dir", &self.dist_dir),
        ] {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        Ok(())
    }

    /// Apply command-line overrides on top of the loaded values.
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(dir) = overrides.content_dir {
            self.content_dir = dir;
        }
        if let Some(dir) = overrides.template_dir {
            self.template_dir = dir;
        }
        if let Some(dir) = overrides.public_dir {
            self.public_dir = dir;
        }
        if let Some(dir) = overrides.dist_dir {
            self.dist_dir = dir;
        }
        if let Some(url) = overrides.site_url {
            self.site_url = url;
        }
    }

    /// Resolve relative directories against `root`. Absolute paths are kept.
    pub fn rooted_at(mut self, root: &Path) -> Self {
        self.content_dir = root.join(&self.content_dir);
        self.template_dir = root.join(&self.template_dir);
        self.public_dir = root.join(&self.public_dir);
        self.dist_dir = root.join(&self.dist_dir);
        self
    }

    /// Refuse an output directory that would take an input directory with it.
    ///
    /// The build removes `dist_dir` first, so it must not equal or contain
    /// the content, template or public directory. Call on a rooted config.
    pub fn check_output_dir(&self) -> Result<(), ConfigError> {
        let dist = normalize(&self.dist_dir)?;
        for (key, dir) in [
            ("content_dir", &self.content_dir),
            ("template_dir", &self.template_dir),
            ("public_dir", &self.public_dir),
        ] {
            if normalize(dir)?.starts_with(&dist) {
                return Err(ConfigError::Validation(format!(
                    "dist_dir {} would remove {key} {} when cleared",
                    self.dist_dir.display(),
                    dir.display()
                )));
            }
        }
        Ok(())
    }

    /// Path prefix for links on the homepage, taken from the `site_url` path.
    ///
    /// `https://example.com/blog` → `/blog`, `https://example.com` → empty.
    pub fn base_path(&self) -> String {
        Url::parse(&self.site_url)
            .map(|u| u.path().trim_end_matches('/').to_string())
            .unwrap_or_default()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config from `config.toml` in `root`, then apply `overrides`.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result. Directories are returned unresolved; call
/// [`SiteConfig::rooted_at`] before handing the config to the build.
pub fn load_config(root: &Path, overrides: ConfigOverrides) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match load_raw_config(root)? {
        Some(overlay) => merge_toml(base, overlay),
        None => base,
    };
    let mut config: SiteConfig = merged.try_into()?;
    config.apply_overrides(overrides);
    config.validate()?;

    let rooted = config.clone().rooted_at(root);
    rooted.check_output_dir()?;
    if normalize(root)?.starts_with(normalize(&rooted.dist_dir)?) {
        return Err(ConfigError::Validation(format!(
            "dist_dir {} would remove the project root when cleared",
            config.dist_dir.display()
        )));
    }
    Ok(config)
}

/// Absolute form of `path` with `.` and `..` resolved lexically.
fn normalize(path: &Path) -> Result<PathBuf, ConfigError> {
    let mut out = PathBuf::new();
    for component in std::path::absolute(path)?.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    Ok(out)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Quill Configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Every key can also be overridden on
# the command line (e.g. --dist-dir build).
# Unknown keys will cause an error.

# Markdown posts. Only *.md files directly inside this directory are built.
content_dir = "content"

# Must contain post.html and index.html.
template_dir = "templates"

# Static assets (CSS, CNAME, robots.txt). Copied as-is into the output root.
# Skipped when the directory does not exist.
public_dir = "public"

# Output directory. WARNING: removed and recreated on every build.
dist_dir = "dist"

# Public URL of the site. Used for sitemap.xml; its path ("/blog") prefixes
# post links on the homepage.
site_url = "https://example.com/blog"
"##
}
