//! Site configuration module.
//!
//! Handles loading, validating, and merging `site.toml`. Stock defaults are
//! the base layer; a user file only needs the values it wants to change.
//! Unknown keys are rejected so typos surface instead of being ignored.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [api]
//! backend_url = "http://localhost:8001"   # Serves /api/gallery and /api/contact
//! # timeout_secs = 10                     # Unset = HTTP client default
//!
//! [brand]
//! name = "CAOJAMBO"                       # Logo text in header and footer
//! company = "De Origen Natural Company"   # Legal name in the copyright line
//!
//! [social]
//! facebook = "#"
//! instagram = "#"
//! linkedin = "#"
//!
//! [colors]
//! forest = "#1A3C34"       # Headings, header on scroll, primary buttons
//! terracotta = "#C06E52"   # Accents, hover states, button shadow
//! cream = "#FDFBF7"        # Page background
//! muted = "#5C5C5C"        # Body copy and subtitles
//! sand = "#E5E0D8"         # Image placeholders, dividers
//! ```
//!
//! The backend URL can also be given per invocation with `--backend-url`,
//! which wins over the file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `site.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Backend location and HTTP client settings.
    pub api: ApiConfig,
    /// Names shown on the page.
    pub brand: BrandConfig,
    /// Footer social links.
    pub social: SocialConfig,
    /// Palette injected as CSS custom properties.
    pub colors: ColorConfig,
}

impl SiteConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api.backend_url.as_str();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "api.backend_url must start with http:// or https:// (got '{url}')"
            )));
        }
        if self.api.timeout_secs == Some(0) {
            return Err(ConfigError::Validation(
                "api.timeout_secs must be greater than 0".into(),
            ));
        }
        if self.brand.name.trim().is_empty() {
            return Err(ConfigError::Validation("brand.name must not be empty".into()));
        }
        for (name, value) in self.colors.entries() {
            if !is_hex_color(value) {
                return Err(ConfigError::Validation(format!(
                    "colors.{name} must be a hex color like #1A3C34 (got '{value}')"
                )));
            }
        }
        Ok(())
    }
}

/// Backend API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL; `/api/...` is appended.
    pub backend_url: String,
    /// Whole-request timeout. `None` keeps the HTTP client default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8001".to_string(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrandConfig {
    pub name: String,
    pub company: String,
}

impl Default for BrandConfig {
    fn default() -> Self {
        Self {
            name: "CAOJAMBO".to_string(),
            company: "De Origen Natural Company".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SocialConfig {
    pub facebook: String,
    pub instagram: String,
    pub linkedin: String,
}

impl Default for SocialConfig {
    fn default() -> Self {
        Self {
            facebook: "#".to_string(),
            instagram: "#".to_string(),
            linkedin: "#".to_string(),
        }
    }
}

/// Brand palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub forest: String,
    pub terracotta: String,
    pub cream: String,
    pub muted: String,
    pub sand: String,
}

impl ColorConfig {
    fn entries(&self) -> [(&'static str, &str); 5] {
        [
            ("forest", self.forest.as_str()),
            ("terracotta", self.terracotta.as_str()),
            ("cream", self.cream.as_str()),
            ("muted", self.muted.as_str()),
            ("sand", self.sand.as_str()),
        ]
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            forest: "#1A3C34".to_string(),
            terracotta: "#C06E52".to_string(),
            cream: "#FDFBF7".to_string(),
            muted: "#5C5C5C".to_string(),
            sand: "#E5E0D8".to_string(),
        }
    }
}

fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
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

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the `site.toml` at `path`.
///
/// A missing file yields the stock defaults. A file that exists but is
/// invalid TOML, has unknown keys, or fails validation is an error.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let overlay = if path.exists() {
        let content = fs::read_to_string(path)?;
        Some(toml::from_str::<toml::Value>(&content)?)
    } else {
        None
    };
    resolve_config(overlay)
}

/// Returns a fully-commented stock `site.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# CAOJAMBO Site Configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.

# ---------------------------------------------------------------------------
# Backend API
# ---------------------------------------------------------------------------
[api]
# Base URL of the backend. The site reads {backend_url}/api/gallery and
# posts the contact form to {backend_url}/api/contact.
# Overridden by --backend-url on the command line.
backend_url = "http://localhost:8001"

# Whole-request timeout in seconds. Leave unset for the HTTP client default.
# timeout_secs = 10

# ---------------------------------------------------------------------------
# Brand
# ---------------------------------------------------------------------------
[brand]
# Logo text shown in the header and footer.
name = "CAOJAMBO"
# Legal name shown in the copyright line.
company = "De Origen Natural Company"

# ---------------------------------------------------------------------------
# Social links (footer)
# ---------------------------------------------------------------------------
[social]
facebook = "#"
instagram = "#"
linkedin = "#"

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
# Hex colors, injected into the stylesheet as CSS custom properties.
[colors]
forest = "#1A3C34"       # Headings, scrolled header, primary buttons
terracotta = "#C06E52"   # Accents, hover states, button shadow
cream = "#FDFBF7"        # Page background
muted = "#5C5C5C"        # Body copy and subtitles
sand = "#E5E0D8"         # Image placeholders, dividers
"##
}

/// Generate the `:root` block of CSS custom properties from the palette.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    let mut css = String::from(":root {\n");
    for (name, value) in colors.entries() {
        css.push_str(&format!("    --color-{name}: {value};\n"));
    }
    css.push('}');
    css
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_is_valid() {
        SiteConfig::default().validate().unwrap();
    }

    #[test]
    fn missing_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("site.toml")).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn partial_file_overrides_only_given_keys() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("site.toml");
        fs::write(
            &path,
            "[api]\nbackend_url = \"https://api.example.com\"\n\n[colors]\nforest = \"#000000\"\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.api.backend_url, "https://api.example.com");
        assert_eq!(config.api.timeout_secs, None);
        assert_eq!(config.colors.forest, "#000000");
        assert_eq!(config.colors.terracotta, "#C06E52");
        assert_eq!(config.brand.name, "CAOJAMBO");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let overlay: toml::Value = toml::from_str("[api]\nbackend = \"x\"\n").unwrap();
        assert!(matches!(resolve_config(Some(overlay)), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn non_http_backend_is_rejected() {
        let overlay: toml::Value = toml::from_str("[api]\nbackend_url = \"ftp://x\"\n").unwrap();
        let err = resolve_config(Some(overlay)).unwrap_err();
        assert!(err.to_string().contains("api.backend_url"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let overlay: toml::Value = toml::from_str("[api]\ntimeout_secs = 0\n").unwrap();
        assert!(matches!(
            resolve_config(Some(overlay)),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn bad_color_is_rejected() {
        let overlay: toml::Value = toml::from_str("[colors]\nsand = \"beige\"\n").unwrap();
        let err = resolve_config(Some(overlay)).unwrap_err();
        assert!(err.to_string().contains("colors.sand"));
    }

    #[test]
    fn merge_preserves_base_keys() {
        let base: toml::Value = toml::from_str("[a]\nx = 1\ny = 2\n").unwrap();
        let overlay: toml::Value = toml::from_str("[a]\ny = 3\n").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"]["x"].as_integer(), Some(1));
        assert_eq!(merged["a"]["y"].as_integer(), Some(3));
    }

    #[test]
    fn stock_config_toml_parses_to_defaults() {
        let overlay: toml::Value = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(resolve_config(Some(overlay)).unwrap(), SiteConfig::default());
    }

    #[test]
    fn color_css_lists_every_color() {
        let css = generate_color_css(&ColorConfig::default());
        assert!(css.starts_with(":root {"));
        assert!(css.contains("--color-forest: #1A3C34;"));
        assert!(css.contains("--color-sand: #E5E0D8;"));
    }
}
