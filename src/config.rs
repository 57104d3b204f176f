use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::LazyLock;

use tracing::{debug, warn};

use crate::error::{Error, Result};

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

static COMPILED_DEFAULT: LazyLock<Config> = LazyLock::new(|| {
    // build.rs rejects a default config that does not parse
    toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
});

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub links: LinksConfig,
    pub toolbar: ToolbarConfig,
    pub page: PageConfig,
}

/// Attributes written on rendered `url(...)` links.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LinksConfig {
    pub class: String,
    pub target: String,
    pub rel: Option<String>,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            class: "text-indigo-600 hover:underline".to_string(),
            target: "_blank".to_string(),
            rel: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ToolbarConfig {
    /// Text wrapped by a marker when nothing is selected.
    pub placeholder: String,
    /// Link target inserted by `url` when nothing is selected.
    pub url_placeholder: String,
    pub text_color: String,
    pub highlight_color: String,
}

impl Default for ToolbarConfig {
    fn default() -> Self {
        Self {
            placeholder: "texto".to_string(),
            url_placeholder: "https://ejemplo.com".to_string(),
            text_color: "#000000".to_string(),
            highlight_color: "#ffff00".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PageConfig {
    pub title: String,
    pub stylesheet: Option<String>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "Preview".to_string(),
            stylesheet: None,
        }
    }
}

impl Config {
    /// The defaults shipped in `default_config.toml`.
    pub fn compiled_default() -> &'static Config {
        &COMPILED_DEFAULT
    }

    /// Parse a config from TOML text. Missing keys take their defaults.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a TOML config file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Load config from a TOML file, or return defaults if it is missing or invalid.
    pub fn load(path: &Path) -> Self {
        match Self::from_path(path) {
            Ok(config) => config,
            Err(Error::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                Self::compiled_default().clone()
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "ignoring config file");
                Self::compiled_default().clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiled_default_matches_default_impl() {
        assert_eq!(Config::compiled_default(), &Config::default());
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config = Config::from_toml("[links]\nrel = \"noopener\"\n").unwrap();
        assert_eq!(config.links.rel.as_deref(), Some("noopener"));
        assert_eq!(config.links.target, "_blank");
        assert_eq!(config.toolbar, ToolbarConfig::default());
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let err = Config::from_toml("[links\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load(Path::new("does/not/exist.toml"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn from_path_reports_missing_file() {
        let err = Config::from_path(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn invalid_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!("markup-{}.toml", std::process::id()));
        fs::write(&path, "[links\n").unwrap();
        let config = Config::load(&path);
        fs::remove_file(&path).unwrap();
        assert_eq!(config, Config::default());
    }
}
