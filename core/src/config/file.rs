//! On-disk encoding of the configuration tree.
//!
//! TOML is the default. A `.json` extension switches to JSON, which is what
//! older installs of the library wrote.

use std::path::{Path, PathBuf};

use requisite_types::ConfigObject;

use super::ConfigError;

/// File encoding, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigFormat {
    #[default]
    Toml,
    Json,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            _ => ConfigFormat::Toml,
        }
    }

    /// Parse file contents. Blank files yield an empty tree.
    pub fn parse(self, contents: &str, path: &Path) -> Result<ConfigObject, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(ConfigObject::new());
        }

        match self {
            ConfigFormat::Toml => toml::from_str(contents).map_err(|e| ConfigError::TomlParse {
                path: path.to_path_buf(),
                source: e,
            }),
            ConfigFormat::Json => serde_json::from_str(contents).map_err(|e| ConfigError::Json {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }

    pub fn render(self, root: &ConfigObject, path: &Path) -> Result<String, ConfigError> {
        match self {
            ConfigFormat::Toml => {
                toml::to_string_pretty(root).map_err(|e| ConfigError::TomlSerialize {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
            ConfigFormat::Json => {
                serde_json::to_string_pretty(root).map_err(|e| ConfigError::Json {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        }
    }
}

/// Default location of the shared configuration file.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("requisite").join("configuration.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("a/b.json")), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path(Path::new("a/b.JSON")), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path(Path::new("a/b.toml")), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("a/b")), ConfigFormat::Toml);
    }

    #[test]
    fn blank_file_is_empty_tree() {
        let tree = ConfigFormat::Toml.parse("  \n", Path::new("x.toml")).unwrap();
        assert!(tree.is_empty());
        let tree = ConfigFormat::Json.parse("", Path::new("x.json")).unwrap();
        assert!(tree.is_empty());
    }

    #[test]
    fn malformed_toml_reports_path() {
        let err = ConfigFormat::Toml
            .parse("keybinds = [", Path::new("broken.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }
}
