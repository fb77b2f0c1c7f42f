//! Configuration management (mordor.toml)
//!
//! Codec options plus the default save directory. Settings live in TOML in the
//! platform-specific config directory, or in a file given explicitly.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Config file name inside the config directory
pub const CONFIG_FILE: &str = "mordor.toml";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MordorConfig {
    /// Directory holding the MDATA files, used when a command names none
    #[serde(default)]
    pub save_dir: Option<PathBuf>,
    /// Codec settings
    #[serde(default)]
    pub codec: CodecConfig,
}

/// Byte used to fill fixed-width text on encode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextPadding {
    /// ASCII space, as the game writes names
    #[default]
    Space,
    /// Zero bytes
    Nul,
}

impl TextPadding {
    pub fn byte(self) -> u8 {
        match self {
            TextPadding::Space => b' ',
            TextPadding::Nul => 0,
        }
    }
}

/// Codec behavior switches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CodecConfig {
    /// Padding for fixed-width text (default: space)
    #[serde(default)]
    pub text_padding: TextPadding,
    /// Accept (and log) bytes after the last field instead of failing (default: false)
    #[serde(default)]
    pub allow_trailing_bytes: bool,
}

/// Returns the platform-specific configuration directory.
///
/// On Linux: `~/.config/mordor-data`
/// Returns `None` if the home directory cannot be determined.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("org", "mordor", "mordor-data")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Parse configuration text
pub fn parse(content: &str) -> Result<MordorConfig> {
    Ok(toml::from_str(content)?)
}

/// Load configuration
///
/// An explicit path must exist and parse. Without one, `mordor.toml` in the
/// config directory is used if present, and defaults otherwise.
pub fn load(path: Option<&Path>) -> Result<MordorConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match config_dir().map(|dir| dir.join(CONFIG_FILE)) {
            Some(path) if path.exists() => path,
            _ => {
                tracing::debug!("no config file, using defaults");
                return Ok(MordorConfig::default());
            }
        },
    };
    let content = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
    let config = parse(&content)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Save configuration, creating the parent directory if needed
pub fn save(config: &MordorConfig, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    }
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|e| Error::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MordorConfig::default();
        assert_eq!(config.codec.text_padding, TextPadding::Space);
        assert!(!config.codec.allow_trailing_bytes);
        assert!(config.save_dir.is_none());
    }

    #[test]
    fn test_parse_partial() {
        let config = parse(
            r#"
            save_dir = "/games/mordor"

            [codec]
            text_padding = "nul"
            "#,
        )
        .unwrap();
        assert_eq!(config.codec.text_padding, TextPadding::Nul);
        assert!(!config.codec.allow_trailing_bytes);
        assert_eq!(config.save_dir, Some(PathBuf::from("/games/mordor")));
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse("").unwrap(), MordorConfig::default());
    }

    #[test]
    fn test_parse_invalid() {
        let err = parse("[codec]\ntext_padding = \"tabs\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let config = MordorConfig {
            save_dir: Some(PathBuf::from("saves")),
            codec: CodecConfig {
                text_padding: TextPadding::Nul,
                allow_trailing_bytes: true,
            },
        };
        save(&config, &path).unwrap();
        assert_eq!(load(Some(&path)).unwrap(), config);
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
