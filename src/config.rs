/// Application settings
///
/// Settings are resolved in three layers: built-in defaults, an optional
/// JSON file in the user's config directory, then environment overrides.
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

/// Environment variable holding the Pixabay API key
pub const API_KEY_ENV: &str = "PIXABAY_API_KEY";
/// Environment variable overriding the API endpoint
pub const BASE_URL_ENV: &str = "IMAGE_FINDER_BASE_URL";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Pixabay API key (empty means "not configured")
    pub api_key: String,
    /// Search endpoint
    pub base_url: String,
    /// How long a toast stays on screen
    pub toast_duration_ms: u64,
    /// Longest edge of a decoded thumbnail, in pixels
    pub thumbnail_size: u32,
    /// Per-request HTTP timeout
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://pixabay.com/api/".to_string(),
            toast_duration_ms: 2000,
            thumbnail_size: 256,
            request_timeout_secs: 10,
        }
    }
}

impl Settings {
    /// Load settings from the default config file and the environment.
    ///
    /// A broken config file is logged and ignored; the app still starts.
    pub fn load() -> Self {
        let mut settings = match Self::config_path() {
            Some(path) if path.exists() => match Self::from_file(&path) {
                Ok(settings) => {
                    tracing::info!(path = %path.display(), "loaded settings");
                    settings
                }
                Err(err) => {
                    tracing::warn!(error = %err, "ignoring config file, using defaults");
                    Self::default()
                }
            },
            _ => Self::default(),
        };

        settings.apply_overrides(|name| std::env::var(name).ok());
        settings
    }

    /// Location of the optional settings file:
    /// - Linux: ~/.config/image-finder/config.json
    /// - macOS: ~/Library/Application Support/image-finder/config.json
    /// - Windows: %APPDATA%\image-finder\config.json
    pub fn config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push("image-finder");
        path.push("config.json");
        Some(path)
    }

    /// Parse a settings file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply environment overrides. `lookup` is `std::env::var` outside tests.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV).filter(|v| !v.trim().is_empty()) {
            self.api_key = key.trim().to_string();
        }
        if let Some(url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.api_key.is_empty());
        assert_eq!(settings.base_url, "https://pixabay.com/api/");
        assert_eq!(settings.toast_duration(), Duration::from_millis(2000));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "api_key": "abc123", "thumbnail_size": 128 }}"#).unwrap();

        let settings = Settings::from_file(file.path()).unwrap();

        assert_eq!(settings.api_key, "abc123");
        assert_eq!(settings.thumbnail_size, 128);
        assert_eq!(settings.request_timeout_secs, 10);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = Settings::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::from_file(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let mut settings = Settings {
            api_key: "from-file".to_string(),
            ..Settings::default()
        };

        settings.apply_overrides(|name| match name {
            API_KEY_ENV => Some(" from-env ".to_string()),
            BASE_URL_ENV => Some("http://localhost:8080/api/".to_string()),
            _ => None,
        });

        assert_eq!(settings.api_key, "from-env");
        assert_eq!(settings.base_url, "http://localhost:8080/api/");
    }

    #[test]
    fn test_blank_env_does_not_override() {
        let mut settings = Settings {
            api_key: "from-file".to_string(),
            ..Settings::default()
        };

        settings.apply_overrides(|_| Some("   ".to_string()));

        assert_eq!(settings.api_key, "from-file");
    }
}
