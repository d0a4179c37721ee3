use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::cli::ColorMode;
use crate::core::{DateStyle, QueryStrategy, UserAgentPreset};

/// Settings file. Keys mirror the global CLI flags except `--debug` and `--quiet`,
/// which set up logging before the file is read.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) color: Option<ColorMode>,
    #[serde(default)]
    pub(crate) delay: Option<f64>,
    #[serde(default)]
    pub(crate) max_urls: Option<usize>,
    #[serde(default)]
    pub(crate) user_agent: Option<UserAgentPreset>,
    #[serde(default)]
    pub(crate) header_row: Option<usize>,
    #[serde(default)]
    pub(crate) column: Option<String>,
    #[serde(default)]
    pub(crate) query: Option<QueryStrategy>,
    #[serde(default)]
    pub(crate) date_format: Option<DateStyle>,
    #[serde(default)]
    pub(crate) timezone: Option<String>,
    #[serde(default)]
    pub(crate) endpoint: Option<String>,
    #[serde(default)]
    pub(crate) accept_language: Option<String>,
}

impl Config {
    /// `explicit` replaces the default lookup chain
    pub(crate) fn load(explicit: Option<&Path>) -> Self {
        let config_paths = match explicit {
            Some(path) => vec![path.to_path_buf()],
            None => Self::get_config_paths(),
        };

        for path in config_paths {
            if let Some(config) = Self::load_from(&path) {
                return config;
            }
        }
        if let Some(path) = explicit {
            warn!(path = %path.display(), "config file not usable, using defaults");
        }

        Self::default()
    }

    fn load_from(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read config");
                return None;
            }
        };
        match toml::from_str::<Config>(&content) {
            Ok(config) => {
                info!(path = %path.display(), "loaded config");
                Some(config)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to parse config");
                None
            }
        }
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/indexcheck/config.toml (Linux/cross-platform)
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("indexcheck").join("config.toml"));
        }

        // 2. Platform config dir (e.g. ~/Library/Application Support on macOS)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("indexcheck").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.indexcheck.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".indexcheck.toml"));
        }

        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_paths_end_with_home_dotfile() {
        let paths = Config::get_config_paths();
        if dirs::home_dir().is_some() {
            assert!(paths.last().unwrap().ends_with(".indexcheck.toml"));
            assert!(paths[0].ends_with("indexcheck/config.toml"));
        }
    }

    #[test]
    fn parses_all_keys() {
        let config: Config = toml::from_str(
            r#"
            delay = 3.5
            max_urls = 200
            user_agent = "safari"
            header_row = 2
            column = "Profile"
            query = "site"
            date_format = "iso"
            timezone = "Asia/Ho_Chi_Minh"
            endpoint = "https://www.google.com.vn/search"
            accept_language = "vi-VN,vi;q=0.9"
            color = "never"
            "#,
        )
        .unwrap();
        assert_eq!(config.delay, Some(3.5));
        assert_eq!(config.max_urls, Some(200));
        assert_eq!(config.user_agent, Some(UserAgentPreset::Safari));
        assert_eq!(config.date_format, Some(DateStyle::Iso));
        assert_eq!(config.color, Some(ColorMode::Never));
        assert!(!config.no_color);
    }

    #[test]
    fn explicit_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "delay = 0.0\nquery = \"bare\"\n").unwrap();
        let config = Config::load(Some(&path));
        assert_eq!(config.delay, Some(0.0));
        assert_eq!(config.query, Some(QueryStrategy::Bare));
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "delay = \"soon\"").unwrap();
        let config = Config::load(Some(&path));
        assert!(config.delay.is_none());
    }
}
