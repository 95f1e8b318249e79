use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::constants::{DEFAULT_BASE_URL, FIRST_PAGE};

/// Persisted user configuration (`config.toml`).
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// API root, e.g. "https://rickandmortyapi.com/api"
    pub base_url: Option<String>,
    /// Page the browser opens on
    pub start_page: Option<u32>,
    /// File that receives diagnostic logs while the browser is running
    pub log_file: Option<String>,
    /// UI theme name ("dark" or "light")
    pub theme: Option<String>,
}

/// Values given on the command line; these win over the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub base_url: Option<String>,
    pub start_page: Option<u32>,
    pub log_file: Option<PathBuf>,
}

/// Effective settings after applying overrides, then config, then defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub start_page: u32,
    pub log_file: Option<PathBuf>,
    pub theme: Option<String>,
}

impl Settings {
    pub fn resolve(config: &Config, overrides: &SettingsOverrides) -> Self {
        let base_url = overrides
            .base_url
            .clone()
            .or_else(|| config.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let start_page = overrides
            .start_page
            .or(config.start_page)
            .unwrap_or(FIRST_PAGE)
            .max(FIRST_PAGE);
        let log_file = overrides
            .log_file
            .clone()
            .or_else(|| config.log_file.as_ref().map(PathBuf::from));

        Self {
            base_url,
            start_page,
            log_file,
            theme: config.theme.clone(),
        }
    }
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
