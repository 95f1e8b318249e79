//! Settings management for CLI set/unset commands.
//!
//! Each configuration key has a [`SettingHandler`] that validates input and
//! edits a [`Config`] in memory. Loading and saving the file happens once,
//! around the handler call, in [`set_setting`] and [`unset_setting`].

pub mod error;
pub mod handlers;
pub mod registry;

pub use error::SettingError;
pub use registry::SettingRegistry;

use std::path::Path;

use crate::core::config::data::Config;

/// Trait for handling a configuration setting.
pub trait SettingHandler: Send + Sync {
    /// Returns the configuration key this handler manages.
    fn key(&self) -> &'static str;

    /// Validate `args` and store them in `config`.
    ///
    /// Returns a success message to display.
    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError>;

    /// Clear the value from `config`.
    fn unset(&self, config: &mut Config) -> Result<String, SettingError>;

    /// Format the current value for display in `multiverse set` output.
    fn format(&self, config: &Config) -> String;
}

pub(crate) fn success_set(key: &str, value: &str) -> String {
    format!("✅ Set {key} to: {value}")
}

pub(crate) fn success_unset(key: &str) -> String {
    format!("✅ Unset {key}")
}

fn load(path: &Path) -> Result<Config, SettingError> {
    Config::load_from_path(path).map_err(|e| SettingError::ConfigError(e.to_string()))
}

fn save(config: &Config, path: &Path) -> Result<(), SettingError> {
    config
        .save_to_path(path)
        .map_err(|e| SettingError::ConfigError(e.to_string()))
}

/// Apply `multiverse set <key> <args>` to the config file at `path`.
pub fn set_setting(
    registry: &SettingRegistry,
    key: &str,
    args: &[String],
    path: &Path,
) -> Result<String, SettingError> {
    let handler = registry
        .get(key)
        .ok_or_else(|| SettingError::UnknownKey(key.to_string()))?;
    let mut config = load(path)?;
    let message = handler.set(args, &mut config)?;
    save(&config, path)?;
    Ok(message)
}

/// Apply `multiverse unset <key>` to the config file at `path`.
pub fn unset_setting(
    registry: &SettingRegistry,
    key: &str,
    path: &Path,
) -> Result<String, SettingError> {
    let handler = registry
        .get(key)
        .ok_or_else(|| SettingError::UnknownKey(key.to_string()))?;
    let mut config = load(path)?;
    let message = handler.unset(&mut config)?;
    save(&config, path)?;
    Ok(message)
}

/// Every key with its stored value, one per line.
pub fn format_all(registry: &SettingRegistry, config: &Config) -> String {
    let mut lines = vec!["Current configuration:".to_string()];
    lines.extend(
        registry
            .keys_display_order()
            .iter()
            .filter_map(|key| registry.get(key))
            .map(|handler| handler.format(config)),
    );
    lines.join("\n")
}
