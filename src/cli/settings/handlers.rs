//! Handlers for each persisted configuration key.

use crate::cli::settings::error::SettingError;
use crate::cli::settings::{success_set, success_unset, SettingHandler};
use crate::core::config::data::Config;
use crate::ui::theme::Theme;
use crate::utils::url::{is_http_url, normalize_base_url};

fn format_value(key: &str, value: Option<&str>) -> String {
    match value {
        Some(value) => format!("  {key}: {value}"),
        None => format!("  {key}: (unset)"),
    }
}

/// Handler for the `base-url` setting.
pub struct BaseUrlHandler;

impl SettingHandler for BaseUrlHandler {
    fn key(&self) -> &'static str {
        "base-url"
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        let Some(input) = args.first() else {
            return Err(SettingError::MissingArgs {
                hint: "To set the API root, specify its URL:",
                example: "multiverse set base-url https://rickandmortyapi.com/api",
            });
        };
        if !is_http_url(input) {
            return Err(SettingError::InvalidValue {
                key: "base-url",
                input: input.clone(),
                expected: "an http:// or https:// URL",
            });
        }

        let url = normalize_base_url(input);
        let message = success_set("base-url", &url);
        config.base_url = Some(url);
        Ok(message)
    }

    fn unset(&self, config: &mut Config) -> Result<String, SettingError> {
        config.base_url = None;
        Ok(success_unset("base-url"))
    }

    fn format(&self, config: &Config) -> String {
        format_value("base-url", config.base_url.as_deref())
    }
}

/// Handler for the `start-page` setting.
pub struct StartPageHandler;

impl SettingHandler for StartPageHandler {
    fn key(&self) -> &'static str {
        "start-page"
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        let Some(input) = args.first() else {
            return Err(SettingError::MissingArgs {
                hint: "To choose the page the browser opens on, specify a page number:",
                example: "multiverse set start-page 3",
            });
        };
        let page = match input.parse::<u32>() {
            Ok(page) if page >= 1 => page,
            _ => {
                return Err(SettingError::InvalidValue {
                    key: "start-page",
                    input: input.clone(),
                    expected: "a page number of 1 or more",
                })
            }
        };

        config.start_page = Some(page);
        Ok(success_set("start-page", &page.to_string()))
    }

    fn unset(&self, config: &mut Config) -> Result<String, SettingError> {
        config.start_page = None;
        Ok(success_unset("start-page"))
    }

    fn format(&self, config: &Config) -> String {
        let page = config.start_page.map(|page| page.to_string());
        format_value("start-page", page.as_deref())
    }
}

/// Handler for the `log-file` setting.
pub struct LogFileHandler;

impl SettingHandler for LogFileHandler {
    fn key(&self) -> &'static str {
        "log-file"
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        if args.is_empty() {
            return Err(SettingError::MissingArgs {
                hint: "To log diagnostics while browsing, specify a file:",
                example: "multiverse set log-file ~/multiverse.log",
            });
        }

        // Paths with spaces arrive split across several arguments.
        let path = args.join(" ");
        let message = success_set("log-file", &path);
        config.log_file = Some(path);
        Ok(message)
    }

    fn unset(&self, config: &mut Config) -> Result<String, SettingError> {
        config.log_file = None;
        Ok(success_unset("log-file"))
    }

    fn format(&self, config: &Config) -> String {
        format_value("log-file", config.log_file.as_deref())
    }
}

/// Handler for the `theme` setting.
pub struct ThemeHandler;

impl SettingHandler for ThemeHandler {
    fn key(&self) -> &'static str {
        "theme"
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        let Some(input) = args.first() else {
            return Err(SettingError::MissingArgs {
                hint: "To set a theme, specify the theme name:",
                example: "multiverse set theme light",
            });
        };
        if !Theme::is_known(input) {
            return Err(SettingError::UnknownTheme {
                input: input.clone(),
            });
        }

        let theme = input.to_ascii_lowercase();
        let message = success_set("theme", &theme);
        config.theme = Some(theme);
        Ok(message)
    }

    fn unset(&self, config: &mut Config) -> Result<String, SettingError> {
        config.theme = None;
        Ok(success_unset("theme"))
    }

    fn format(&self, config: &Config) -> String {
        format_value("theme", config.theme.as_deref())
    }
}
