//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod list;
pub mod settings;

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;

use crate::api::HttpCharacterApi;
use crate::cli::list::list_characters;
use crate::cli::settings::{format_all, set_setting, unset_setting, SettingRegistry};
use crate::core::config::data::path_display;
use crate::core::config::{Config, Settings, SettingsOverrides};
use crate::core::constants::FILTER_ALL;
use crate::core::filter::FilterSelection;
use crate::ui::browse_loop::run_browser;
use crate::utils::logging::{init_tracing, LogTarget};
use crate::utils::url::is_http_url;

#[derive(Parser)]
#[command(name = "multiverse")]
#[command(about = "Browse Rick and Morty characters in the terminal")]
#[command(
    long_about = "Multiverse is a full-screen terminal browser for the characters of the \
Rick and Morty API. It shows one page of characters at a time as cards and narrows \
the page by status and gender.\n\n\
Controls:\n\
  n / Right         Next page\n\
  p / Left          Previous page\n\
  s / S             Cycle the status filter forward / backward\n\
  g / G             Cycle the gender filter forward / backward\n\
  Tab               Move focus between the filters\n\
  Up/Down           Change the focused filter\n\
  j/k PgUp/PgDn     Scroll the cards\n\
  q / Esc / Ctrl+C  Quit\n\n\
Configuration:\n\
  multiverse set <key> <value>   Persist base-url, start-page, log-file or theme\n\
  multiverse config              Show the effective configuration"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// API root to query, e.g. https://rickandmortyapi.com/api
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Page to open on
    #[arg(long, global = true, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub page: Option<u32>,

    /// Write diagnostic logs to the specified file
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive browser (default)
    Browse,
    /// Print one filtered page of characters and exit
    List {
        /// Only show characters with this status (e.g. Alive, Dead, unknown)
        #[arg(long, default_value = FILTER_ALL)]
        status: String,
        /// Only show characters with this gender (e.g. Female, Male, Genderless, unknown)
        #[arg(long, default_value = FILTER_ALL)]
        gender: String,
        /// Also look up the episode each character was first seen in
        #[arg(long)]
        episodes: bool,
    },
    /// Set configuration values, or list them when no key is given
    Set {
        /// Configuration key to set
        key: Option<String>,
        /// Value to set for the key
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
    /// Print the effective configuration
    Config,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    if let Some(url) = args.base_url.as_deref() {
        if !is_http_url(url) {
            eprintln!("❌ --base-url must be an http:// or https:// URL: {url}");
            std::process::exit(2);
        }
    }

    let config = Config::load()?;
    let overrides = SettingsOverrides {
        base_url: args.base_url.clone(),
        start_page: args.page,
        log_file: args.log.clone(),
    };
    let settings = Settings::resolve(&config, &overrides);

    match args.command.unwrap_or(Commands::Browse) {
        Commands::Browse => {
            init_tracing(&LogTarget::for_browser(settings.log_file.clone()))?;
            run_browser(settings).await
        }
        Commands::List {
            status,
            gender,
            episodes,
        } => {
            init_tracing(&LogTarget::for_command(settings.log_file.clone()))?;
            debug!(page = settings.start_page, %status, %gender, "listing characters");
            let api = HttpCharacterApi::new(settings.base_url.clone());
            let selection = FilterSelection::new(status, gender);
            let mut stdout = std::io::stdout().lock();
            if let Err(err) =
                list_characters(&api, settings.start_page, &selection, episodes, &mut stdout).await
            {
                eprintln!("❌ {err}");
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Set { key, value } => {
            let registry = SettingRegistry::new();
            let Some(key) = key else {
                println!("{}", format_all(&registry, &config));
                return Ok(());
            };
            let path = Config::get_config_path()?;
            match set_setting(&registry, &key, &value, &path) {
                Ok(message) => println!("{message}"),
                Err(err) => {
                    err.print();
                    std::process::exit(err.exit_code());
                }
            }
            Ok(())
        }
        Commands::Unset { key } => {
            let registry = SettingRegistry::new();
            let path = Config::get_config_path()?;
            match unset_setting(&registry, &key, &path) {
                Ok(message) => println!("{message}"),
                Err(err) => {
                    err.print();
                    std::process::exit(err.exit_code());
                }
            }
            Ok(())
        }
        Commands::Config => {
            let path = Config::get_config_path()?;
            println!("{}", effective_config_report(&settings, &path_display(&path)));
            Ok(())
        }
    }
}

fn effective_config_report(settings: &Settings, config_path: &str) -> String {
    let log_file = settings
        .log_file
        .as_ref()
        .map(path_display)
        .unwrap_or_else(|| "(none)".to_string());
    let theme = settings.theme.as_deref().unwrap_or("dark");
    format!(
        "Config file: {config_path}\n\
         \x20 base-url: {}\n\
         \x20 start-page: {}\n\
         \x20 log-file: {log_file}\n\
         \x20 theme: {theme}",
        settings.base_url, settings.start_page
    )
}
