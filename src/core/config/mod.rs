pub mod data;
pub mod io;

pub use data::{path_display, Config, Settings, SettingsOverrides};
pub use io::ConfigError;
