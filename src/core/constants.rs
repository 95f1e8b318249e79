//! Shared constants used across the application

/// Public Rick and Morty API root; endpoints are appended to it.
pub const DEFAULT_BASE_URL: &str = "https://rickandmortyapi.com/api";

/// Filter value that matches every character.
pub const FILTER_ALL: &str = "All";

pub const FIRST_PAGE: u32 = 1;

/// Shown on a card whose character has no episodes at all.
pub const NO_EPISODE_DATA: &str = "No episode data";

/// Shown while the first-episode name is outstanding, and kept if that fetch fails.
pub const LOADING_EPISODE: &str = "Loading episode...";

pub const APP_TITLE: &str = "Rick and Morty Characters";
