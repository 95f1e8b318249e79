//! Multiverse is a terminal browser for the characters of the Rick and Morty API.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`api`] defines the character and episode payloads and the
//!   [`CharacterApi`](api::CharacterApi) client trait with its HTTP implementation.
//! - [`core`] owns browser state: pagination, page loading with stale-response
//!   protection, status/gender filtering, the episode-name cache and
//!   configuration.
//! - [`ui`] renders the card grid and runs the interactive event loop that
//!   turns key presses into state changes and background fetches.
//! - [`cli`] parses arguments and dispatches to the browser, the one-shot
//!   `list` command, or the config commands.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`].

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
