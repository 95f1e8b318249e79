pub mod app;
pub mod config;
pub mod constants;
pub mod episodes;
pub mod fetcher;
pub mod filter;
pub mod pagination;
