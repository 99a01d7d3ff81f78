//! Command modules for the release report CLI.
//!
//! - `fetch_cmd`: fetches, shows and exports the scripts of a release
//! - `list_cmd`: lists the configured releases and folders
//! - `config_cmd`: creates and validates the configuration file

pub mod config_cmd;
pub mod fetch_cmd;
pub mod list_cmd;
