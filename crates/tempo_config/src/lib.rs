//! Parsing, validation and resolution of `tempo.toml` project files.
//!
//! A project file describes the board stackup, the delay profiles, the net
//! classes that select them and a list of routed items. [`load_config`]
//! produces the raw [`ProjectConfig`]; [`ProjectConfig::resolve`] turns it
//! into the domain types the delay engine consumes.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod resolve;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use resolve::ResolvedProject;
pub use types::*;
