//! Configuration for the sprite field runtime
//!
//! Provides types and loading for `pxsprite.toml`.

pub mod loader;
pub mod schema;

pub use loader::{find_config, find_config_from, load_config, parse_config, ConfigError, CONFIG_FILE};
pub use schema::*;
