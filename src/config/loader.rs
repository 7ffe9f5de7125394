//! Locating and reading `pxsprite.toml`
//!
//! A block project keeps one `pxsprite.toml` at its root so every sprite
//! field in it previews against the same target device: same palette, same
//! screen for `-1` sizes. Tools run from anywhere inside the project, so the
//! lookup climbs from the working directory. A per-user file under the XDG
//! config directory covers sprites edited outside any project. With neither,
//! the field renders for the default arcade runtime.

use super::schema::PxspriteConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file
pub const CONFIG_FILE: &str = "pxsprite.toml";

/// Why the runtime description could not be used
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse pxsprite.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// One message per invalid field, e.g. an unknown palette name
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// Project config for the current directory, else the per-user one.
pub fn find_config() -> Option<PathBuf> {
    env::current_dir()
        .ok()
        .and_then(|cwd| find_config_from(&cwd))
        .or_else(find_xdg_config)
}

/// `$XDG_CONFIG_HOME/pxsprite/pxsprite.toml`, falling back to `~/.config`.
pub fn find_xdg_config() -> Option<PathBuf> {
    let base = match env::var_os("XDG_CONFIG_HOME") {
        Some(dir) => PathBuf::from(dir),
        None => PathBuf::from(env::var_os("HOME")?).join(".config"),
    };

    Some(base.join("pxsprite").join(CONFIG_FILE)).filter(|path| path.is_file())
}

/// Nearest `pxsprite.toml` in `start` or one of its ancestors.
pub fn find_config_from(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE))
        .find(|path| path.is_file())
}

/// Runtime description for a run of the tool.
///
/// An explicit `path` must exist. Without one the file is discovered with
/// [`find_config`], and a project with no config gets the defaults.
pub fn load_config(path: Option<&Path>) -> Result<PxspriteConfig, ConfigError> {
    match path.map(Path::to_path_buf).or_else(find_config) {
        Some(path) => {
            log::debug!("loading config from {}", path.display());
            parse_config(&fs::read_to_string(&path)?)
        }
        None => Ok(PxspriteConfig::default()),
    }
}

/// Parse and validate config text. Every invalid field is reported at once.
pub fn parse_config(contents: &str) -> Result<PxspriteConfig, ConfigError> {
    let config: PxspriteConfig = toml::from_str(contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.iter().map(ToString::to_string).collect()));
    }

    Ok(config)
}
