//! Configuration schema types for `pxsprite.toml`
//!
//! Describes the host runtime the field renders for: which palette sprite
//! pixels index into, the screen size used by legacy negative sprite sizes,
//! and whether previews are drawn without transparency.

use serde::{Deserialize, Serialize};

use crate::color::parse_color;
use crate::options::ScreenSize;
use crate::palettes::{self, Palette};
use crate::preview::PreviewMode;

/// Runtime section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Built-in palette name, ignored when `colors` is set
    #[serde(default = "default_palette")]
    pub palette: String,
    /// Custom palette; entry 0 is the reserved transparent slot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    /// Screen dimensions of the target device
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_size: Option<ScreenSize>,
}

fn default_palette() -> String {
    "arcade".to_string()
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            palette: default_palette(),
            colors: None,
            screen_size: None,
        }
    }
}

/// Preview section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PreviewConfig {
    /// Draw previews fully opaque
    #[serde(default)]
    pub light_mode: bool,
}

/// Complete `pxsprite.toml` contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PxspriteConfig {
    #[serde(default)]
    pub runtime: RuntimeConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "runtime.colors[3]")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pxsprite.toml: '{}' {}", self.field, self.message)
    }
}

/// Palette and screen of the host the field runs in
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TargetRuntime {
    pub palette: Palette,
    pub screen_size: Option<ScreenSize>,
}

impl PxspriteConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        match &self.runtime.colors {
            Some(colors) => {
                if colors.len() < 2 {
                    errors.push(ConfigValidationError {
                        field: "runtime.colors".to_string(),
                        message: "must contain the reserved slot and at least one color".to_string(),
                    });
                }
                for (i, color) in colors.iter().enumerate() {
                    if let Err(e) = parse_color(color) {
                        errors.push(ConfigValidationError {
                            field: format!("runtime.colors[{}]", i),
                            message: format!("is not a valid color: {}", e),
                        });
                    }
                }
            }
            None => {
                if palettes::get_builtin(&self.runtime.palette).is_none() {
                    errors.push(ConfigValidationError {
                        field: "runtime.palette".to_string(),
                        message: format!(
                            "unknown palette '{}', expected one of: {}",
                            self.runtime.palette,
                            palettes::list_builtins().join(", ")
                        ),
                    });
                }
            }
        }

        if let Some(screen) = self.runtime.screen_size {
            if screen.width <= 0 || screen.height <= 0 {
                errors.push(ConfigValidationError {
                    field: "runtime.screen_size".to_string(),
                    message: "must have positive width and height".to_string(),
                });
            }
        }

        errors
    }

    /// Resolve the runtime section into a palette and screen size.
    ///
    /// Unknown palette names resolve to the default palette; call
    /// [`validate`](Self::validate) first to report them.
    pub fn target_runtime(&self) -> TargetRuntime {
        let palette = match &self.runtime.colors {
            Some(colors) => Palette::new("custom", colors.clone()),
            None => palettes::get_builtin(&self.runtime.palette).unwrap_or_default(),
        };

        TargetRuntime {
            palette,
            screen_size: self.runtime.screen_size,
        }
    }

    pub fn preview_mode(&self) -> PreviewMode {
        PreviewMode::from_light_mode(self.preview.light_mode)
    }
}
