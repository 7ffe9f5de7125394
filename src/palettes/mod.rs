//! Runtime palettes.
//!
//! A palette is an ordered list of CSS colors. Slot 0 is reserved for
//! transparency and never drawn; sprite pixel value `n` uses slot `n`.
//! A handful of built-in palettes can be referenced by name.

use serde::{Deserialize, Serialize};

/// An ordered palette. `colors[0]` is the reserved transparent slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub name: String,
    pub colors: Vec<String>,
}

impl Palette {
    pub fn new(name: impl Into<String>, colors: Vec<String>) -> Self {
        Self {
            name: name.into(),
            colors,
        }
    }

    /// Color string for a sprite pixel value.
    ///
    /// Returns `None` for 0 (transparent) and for values past the end of the palette.
    pub fn sprite_color(&self, index: u8) -> Option<&str> {
        if index == 0 {
            return None;
        }
        self.colors.get(usize::from(index)).map(String::as_str)
    }

    /// Number of drawable colors (slot 0 excluded).
    pub fn usable_len(&self) -> usize {
        self.colors.len().saturating_sub(1)
    }
}

impl Default for Palette {
    fn default() -> Self {
        arcade()
    }
}

/// List of all available built-in palette names.
const BUILTIN_NAMES: &[&str] = &["arcade", "pico8", "gameboy", "grayscale"];

/// Returns a list of all available built-in palette names.
pub fn list_builtins() -> Vec<&'static str> {
    BUILTIN_NAMES.to_vec()
}

/// Returns a built-in palette by name, or None if not found.
pub fn get_builtin(name: &str) -> Option<Palette> {
    match name {
        "arcade" => Some(arcade()),
        "pico8" => Some(pico8()),
        "gameboy" => Some(gameboy()),
        "grayscale" => Some(grayscale()),
        _ => None,
    }
}

fn palette(name: &str, colors: &[&str]) -> Palette {
    Palette::new(name, colors.iter().map(|c| c.to_string()).collect())
}

/// Default 16-color arcade palette.
fn arcade() -> Palette {
    palette(
        "arcade",
        &[
            "#000000", "#ffffff", "#ff2121", "#ff93c4", "#ff8135", "#fff609", "#249ca3",
            "#78dc52", "#003fad", "#87f2ff", "#8e2ec4", "#a4839f", "#5c406c", "#e5cdc4",
            "#91463d", "#000000",
        ],
    )
}

/// PICO-8 colors. Black sits in the reserved slot, so 15 are drawable.
/// Reference: https://lospec.com/palette-list/pico-8
fn pico8() -> Palette {
    palette(
        "pico8",
        &[
            "#000000", "#1D2B53", "#7E2553", "#008751", "#AB5236", "#5F574F", "#C2C3C7",
            "#FFF1E8", "#FF004D", "#FFA300", "#FFEC27", "#00E436", "#29ADFF", "#83769C",
            "#FF77A8", "#FFCCAA",
        ],
    )
}

/// Game Boy 4-color green palette.
/// Reference: https://lospec.com/palette-list/nintendo-gameboy-bgb
fn gameboy() -> Palette {
    palette(
        "gameboy",
        &["#00000000", "#9BBC0F", "#8BAC0F", "#306230", "#0F380F"],
    )
}

/// 8-shade grayscale palette from white to black.
fn grayscale() -> Palette {
    palette(
        "grayscale",
        &[
            "#00000000", "#FFFFFF", "#DFDFDF", "#BFBFBF", "#9F9F9F", "#7F7F7F", "#5F5F5F",
            "#3F3F3F", "#000000",
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::parse_color;

    #[test]
    fn test_list_builtins() {
        let builtins = list_builtins();
        assert_eq!(builtins, vec!["arcade", "pico8", "gameboy", "grayscale"]);
    }

    #[test]
    fn test_get_builtin_nonexistent() {
        assert!(get_builtin("nonexistent").is_none());
        assert!(get_builtin("").is_none());
        assert!(get_builtin("Arcade").is_none()); // case-sensitive
    }

    #[test]
    fn test_arcade_is_default() {
        let palette = Palette::default();
        assert_eq!(palette.name, "arcade");
        assert_eq!(palette.colors.len(), 16);
        assert_eq!(palette.usable_len(), 15);
    }

    #[test]
    fn test_sprite_color_skips_reserved_slot() {
        let palette = get_builtin("arcade").unwrap();
        assert_eq!(palette.sprite_color(0), None);
        assert_eq!(palette.sprite_color(1), Some("#ffffff"));
        assert_eq!(palette.sprite_color(2), Some("#ff2121"));
        assert_eq!(palette.sprite_color(15), Some("#000000"));
    }

    #[test]
    fn test_sprite_color_out_of_range() {
        let palette = get_builtin("gameboy").unwrap();
        assert_eq!(palette.sprite_color(4), Some("#0F380F"));
        assert_eq!(palette.sprite_color(5), None);
    }

    #[test]
    fn test_all_builtin_colors_parse() {
        for name in list_builtins() {
            let palette = get_builtin(name).expect("all listed builtins should exist");
            for color in &palette.colors {
                assert!(parse_color(color).is_ok(), "{} in {} should parse", color, name);
            }
        }
    }
}
