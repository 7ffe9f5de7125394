//! WASM API module for browser/JS interop
//!
//! Lets a web block editor use the field logic directly: normalize block
//! options, create blank sprite literals and render preview thumbnails.

use wasm_bindgen::prelude::*;

use crate::literal::{ImageLiteralCodec, SpriteCodec};
use crate::models::Bitmap;
use crate::options::{parse_options, FieldConfig, RawOptions, ScreenSize};
use crate::palettes::Palette;
use crate::preview::{render_preview, PreviewMode};

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Result of rendering a preview thumbnail.
#[wasm_bindgen]
pub struct PreviewResult {
    data_uri: String,
    pixels: Vec<u8>,
    warnings: Vec<String>,
}

#[wasm_bindgen]
impl PreviewResult {
    /// `data:image/png;base64,...` URI, empty if encoding failed
    #[wasm_bindgen(getter)]
    pub fn data_uri(&self) -> String {
        self.data_uri.clone()
    }

    /// Raw 32x32 RGBA pixel data (4 bytes per pixel)
    #[wasm_bindgen(getter)]
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Any warnings generated during rendering
    #[wasm_bindgen(getter)]
    pub fn warnings(&self) -> Vec<String> {
        self.warnings.clone()
    }
}

/// Parse an optional JSON options object; anything unreadable counts as absent.
fn raw_options(options_json: &str) -> Option<RawOptions> {
    if options_json.trim().is_empty() {
        return None;
    }
    RawOptions::from_json(options_json).ok()
}

/// Host screen size from `{"width": w, "height": h}`; anything else means unknown.
fn screen_from_json(screen_json: &str) -> Option<ScreenSize> {
    serde_json::from_str(screen_json).ok()
}

fn field_config(options_json: &str, screen_json: &str) -> FieldConfig {
    parse_options(raw_options(options_json).as_ref(), screen_from_json(screen_json))
}

/// Palette from a JSON array of colors, or the default palette.
fn palette_from_json(palette_json: &str) -> Palette {
    serde_json::from_str::<Vec<String>>(palette_json)
        .map(|colors| Palette::new("custom", colors))
        .unwrap_or_default()
}

/// Normalize block options, returning the field config as JSON.
///
/// `screen_json` resolves negative legacy sizes; pass `""` when the host
/// screen is unknown.
#[wasm_bindgen]
pub fn parse_field_options(options_json: &str, screen_json: &str) -> String {
    let config = field_config(options_json, screen_json);
    serde_json::to_string(&config).unwrap_or_default()
}

/// Image literal for a blank sprite sized by the given options.
#[wasm_bindgen]
pub fn blank_sprite(options_json: &str, screen_json: &str) -> String {
    let config = field_config(options_json, screen_json);
    let (width, height) = config.blank_dimensions();
    ImageLiteralCodec::default().encode(&Bitmap::new(width, height))
}

/// Render the preview thumbnail for an image literal.
///
/// Unreadable or empty literals produce an empty canvas with a warning.
#[wasm_bindgen]
pub fn render_sprite_preview(literal: &str, palette_json: &str, light_mode: bool) -> PreviewResult {
    let mut warnings = Vec::new();

    let bitmap = match ImageLiteralCodec::default().decode(literal) {
        Ok(bitmap) => bitmap,
        Err(e) => {
            warnings.push(format!("Invalid sprite: {}", e));
            Bitmap::default()
        }
    };

    let palette = palette_from_json(palette_json);
    let (preview, render_warnings) =
        render_preview(&bitmap, &palette, PreviewMode::from_light_mode(light_mode));
    warnings.extend(render_warnings.into_iter().map(|w| w.message));

    PreviewResult {
        data_uri: preview.to_data_uri().unwrap_or_default(),
        pixels: preview.image().as_raw().clone(),
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_options() {
        let json = parse_field_options(r#"{"sizes": "8,8;16,16", "filter": "tile"}"#, "");
        assert_eq!(json, r#"{"initColor":1,"initWidth":8,"initHeight":8,"filter":"tile"}"#);
    }

    #[test]
    fn test_parse_field_options_bad_json_is_default() {
        let json = parse_field_options("{not json", "");
        assert_eq!(json, r#"{"initColor":1,"initWidth":16,"initHeight":16}"#);
    }

    #[test]
    fn test_blank_sprite() {
        assert_eq!(blank_sprite(r#"{"initWidth": 2, "initHeight": 1}"#, ""), "img`\n. . \n`");
    }

    #[test]
    fn test_negative_sizes_use_screen() {
        let screen = r#"{"width": 3, "height": 2}"#;
        let json = parse_field_options(r#"{"sizes": "-1,-1"}"#, screen);
        assert_eq!(json, r#"{"initColor":1,"initWidth":3,"initHeight":2}"#);
        assert_eq!(blank_sprite(r#"{"sizes": "-1,-1"}"#, screen), "img`\n. . . \n. . . \n`");

        // Unknown screen keeps the legacy size, which the blank sprite replaces
        let json = parse_field_options(r#"{"sizes": "-1,-1"}"#, "");
        assert_eq!(json, r#"{"initColor":1,"initWidth":-1,"initHeight":-1}"#);
    }

    #[test]
    fn test_loose_light_mode_keeps_options() {
        let json = parse_field_options(r#"{"initWidth": 8, "lightMode": null}"#, "");
        assert_eq!(json, r#"{"initColor":1,"initWidth":8,"initHeight":16}"#);
    }

    #[test]
    fn test_render_sprite_preview() {
        let result = render_sprite_preview("img`\n1\n`", "", false);
        assert!(result.data_uri().starts_with("data:image/png;base64,"));
        assert_eq!(result.pixels().len(), 32 * 32 * 4);
        assert!(result.warnings().is_empty());
    }

    #[test]
    fn test_render_sprite_preview_custom_palette() {
        let result = render_sprite_preview("img`\n1\n`", r##"["#000000", "#00ff00"]"##, false);
        assert_eq!(&result.pixels()[0..4], &[0, 255, 0, 255]);
    }

    #[test]
    fn test_render_invalid_literal() {
        let result = render_sprite_preview("nope", "", true);
        assert!(result.warnings().iter().any(|w| w.contains("Invalid sprite")));
        assert!(result.pixels().chunks(4).all(|p| p[3] == 255));
    }
}
