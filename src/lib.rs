//! pxsprite - Sprite field model for visual block editors
//!
//! This library provides functionality to:
//! - Normalize loosely typed sprite field options
//! - Hold a sprite value and round-trip it through image literal text
//! - Render sprites of any size into a 32x32 preview thumbnail

pub mod cli;
pub mod color;
pub mod config;
pub mod field;
pub mod literal;
pub mod models;
pub mod options;
pub mod palettes;
pub mod preview;
pub mod state;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use field::{EditorCommit, EditorRequest, FieldHost, SpriteEditor, SpriteField};
pub use literal::{ImageLiteralCodec, SpriteCodec};
pub use models::Bitmap;
pub use options::{parse_options, FieldConfig, RawOptions};
pub use preview::{render_preview, Preview, PreviewMode};
