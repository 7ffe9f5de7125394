//! Bitmap state owned by a sprite field
//!
//! The state holds the current sprite and guards how it may change. Text
//! coming from the host is untrusted: anything the codec rejects, or that
//! decodes to a zero-sized sprite, is dropped and the last good bitmap stays.
//! Bitmaps committed by the full editor are trusted and always replace the
//! state, even when empty.

use crate::literal::{CodecError, SpriteCodec};
use crate::models::Bitmap;
use crate::options::FieldConfig;

/// Why a text value was not accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The codec could not read the text
    Malformed(CodecError),
    /// The text decoded to a sprite with no pixels
    Empty { width: u32, height: u32 },
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::Malformed(e) => write!(f, "{}", e),
            Rejection::Empty { width, height } => write!(f, "empty bitmap ({}x{})", width, height),
        }
    }
}

/// The current sprite and the codec used to serialize it.
#[derive(Debug, Clone)]
pub struct BitmapState<C: SpriteCodec> {
    bitmap: Bitmap,
    codec: C,
}

impl<C: SpriteCodec> BitmapState<C> {
    /// Start from an existing value, or a blank sprite sized by `config`.
    ///
    /// Empty or unreadable text, and text holding a zero-sized sprite, fall
    /// back to the blank sprite.
    pub fn initialize(text: Option<&str>, config: &FieldConfig, codec: C) -> Self {
        let decoded = text.filter(|t| !t.is_empty()).and_then(|t| match codec.decode(t) {
            Ok(bitmap) if !bitmap.is_empty() => Some(bitmap),
            Ok(_) => {
                log::debug!("ignoring empty initial sprite value");
                None
            }
            Err(e) => {
                log::debug!("ignoring initial sprite value: {}", e);
                None
            }
        });

        let bitmap = decoded.unwrap_or_else(|| {
            let (width, height) = config.blank_dimensions();
            Bitmap::new(width, height)
        });

        Self { bitmap, codec }
    }

    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Replace the sprite from text. Rejected text leaves the state untouched.
    pub fn set_from_text(&mut self, text: &str) -> Result<(), Rejection> {
        let bitmap = self.codec.decode(text).map_err(Rejection::Malformed)?;
        if bitmap.is_empty() {
            return Err(Rejection::Empty {
                width: bitmap.width(),
                height: bitmap.height(),
            });
        }
        self.bitmap = bitmap;
        Ok(())
    }

    /// Replace the sprite with one committed by the full editor.
    pub fn set_from_commit(&mut self, bitmap: Bitmap) {
        self.bitmap = bitmap;
    }

    /// Serialized form of the current sprite.
    pub fn to_text(&self) -> String {
        self.codec.encode(&self.bitmap)
    }
}
