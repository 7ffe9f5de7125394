//! Data models shared by the sprite field (bitmaps and render warnings)

/// Highest palette index a sprite pixel can hold.
///
/// Sprites are 4-bit: 0 is transparent and 1..=15 select a palette slot.
pub const MAX_COLOR: u8 = 15;

/// A grid of palette indices addressed by `(column, row)`.
///
/// Dimensions are fixed for the lifetime of a value; a differently sized
/// sprite is always a new `Bitmap`. Zero-sized bitmaps can exist (an empty
/// image literal decodes to one) but the field never accepts them from text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// Create a blank (fully transparent) bitmap.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
        }
    }

    /// Build a bitmap from rows of palette indices.
    ///
    /// Rows may be ragged: the width is the longest row and shorter rows are
    /// padded with transparent pixels. Values above [`MAX_COLOR`] are clamped.
    pub fn from_rows(rows: &[Vec<u8>]) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut bitmap = Self::new(width as u32, rows.len() as u32);
        for (r, row) in rows.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                bitmap.set(c as u32, r as u32, value);
            }
        }
        bitmap
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Palette index at `(col, row)`; out-of-bounds reads are transparent.
    pub fn get(&self, col: u32, row: u32) -> u8 {
        self.index(col, row).map_or(0, |i| self.pixels[i])
    }

    /// Set the palette index at `(col, row)`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, col: u32, row: u32, value: u8) {
        if let Some(i) = self.index(col, row) {
            self.pixels[i] = value.min(MAX_COLOR);
        }
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // Zero-width bitmaps have no pixels, so the chunk size only has to be non-zero
        self.pixels.chunks(self.width.max(1) as usize)
    }

    fn index(&self, col: u32, row: u32) -> Option<usize> {
        if col < self.width && row < self.height {
            Some(row as usize * self.width as usize + col as usize)
        } else {
            None
        }
    }
}

/// A warning generated while rendering a preview
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    pub message: String,
}

impl Warning {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
