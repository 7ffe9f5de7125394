//! Sprite preview thumbnails
//!
//! Sprites of any size are drawn into a fixed 32x32 thumbnail. The sprite is
//! scaled uniformly so it fits on both axes and centered on the short axis.
//! 32 divides the common sprite sizes (8, 16, 32) evenly, so those scale
//! without blurring; other sizes get fractional cells.
//!
//! Cells are rasterized without anti-aliasing: a thumbnail pixel belongs to
//! the cell that contains its center. Adjacent cells share edges, so every
//! pixel under the sprite is painted by exactly one cell.

use std::io;
use std::path::Path;

use base64::Engine;
use image::{ImageEncoder, Rgba, RgbaImage};
use thiserror::Error;

use crate::color::parse_color;
use crate::models::{Bitmap, Warning, MAX_COLOR};
use crate::palettes::Palette;

/// Edge length of the preview thumbnail
pub const PREVIEW_SIZE: u32 = 32;

/// Opaque background used in light mode
pub const LIGHT_BACKGROUND: Rgba<u8> = Rgba([0xde, 0xde, 0xde, 255]);

/// Magenta color used for missing palette entries and invalid colors
const MAGENTA: Rgba<u8> = Rgba([255, 0, 255, 255]);

/// Transparent color used for the standard-mode canvas
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// How the thumbnail treats transparency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreviewMode {
    /// Transparent pixels stay transparent
    #[default]
    Standard,
    /// Every pixel is opaque; transparency shows [`LIGHT_BACKGROUND`]
    Light,
}

impl PreviewMode {
    pub fn from_light_mode(light_mode: bool) -> Self {
        if light_mode {
            PreviewMode::Light
        } else {
            PreviewMode::Standard
        }
    }
}

/// Error type for preview encoding
#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Placement of a sprite inside the thumbnail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewLayout {
    /// Edge length of one sprite pixel, in thumbnail pixels (not rounded)
    pub cell_size: f64,
    pub x_offset: f64,
    pub y_offset: f64,
}

impl PreviewLayout {
    /// Layout for a `width` x `height` sprite, or `None` if either is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use pxsprite::preview::PreviewLayout;
    ///
    /// let layout = PreviewLayout::for_size(16, 32).unwrap();
    /// assert_eq!(layout.cell_size, 1.0);
    /// assert_eq!((layout.x_offset, layout.y_offset), (8.0, 0.0));
    /// ```
    pub fn for_size(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }

        let size = f64::from(PREVIEW_SIZE);
        let (w, h) = (f64::from(width), f64::from(height));

        // Only the short axis gets a positive offset
        Some(Self {
            cell_size: (size / w).min(size / h),
            x_offset: (size * (1.0 - w / h) / 2.0).floor().max(0.0),
            y_offset: (size * (1.0 - h / w) / 2.0).floor().max(0.0),
        })
    }

    /// Destination rectangle `(x, y, size)` for the cell at `(col, row)`.
    pub fn cell_rect(&self, col: u32, row: u32) -> (f64, f64, f64) {
        (
            self.x_offset + f64::from(col) * self.cell_size,
            self.y_offset + f64::from(row) * self.cell_size,
            self.cell_size,
        )
    }
}

/// A rendered thumbnail
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    image: RgbaImage,
}

impl Preview {
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Encode the thumbnail as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>, PreviewError> {
        let mut png_data = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut png_data);
        encoder.write_image(
            self.image.as_raw(),
            self.image.width(),
            self.image.height(),
            image::ColorType::Rgba8,
        )?;
        Ok(png_data)
    }

    /// Encode the thumbnail as a `data:image/png;base64,...` URI.
    pub fn to_data_uri(&self) -> Result<String, PreviewError> {
        let png = self.to_png()?;
        Ok(format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(png)
        ))
    }

    /// Save the thumbnail as a PNG file, creating parent directories.
    pub fn save_png(&self, path: &Path) -> Result<(), PreviewError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_png()?)?;
        Ok(())
    }
}

/// Render a sprite into a 32x32 thumbnail.
///
/// Pixel value `n` is drawn with `palette.colors[n]`. Values with no palette
/// entry, and entries that are not valid colors, are drawn magenta and
/// reported as warnings. An empty bitmap renders an empty canvas.
///
/// # Examples
///
/// ```
/// use pxsprite::models::Bitmap;
/// use pxsprite::palettes::Palette;
/// use pxsprite::preview::{render_preview, PreviewMode};
///
/// let mut bitmap = Bitmap::new(8, 8);
/// bitmap.set(0, 0, 2);
///
/// let (preview, warnings) = render_preview(&bitmap, &Palette::default(), PreviewMode::Standard);
/// assert_eq!(preview.image().dimensions(), (32, 32));
/// assert_eq!(preview.image().get_pixel(3, 3).0, [0xff, 0x21, 0x21, 0xff]);
/// assert_eq!(preview.image().get_pixel(4, 4).0[3], 0);
/// assert!(warnings.is_empty());
/// ```
pub fn render_preview(
    bitmap: &Bitmap,
    palette: &Palette,
    mode: PreviewMode,
) -> (Preview, Vec<Warning>) {
    let mut warnings = Vec::new();

    let mut image = match mode {
        PreviewMode::Light => RgbaImage::from_pixel(PREVIEW_SIZE, PREVIEW_SIZE, LIGHT_BACKGROUND),
        PreviewMode::Standard => RgbaImage::from_pixel(PREVIEW_SIZE, PREVIEW_SIZE, TRANSPARENT),
    };

    let Some(layout) = PreviewLayout::for_size(bitmap.width(), bitmap.height()) else {
        warnings.push(Warning::new(format!(
            "Empty bitmap ({}x{}), nothing to draw",
            bitmap.width(),
            bitmap.height()
        )));
        return (Preview { image }, warnings);
    };

    let mut colors = ColorCache::new(palette, mode);

    for (row, pixels) in bitmap.rows().enumerate() {
        for (col, &value) in pixels.iter().enumerate() {
            let fill = if value != 0 {
                colors.get(value, &mut warnings)
            } else if mode == PreviewMode::Light {
                LIGHT_BACKGROUND
            } else {
                continue;
            };

            let (x, y, size) = layout.cell_rect(col as u32, row as u32);
            fill_rect(&mut image, x, y, size, size, fill);
        }
    }

    (Preview { image }, warnings)
}

/// Resolved fill colors per palette index, parsed on first use.
struct ColorCache<'a> {
    palette: &'a Palette,
    mode: PreviewMode,
    resolved: [Option<Rgba<u8>>; MAX_COLOR as usize + 1],
}

impl<'a> ColorCache<'a> {
    fn new(palette: &'a Palette, mode: PreviewMode) -> Self {
        Self {
            palette,
            mode,
            resolved: [None; MAX_COLOR as usize + 1],
        }
    }

    fn get(&mut self, index: u8, warnings: &mut Vec<Warning>) -> Rgba<u8> {
        let slot = usize::from(index.min(MAX_COLOR));
        if let Some(color) = self.resolved[slot] {
            return color;
        }

        let color = match self.palette.sprite_color(index) {
            Some(css) => match parse_color(css) {
                Ok(rgba) => rgba,
                Err(e) => {
                    warnings.push(Warning::new(format!(
                        "Invalid color '{}' for palette index {}: {}, using magenta",
                        css, index, e
                    )));
                    MAGENTA
                }
            },
            None => {
                warnings.push(Warning::new(format!(
                    "Palette '{}' has no color for index {}, using magenta",
                    self.palette.name, index
                )));
                MAGENTA
            }
        };

        // No alpha channel in light mode: translucent colors land on the background
        let color = match self.mode {
            PreviewMode::Light => flatten(color, LIGHT_BACKGROUND),
            PreviewMode::Standard => color,
        };

        self.resolved[slot] = Some(color);
        color
    }
}

/// Composite `color` over an opaque background.
fn flatten(color: Rgba<u8>, background: Rgba<u8>) -> Rgba<u8> {
    let alpha = u32::from(color.0[3]);
    let mix = |fg: u8, bg: u8| ((u32::from(fg) * alpha + u32::from(bg) * (255 - alpha) + 127) / 255) as u8;
    Rgba([
        mix(color.0[0], background.0[0]),
        mix(color.0[1], background.0[1]),
        mix(color.0[2], background.0[2]),
        255,
    ])
}

/// Fill the pixels whose centers lie inside `[x, x + w) x [y, y + h)`.
fn fill_rect(image: &mut RgbaImage, x: f64, y: f64, w: f64, h: f64, color: Rgba<u8>) {
    let span = |start: f64, len: f64, limit: u32| {
        let limit = f64::from(limit);
        let first = (start - 0.5).ceil().clamp(0.0, limit);
        let last = (start + len - 0.5).ceil().clamp(0.0, limit);
        first as u32..last as u32
    };

    for py in span(y, h, image.height()) {
        for px in span(x, w, image.width()) {
            image.put_pixel(px, py, color);
        }
    }
}
