//! Image literal text codec
//!
//! Sprites are stored in source code as tagged template literals:
//!
//! ```text
//! img`
//! . . 1 1
//! . 2 2 .
//! `
//! ```
//!
//! Each pixel is one character: `.` (or `0`) for transparent and a hex digit
//! `1`-`f` for a palette index. Python sources use `img("""...""")` instead of
//! backticks. The field only relies on the [`SpriteCodec`] trait, so hosts with
//! their own literal format can plug in a different codec.

use thiserror::Error;

use crate::models::Bitmap;

/// Pixel characters indexed by palette value.
const HEX_CHARS: [char; 16] = [
    '.', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f',
];

/// Error type for image literal decoding failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Text does not start with the `img` tag
    #[error("image literal must start with 'img'")]
    MissingTag,
    /// Opening delimiter without a matching closing one
    #[error("unterminated image literal, expected closing {0}")]
    Unterminated(&'static str),
    /// A character that is not a pixel value
    #[error("invalid pixel '{ch}' on line {line}")]
    InvalidPixel { ch: char, line: usize },
}

/// Text encoding of a bitmap.
///
/// Implementations must round-trip: `decode(&encode(b)) == Ok(b)` for every
/// bitmap the field produces, and `encode` must be deterministic.
pub trait SpriteCodec {
    fn encode(&self, bitmap: &Bitmap) -> String;
    fn decode(&self, text: &str) -> Result<Bitmap, CodecError>;
}

/// Source language the literal is written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LiteralStyle {
    /// ``img`...` ``
    #[default]
    TypeScript,
    /// `img("""...""")`
    Python,
}

impl LiteralStyle {
    fn open(self) -> &'static str {
        match self {
            LiteralStyle::TypeScript => "img`",
            LiteralStyle::Python => "img(\"\"\"",
        }
    }

    fn close(self) -> &'static str {
        match self {
            LiteralStyle::TypeScript => "`",
            LiteralStyle::Python => "\"\"\")",
        }
    }
}

/// The `img` literal codec.
///
/// Decoding accepts both styles regardless of the style used for encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageLiteralCodec {
    pub style: LiteralStyle,
}

impl ImageLiteralCodec {
    pub fn new(style: LiteralStyle) -> Self {
        Self { style }
    }
}

impl SpriteCodec for ImageLiteralCodec {
    fn encode(&self, bitmap: &Bitmap) -> String {
        let mut out = String::from(self.style.open());
        for row in bitmap.rows() {
            out.push('\n');
            for &value in row {
                out.push(HEX_CHARS[usize::from(value) & 0xf]);
                out.push(' ');
            }
        }
        out.push('\n');
        out.push_str(self.style.close());
        out
    }

    fn decode(&self, text: &str) -> Result<Bitmap, CodecError> {
        let unescaped = text
            .replace("&#96;", "`")
            .replace("&#9;", "\t")
            .replace("&#10;", "\n");
        let body = strip_wrapper(unescaped.trim())?;

        let mut rows = Vec::new();
        for (i, line) in body.lines().enumerate() {
            let mut row = Vec::new();
            for ch in line.chars() {
                if ch.is_whitespace() {
                    continue;
                }
                let value = pixel_value(ch).ok_or(CodecError::InvalidPixel { ch, line: i + 1 })?;
                row.push(value);
            }
            if !row.is_empty() {
                rows.push(row);
            }
        }

        Ok(Bitmap::from_rows(&rows))
    }
}

/// Remove the `img` tag and its delimiters, returning the pixel body.
fn strip_wrapper(text: &str) -> Result<&str, CodecError> {
    let rest = text.strip_prefix("img").ok_or(CodecError::MissingTag)?.trim_start();

    for style in [LiteralStyle::TypeScript, LiteralStyle::Python] {
        // open() includes the tag
        let open = &style.open()[3..];
        if let Some(inner) = rest.strip_prefix(open) {
            return inner
                .trim_end()
                .strip_suffix(style.close())
                .ok_or(CodecError::Unterminated(style.close()));
        }
    }

    Err(CodecError::Unterminated("`"))
}

fn pixel_value(ch: char) -> Option<u8> {
    match ch {
        '.' => Some(0),
        '#' => Some(1),
        _ => ch.to_digit(16).map(|d| d as u8),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(width: u32, height: u32) -> Bitmap {
        let mut bitmap = Bitmap::new(width, height);
        for r in 0..height {
            for c in 0..width {
                bitmap.set(c, r, ((c + r) % 16) as u8);
            }
        }
        bitmap
    }

    #[test]
    fn test_encode_layout() {
        let bitmap = Bitmap::from_rows(&[vec![0, 1], vec![15, 10]]);
        let text = ImageLiteralCodec::default().encode(&bitmap);
        assert_eq!(text, "img`\n. 1 \nf a \n`");
    }

    #[test]
    fn test_encode_python_style() {
        let bitmap = Bitmap::from_rows(&[vec![2]]);
        let text = ImageLiteralCodec::new(LiteralStyle::Python).encode(&bitmap);
        assert_eq!(text, "img(\"\"\"\n2 \n\"\"\")");
    }

    #[test]
    fn test_roundtrip_preserves_bitmap() {
        let codec = ImageLiteralCodec::default();
        for (w, h) in [(1, 1), (16, 16), (32, 8), (5, 13)] {
            let bitmap = checker(w, h);
            assert_eq!(codec.decode(&codec.encode(&bitmap)), Ok(bitmap));
        }
    }

    #[test]
    fn test_encode_is_stable() {
        let codec = ImageLiteralCodec::default();
        let bitmap = checker(8, 8);
        assert_eq!(codec.encode(&bitmap), codec.encode(&bitmap.clone()));
    }

    #[test]
    fn test_decode_accepts_python_literal_with_typescript_codec() {
        let codec = ImageLiteralCodec::default();
        let bitmap = codec.decode("img(\"\"\"\n. 3\n4 .\n\"\"\")").unwrap();
        assert_eq!(bitmap, Bitmap::from_rows(&[vec![0, 3], vec![4, 0]]));
    }

    #[test]
    fn test_decode_html_escaped() {
        let codec = ImageLiteralCodec::default();
        let bitmap = codec.decode("img&#96;&#10;1 2&#10;3 4&#10;&#96;").unwrap();
        assert_eq!(bitmap, Bitmap::from_rows(&[vec![1, 2], vec![3, 4]]));
    }

    #[test]
    fn test_decode_hash_and_zero_aliases() {
        let codec = ImageLiteralCodec::default();
        let bitmap = codec.decode("img`\n# 0 F\n`").unwrap();
        assert_eq!(bitmap, Bitmap::from_rows(&[vec![1, 0, 15]]));
    }

    #[test]
    fn test_decode_ragged_rows_are_padded() {
        let codec = ImageLiteralCodec::default();
        let bitmap = codec.decode("img`\n1 1 1\n2\n`").unwrap();
        assert_eq!(bitmap.width(), 3);
        assert_eq!(bitmap.height(), 2);
        assert_eq!(bitmap.get(2, 1), 0);
    }

    #[test]
    fn test_decode_empty_body_is_zero_sized() {
        let codec = ImageLiteralCodec::default();
        let bitmap = codec.decode("img`\n\n`").unwrap();
        assert!(bitmap.is_empty());
    }

    #[test]
    fn test_decode_missing_tag() {
        let codec = ImageLiteralCodec::default();
        assert_eq!(codec.decode("`1 2`"), Err(CodecError::MissingTag));
        assert_eq!(codec.decode(""), Err(CodecError::MissingTag));
    }

    #[test]
    fn test_decode_unterminated() {
        let codec = ImageLiteralCodec::default();
        assert_eq!(codec.decode("img`\n1 2\n"), Err(CodecError::Unterminated("`")));
        assert!(codec.decode("img 1 2").is_err());
    }

    #[test]
    fn test_decode_invalid_pixel() {
        let codec = ImageLiteralCodec::default();
        assert_eq!(
            codec.decode("img`\n1 2\n3 z\n`"),
            Err(CodecError::InvalidPixel { ch: 'z', line: 3 })
        );
    }
}
