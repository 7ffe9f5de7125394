//! Sprite field options
//!
//! Block definitions hand the field a loosely typed option bag: numbers may
//! arrive as strings or as JSON numbers, and older blocks use a `sizes` list
//! instead of `initWidth`/`initHeight`. [`parse_options`] normalizes all of it
//! into a [`FieldConfig`] and never fails; anything it cannot read keeps the
//! previous value.

use serde::{Deserialize, Deserializer, Serialize};

/// Default palette index for new sprites
pub const DEFAULT_INIT_COLOR: i32 = 1;

/// Default edge length for new sprites
pub const DEFAULT_SIZE: i32 = 16;

/// Largest width or height of a blank sprite
pub const MAX_SIZE: i32 = 512;

/// Raw field options as written in a block definition.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOptions {
    /// Deprecated `"w,h;w,h"` size list
    #[serde(default, deserialize_with = "loose_string")]
    pub sizes: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub init_color: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub init_width: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub init_height: Option<String>,
    /// Passed through to the full editor untouched
    #[serde(default, deserialize_with = "loose_string")]
    pub filter: Option<String>,
    /// Render the preview without transparency
    #[serde(default, deserialize_with = "loose_bool")]
    pub light_mode: bool,
}

impl RawOptions {
    /// Parse options from a JSON object.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Accept strings and numbers, map everything else to `None`.
fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Read a flag by truthiness: `null`, `0`, `""` and `false` are off.
fn loose_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => false,
        Some(serde_json::Value::Bool(b)) => b,
        Some(serde_json::Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(serde_json::Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    })
}

/// Host screen dimensions, used for negative legacy sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: i32,
    pub height: i32,
}

/// Normalized field configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfig {
    pub init_color: i32,
    pub init_width: i32,
    pub init_height: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            init_color: DEFAULT_INIT_COLOR,
            init_width: DEFAULT_SIZE,
            init_height: DEFAULT_SIZE,
            filter: None,
        }
    }
}

impl FieldConfig {
    /// Dimensions for a freshly created sprite.
    ///
    /// A negative legacy size can survive parsing when the host has no screen
    /// size, and option text can ask for any size at all. An axis that is not
    /// in `1..=MAX_SIZE` falls back to [`DEFAULT_SIZE`].
    pub fn blank_dimensions(&self) -> (u32, u32) {
        let axis = |value: i32, name: &str| match u32::try_from(value) {
            Ok(v) if (1..=MAX_SIZE as u32).contains(&v) => v,
            _ => {
                log::debug!("{} {} out of range, using {}", name, value, DEFAULT_SIZE);
                DEFAULT_SIZE as u32
            }
        };
        (axis(self.init_width, "width"), axis(self.init_height, "height"))
    }
}

/// Normalize raw options.
///
/// Precedence, later wins: built-in defaults, the legacy `sizes` list, then the
/// explicit `initWidth`/`initHeight`/`initColor` fields.
///
/// # Examples
///
/// ```
/// use pxsprite::options::{parse_options, RawOptions};
///
/// let raw = RawOptions {
///     sizes: Some("16,16;32,32".to_string()),
///     init_color: Some("3".to_string()),
///     ..Default::default()
/// };
/// let config = parse_options(Some(&raw), None);
/// assert_eq!((config.init_width, config.init_height), (16, 16));
/// assert_eq!(config.init_color, 3);
/// ```
pub fn parse_options(raw: Option<&RawOptions>, screen: Option<ScreenSize>) -> FieldConfig {
    let mut config = FieldConfig::default();

    let Some(raw) = raw else {
        return config;
    };

    if let Some(sizes) = raw.sizes.as_deref().filter(|s| !s.is_empty()) {
        // only the first size is used
        if let Some(&(width, height)) = parse_sizes(sizes, screen).first() {
            config.init_width = width;
            config.init_height = height;
        }
    }

    if let Some(filter) = raw.filter.as_deref().filter(|s| !s.is_empty()) {
        config.filter = Some(filter.to_string());
    }

    config.init_color = parse_int_or(raw.init_color.as_deref(), config.init_color);
    config.init_width = parse_int_or(raw.init_width.as_deref(), config.init_width);
    config.init_height = parse_int_or(raw.init_height.as_deref(), config.init_height);

    config
}

/// Parse a legacy `"w,h;w,h"` size list.
///
/// Pairs that are not exactly two integers are skipped. A negative axis is
/// replaced by the screen size for that axis when one is known.
pub fn parse_sizes(sizes: &str, screen: Option<ScreenSize>) -> Vec<(i32, i32)> {
    let mut parsed = Vec::new();

    for pair in sizes.split(';') {
        let parts: Vec<&str> = pair.split(',').collect();
        if parts.len() != 2 {
            log::debug!("skipping size pair '{}': expected 'width,height'", pair);
            continue;
        }

        let (Some(mut width), Some(mut height)) =
            (parse_leading_int(parts[0]), parse_leading_int(parts[1]))
        else {
            log::debug!("skipping size pair '{}': not numeric", pair);
            continue;
        };

        if let Some(screen) = screen {
            if width < 0 {
                width = screen.width;
            }
            if height < 0 {
                height = screen.height;
            }
        }

        parsed.push((width, height));
    }

    parsed
}

/// Parse an integer option, keeping `default` when absent or non-numeric.
pub fn parse_int_or(raw: Option<&str>, default: i32) -> i32 {
    raw.and_then(parse_leading_int).unwrap_or(default)
}

/// Read the integer at the start of `s`.
///
/// Leading whitespace and a sign are allowed and parsing stops at the first
/// non-digit, so `"16px"` is 16 and `"2.5"` is 2. A `0x` prefix switches to
/// hex (`"0x10"` is 16). Text without leading digits or that overflows `i32`
/// is rejected.
pub fn parse_leading_int(s: &str) -> Option<i32> {
    let s = s.trim_start();
    let (negative, unsigned) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, digits) = match unsigned.get(..2) {
        Some("0x") | Some("0X") => (16, &unsigned[2..]),
        _ => (10, unsigned),
    };

    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = i64::from_str_radix(&digits[..end], radix).ok()?;
    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value).ok()
}
