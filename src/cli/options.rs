//! Options and blank-sprite commands

use std::process::ExitCode;

use crate::config::PxspriteConfig;
use crate::literal::{ImageLiteralCodec, LiteralStyle};
use crate::options::parse_options;
use crate::state::BitmapState;

use super::{parse_raw_options, screen_size, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the options command
pub fn run_options(config: &PxspriteConfig, json: Option<&str>) -> ExitCode {
    let raw = match parse_raw_options(json) {
        Ok(raw) => raw,
        Err(code) => return code,
    };

    let field_config = parse_options(raw.as_ref(), screen_size(config));
    match serde_json::to_string_pretty(&field_config) {
        Ok(out) => {
            println!("{}", out);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Execute the blank command
pub fn run_blank(config: &PxspriteConfig, json: Option<&str>, python: bool) -> ExitCode {
    let raw = match parse_raw_options(json) {
        Ok(raw) => raw,
        Err(code) => return code,
    };

    let field_config = parse_options(raw.as_ref(), screen_size(config));
    let style = if python {
        LiteralStyle::Python
    } else {
        LiteralStyle::TypeScript
    };
    let state = BitmapState::initialize(None, &field_config, ImageLiteralCodec::new(style));

    println!("{}", state.to_text());
    ExitCode::from(EXIT_SUCCESS)
}
