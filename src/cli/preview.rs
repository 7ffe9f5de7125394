//! Preview command implementation

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::PxspriteConfig;
use crate::field::{FieldHost, SpriteField};
use crate::options::RawOptions;
use crate::palettes;
use crate::preview::Preview;

use super::{read_input, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// The CLI only needs the final thumbnail, which the field keeps.
struct NullHost;

impl FieldHost for NullHost {
    fn preview_updated(&mut self, _preview: &Preview) {}

    fn value_changed(&mut self, _old: &str, _new: &str) {}
}

/// Default output path: `{input}_preview.png` next to the input.
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("sprite");
    let parent = input.parent().unwrap_or(Path::new(""));
    parent.join(format!("{}_preview.png", stem))
}

/// Execute the preview command
pub fn run_preview(
    config: &PxspriteConfig,
    input: &Path,
    output: Option<&Path>,
    data_uri: bool,
    light: bool,
    palette: Option<&str>,
) -> ExitCode {
    let text = match read_input(input) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: Cannot read input '{}': {}", input.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let mut runtime = config.target_runtime();
    if let Some(name) = palette {
        match palettes::get_builtin(name) {
            Some(p) => runtime.palette = p,
            None => {
                eprintln!("Error: Unknown palette '{}'", name);
                eprintln!("Available palettes: {}", palettes::list_builtins().join(", "));
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
        }
    }

    let options = RawOptions {
        light_mode: light || config.preview.light_mode,
        ..Default::default()
    };
    let mut field = SpriteField::with_literal_codec(None, Some(&options), &runtime);
    if !field.set_value(Some(&text), &mut NullHost) {
        eprintln!("Error: '{}' is not a valid non-empty image literal", input.display());
        return ExitCode::from(EXIT_ERROR);
    }

    let Some(preview) = field.preview() else {
        eprintln!("Error: No preview was rendered");
        return ExitCode::from(EXIT_ERROR);
    };

    let is_stdin = input == Path::new("-");
    if data_uri || (is_stdin && output.is_none()) {
        return match preview.to_data_uri() {
            Ok(uri) => {
                println!("{}", uri);
                ExitCode::from(EXIT_SUCCESS)
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::from(EXIT_ERROR)
            }
        };
    }

    let output_path = output.map(Path::to_path_buf).unwrap_or_else(|| default_output_path(input));
    match preview.save_png(&output_path) {
        Ok(()) => {
            eprintln!("Saved: {}", output_path.display());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: Failed to save '{}': {}", output_path.display(), e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("sprites/hero.txt")),
            PathBuf::from("sprites/hero_preview.png")
        );
        assert_eq!(default_output_path(Path::new("hero")), PathBuf::from("hero_preview.png"));
    }
}
