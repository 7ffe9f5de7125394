//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod info;
mod options;
mod preview;

use clap::{Parser, Subcommand};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{load_config, PxspriteConfig};
use crate::options::RawOptions;

pub use info::PaletteAction;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// pxsprite - Sprite field options and 32x32 preview thumbnails
#[derive(Parser)]
#[command(name = "pxsprite")]
#[command(about = "pxsprite - Sprite field options and 32x32 preview thumbnails")]
#[command(version)]
pub struct Cli {
    /// Path to pxsprite.toml (default: search upward from the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the preview thumbnail of an image literal
    Preview {
        /// File containing the image literal, or '-' for stdin
        input: PathBuf,

        /// Output PNG file (default: {input}_preview.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print a data URI instead of writing a file
        #[arg(long)]
        data_uri: bool,

        /// Render without transparency
        #[arg(long)]
        light: bool,

        /// Built-in palette to use instead of the configured one
        #[arg(long)]
        palette: Option<String>,
    },
    /// Print the normalized field configuration for raw block options
    Options {
        /// Raw options as a JSON object (omit for defaults)
        json: Option<String>,
    },
    /// Print the image literal of a blank sprite
    Blank {
        /// Raw options as a JSON object
        #[arg(long)]
        options: Option<String>,

        /// Emit a Python-style literal
        #[arg(long)]
        python: bool,
    },
    /// List and inspect built-in palettes
    Palettes {
        #[command(subcommand)]
        action: PaletteAction,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Preview {
            input,
            output,
            data_uri,
            light,
            palette,
        } => match load_or_report(config_path) {
            Ok(config) => preview::run_preview(
                &config,
                &input,
                output.as_deref(),
                data_uri,
                light,
                palette.as_deref(),
            ),
            Err(code) => code,
        },
        Commands::Options { json } => match load_or_report(config_path) {
            Ok(config) => options::run_options(&config, json.as_deref()),
            Err(code) => code,
        },
        Commands::Blank { options: raw, python } => match load_or_report(config_path) {
            Ok(config) => options::run_blank(&config, raw.as_deref(), python),
            Err(code) => code,
        },
        Commands::Palettes { action } => info::run_palettes(action),
    }
}

/// Load pxsprite.toml, printing the error on failure.
fn load_or_report(path: Option<&Path>) -> Result<PxspriteConfig, ExitCode> {
    load_config(path).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_ERROR)
    })
}

/// Parse a raw options argument, reporting JSON errors.
pub(crate) fn parse_raw_options(json: Option<&str>) -> Result<Option<RawOptions>, ExitCode> {
    match json {
        None => Ok(None),
        Some(json) => RawOptions::from_json(json).map(Some).map_err(|e| {
            eprintln!("Error: Invalid options JSON: {}", e);
            ExitCode::from(EXIT_INVALID_ARGS)
        }),
    }
}

/// Read a whole input file, or stdin for `-`.
pub(crate) fn read_input(input: &Path) -> io::Result<String> {
    if input == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(input)
    }
}

/// Screen size from the loaded config, for legacy negative sizes.
pub(crate) fn screen_size(config: &PxspriteConfig) -> Option<crate::options::ScreenSize> {
    config.runtime.screen_size
}
