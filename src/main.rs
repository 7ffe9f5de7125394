//! pxsprite - Command-line tool for sprite field options and preview thumbnails

use std::process::ExitCode;

use flexi_logger::Logger;
use pxsprite::cli;

fn main() -> ExitCode {
    // Held for the whole run; dropping the handle flushes and stops logging
    let _logger = match Logger::try_with_env_or_str("warn").and_then(|logger| logger.log_to_stderr().start()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Warning: logging disabled: {}", e);
            None
        }
    };

    cli::run()
}
