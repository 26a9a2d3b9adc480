//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use huff_codec::compression::{compress::compress, decompress::decompress};
use huff_codec::error::Result;
use huff_codec::tools::cli::{huffopts_init, Mode};
use std::process::ExitCode;

use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> ExitCode {
    // Available log levels are Error, Warn, Info, Debug, Trace
    if let Err(e) = TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Unable to start the logger: {}", e);
    }

    let options = match huffopts_init() {
        Ok(options) => options,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    //----- Figure how what we need to do and go do it
    let result = match options.op_mode {
        Mode::Compress => compress(&options),
        Mode::Decompress => decompress(&options),
    };

    ExitCode::from(exit_status(&result, options.op_mode))
}

/// Log the outcome and map it to the process exit status. Errors are reported once, through
/// the logger.
fn exit_status(result: &Result<()>, mode: Mode) -> u8 {
    match result {
        Ok(()) => {
            info!("Done.\n");
            0
        }
        Err(e) => {
            error!("{} failed: {}", mode, e);
            1
        }
    }
}
