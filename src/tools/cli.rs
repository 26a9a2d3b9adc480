use std::path::PathBuf;
use std::{fmt::Display, fmt::Formatter};

use clap::Parser;
use log::info;

use crate::error::{CodecError, Result};

/// Compress or decompress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Compress,
    Decompress,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Image data compression using canonical Huffman coding",
    long_about = "
    Compresses raw image data (or any byte stream) with a canonical Huffman coder. The data can
    optionally be preprocessed with an adjacent value difference model followed by run length
    encoding, and can be scanned adaptively in 16x16 blocks, choosing the horizontal or vertical
    scan direction for each block."
)]
pub struct Args {
    /// Compress the input file (the default mode)
    #[clap(short = 'c', long = "compress", conflicts_with = "decompress")]
    compress: bool,

    /// Decompress the input file
    #[clap(short = 'd', long = "decompress")]
    decompress: bool,

    /// Activate the model and the RLE for preprocessing the input data
    #[clap(short = 'm', long = "model")]
    model: bool,

    /// Activate adaptive image scanning (by default the image is scanned sequentially in the
    /// horizontal direction without dividing it into blocks)
    #[clap(short = 'a', long = "adapt")]
    adapt: bool,

    /// The input file (data to compress or decompress)
    #[clap(short = 'i', long = "input", value_name = "IFILE")]
    input: PathBuf,

    /// The output file (the resulting compressed or decompressed data)
    #[clap(short = 'o', long = "output", value_name = "OFILE")]
    output: PathBuf,

    /// The image width (>= 1), required for compression
    #[clap(short = 'w', long = "width", value_name = "WIDTH_VALUE")]
    width: Option<String>,

    /// Sets verbosity. -v0 is silent, -v5 is chatty
    #[clap(short = 'v', long = "verbosity", default_value_t = 2)]
    v: u8,
}

/// All user settable options that control program behavior
#[derive(Debug, Clone)]
pub struct HuffOpts {
    /// Compress/Decompress
    pub op_mode: Mode,
    /// Use the adjacent value difference model and RLE
    pub model: bool,
    /// Use adaptive block scanning
    pub adapt: bool,
    /// File to read for input
    pub input: PathBuf,
    /// File to write the result to
    pub output: PathBuf,
    /// Image width, set when compressing
    pub width: u64,
    /// Verbosity of user information, 0-5
    pub verbose: u8,
}

impl HuffOpts {
    /// Validate the parsed command line.
    pub fn from_args(args: Args) -> Result<Self> {
        let op_mode = if args.decompress {
            Mode::Decompress
        } else {
            Mode::Compress
        };
        let width = match (op_mode, &args.width) {
            (Mode::Compress, None) => {
                return Err(CodecError::InvalidArgument(
                    "For compression (parameter -c), the image width (parameter -w) must be set"
                        .to_string(),
                ))
            }
            (Mode::Compress, Some(w)) => parse_width(w)?,
            (Mode::Decompress, _) => 0,
        };
        Ok(Self {
            op_mode,
            model: args.model,
            adapt: args.adapt,
            input: args.input,
            output: args.output,
            width,
            verbose: args.v,
        })
    }
}

/// Parse the image width, decimal or 0x prefixed hex.
pub fn parse_width(value: &str) -> Result<u64> {
    let (digits, radix) = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (value, 10),
    };
    match u64::from_str_radix(digits, radix) {
        Ok(width) if width >= 1 => Ok(width),
        Err(e) if *e.kind() == std::num::IntErrorKind::PosOverflow => {
            Err(CodecError::InvalidArgument(format!(
                "Range error of the image width parameter -w: '{}' -- the image width is too large",
                value
            )))
        }
        _ => Err(CodecError::InvalidArgument(format!(
            "Invalid value of the image width parameter -w: '{}' -- a number greater than 0 is expected (width_value >= 1)",
            value
        ))),
    }
}

/// Parse the command line (clap prints usage and exits on -h), validate it and set the log level.
pub fn huffopts_init() -> Result<HuffOpts> {
    let opts = HuffOpts::from_args(Args::parse())?;

    // Set the log level
    match opts.verbose {
        0 => log::set_max_level(log::LevelFilter::Off),
        1 => log::set_max_level(log::LevelFilter::Error),
        2 => log::set_max_level(log::LevelFilter::Warn),
        3 => log::set_max_level(log::LevelFilter::Info),
        4 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    };

    info!("---- Initialization Start ----");
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    info!("Getting input from the file {}", opts.input.display());
    info!("Sending output to the file {}", opts.output.display());
    if opts.model {
        info!("Using the adjacent value difference model and RLE")
    };
    if opts.adapt {
        info!("Using adaptive block scanning")
    };
    if opts.op_mode == Mode::Compress {
        info!("Image width set to {}", opts.width)
    };
    info!("---- Initialization End ----\n");
    Ok(opts)
}

#[cfg(test)]
mod test {
    use super::{parse_width, Args, HuffOpts, Mode};
    use crate::error::CodecError;
    use clap::Parser;

    fn opts(args: &[&str]) -> Result<HuffOpts, CodecError> {
        HuffOpts::from_args(Args::try_parse_from(args).unwrap())
    }

    #[test]
    fn compress_args_test() {
        let o = opts(&["huff_codec", "-m", "-a", "-i", "in.raw", "-o", "out.huf", "-w", "512"]).unwrap();
        assert_eq!(o.op_mode, Mode::Compress);
        assert!(o.model && o.adapt);
        assert_eq!(o.width, 512);
        assert_eq!(o.input.to_str(), Some("in.raw"));
        assert_eq!(o.verbose, 2);
    }

    #[test]
    fn decompress_args_test() {
        let o = opts(&["huff_codec", "-d", "-i", "in.huf", "-o", "out.raw"]).unwrap();
        assert_eq!(o.op_mode, Mode::Decompress);
        assert!(!o.model && !o.adapt);
    }

    #[test]
    fn missing_width_test() {
        assert!(matches!(
            opts(&["huff_codec", "-c", "-i", "a", "-o", "b"]),
            Err(CodecError::InvalidArgument(_))
        ));
    }

    #[test]
    fn missing_files_test() {
        assert!(Args::try_parse_from(&["huff_codec", "-i", "a", "-w", "3"]).is_err());
        assert!(Args::try_parse_from(&["huff_codec", "-c", "-d", "-i", "a", "-o", "b"]).is_err());
    }

    #[test]
    fn width_test() {
        assert_eq!(parse_width("1").unwrap(), 1);
        assert_eq!(parse_width("0x10").unwrap(), 16);
        for bad in ["0", "", "-3", "12px", "99999999999999999999999"] {
            assert!(matches!(parse_width(bad), Err(CodecError::InvalidArgument(_))), "{}", bad);
        }
    }
}
