//! Error type shared by every stage of the codec.

/// Failures raised while compressing or decompressing.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The transmitted codebook is truncated or describes an impossible code.
    #[error("Invalid codebook")]
    InvalidCodebook,

    /// The bitstream ended in the middle of a code.
    #[error("Truncated bitstream")]
    TruncatedBitstream,

    /// A bit pattern that is not part of the code was found.
    #[error("Invalid code in bitstream")]
    InvalidCode,

    /// The number of recovered samples differs from what the stream declares.
    #[error("Size mismatch: expected {expected} samples, got {actual}")]
    SizeMismatch { expected: u64, actual: u64 },

    /// The adaptive stream is shorter than its fixed header.
    #[error("Invalid stream header")]
    InvalidHeader,

    /// A frame flag byte holds a value other than 0 or 1.
    #[error("Invalid frame flag {0}")]
    InvalidFrame(u8),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Bad command line input.
    #[error("{0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, CodecError>;
