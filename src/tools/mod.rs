//! The tools module provides the helper stages of the codec.
//!
//! The tools are:
//! - cli: Command line interface and option validation.
//! - file_io: Whole file reading and writing.
//! - freq_count: Byte frequency count, feeding the Huffman code construction.
//! - model: Adjacent value difference model.
//! - rle: Marker based run length coding, including the choice of the marker.
//!
pub mod cli;
pub mod file_io;
pub mod freq_count;
pub mod model;
pub mod rle;
