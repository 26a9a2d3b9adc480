//! Lossless compression of raw image data with canonical Huffman coding.
//!
//! Version 0.1.0
//!
//! The input is treated as a flat buffer of 8 bit samples. It can be preprocessed with an
//! adjacent value difference model and run length encoding, and can be scanned adaptively in
//! 16x16 tiles given the image width.
//!
//! Basic usage to compress a file is as follows:
//!
//! `$> huff_codec -c -m -a -w 512 -i image.raw -o image.huf`
//!
//! and to restore it, with the same -m and -a flags:
//!
//! `$> huff_codec -d -m -a -i image.huf -o image.raw`
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;
