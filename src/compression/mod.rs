//! The compression module ties the coder together.
//!
//! Every block goes through these steps:
//! - Optionally, the adjacent value difference model: each byte is replaced by its difference to
//!   the previous byte.
//! - Optionally (always together with the model), run length encoding with an escape marker
//!   chosen to collide with as few single bytes as possible.
//! - Canonical Huffman coding with a transmitted codebook and an end of block symbol.
//! - If coding does not make the block smaller, the raw bytes are stored instead.
//!
//! Static mode codes the whole input as one block. Adaptive mode splits the input, seen as an
//! image, into 16x16 tiles and codes each tile in the scan direction that comes out smaller.
//! Tiles are compressed in parallel; decompression is single threaded.
//!

pub mod compress;
pub mod compress_block;
pub mod decompress;
pub mod tile;
