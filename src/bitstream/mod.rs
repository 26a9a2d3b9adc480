//! The bitstream module forms the bit level I/O subsystem of the codec.
//!
//! Every compressed block is assembled in memory. The BitPacker writes codebooks and Huffman
//! codes into a byte vector, and the BitReader walks a compressed buffer bit by bit during
//! decoding. Both are byte aligned at block boundaries and pad with zeros.
//!
pub mod bitpacker;
pub mod bitreader;
