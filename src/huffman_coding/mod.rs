//! The huffman module is the entropy coder of the codec.
//!
//! Each block gets its own canonical Huffman code, built from the frequencies of the bytes in
//! that block. The code lengths come from the classic unrestricted construction; the codes
//! themselves are derived from the lengths, so only a compact codebook has to be transmitted.
//!
//! A block ends with an end-of-block code that is never transmitted in the codebook: both sides
//! derive it from the one unused slot at the deepest code length.
//!
//! Encoding and decoding a block are inherently sequential.
//!

pub mod canonical;
pub mod huffman;
pub mod huffman_code_from_weights;
pub mod huffman_decode;
