//! Canonical code assignment and the transmitted codebook.
//!
//! Codes are handed out in ascending order of (length, symbol). Because of that, the code of
//! every symbol can be rebuilt from nothing but the number of symbols at each length plus the
//! symbols themselves, which is exactly what the codebook carries:
//!
//! `[max_len - 1] [count of length 1] .. [count of length max_len] [symbols by length, value]`
//!
//! The end-of-block symbol takes part in the length computation with a zero weight, so it lands
//! in the deepest level and, being the largest symbol, takes the last code there. It is left
//! out of the codebook; the decoder puts it back in the one free slot.
//!

use log::trace;

use super::huffman_code_from_weights::code_lengths;
use crate::bitstream::bitpacker::BitPacker;

/// Number of byte values in the alphabet.
pub const SYMBOL_COUNT: usize = 256;
/// Pseudo-symbol terminating a Huffman coded block.
pub const EOB: u16 = SYMBOL_COUNT as u16;

/// A code word: its length in bits and its value in the low bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Code {
    pub len: u32,
    pub value: u64,
}

/// The code of every symbol in use, plus the per-length symbol lists for the codebook.
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: Vec<Code>,
    by_length: Vec<Vec<u8>>,
}

impl CodeTable {
    /// Build the code table for a frequency table of the 256 byte values. Returns None when no
    /// symbol occurs, as there is nothing to code.
    pub fn from_freqs(freqs: &[u64]) -> Option<Self> {
        let mut used: Vec<u16> = freqs
            .iter()
            .enumerate()
            .filter(|(_, &f)| f > 0)
            .map(|(sym, _)| sym as u16)
            .collect();
        if used.is_empty() {
            return None;
        }
        let mut weights: Vec<u64> = used.iter().map(|&sym| freqs[sym as usize]).collect();
        used.push(EOB);
        weights.push(0);

        let mut lengths = code_lengths(&weights);

        // EOB has to own the last code of the deepest length
        let eob_idx = lengths.len() - 1;
        let deepest = lengths.iter().copied().max().unwrap_or(1);
        if lengths[eob_idx] < deepest {
            if let Some(idx) = lengths.iter().position(|&l| l == deepest) {
                lengths.swap(idx, eob_idx);
            }
        }

        let mut len_sym: Vec<(u32, u16)> = lengths.into_iter().zip(used).collect();
        len_sym.sort_unstable();

        let mut codes = vec![Code::default(); SYMBOL_COUNT + 1];
        let (mut prev_len, first_sym) = len_sym[0];
        let mut prev_code = 0_u64;
        codes[first_sym as usize] = Code {
            len: prev_len,
            value: prev_code,
        };
        for &(len, sym) in len_sym.iter().skip(1) {
            prev_code = (prev_code + 1) << (len - prev_len);
            prev_len = len;
            codes[sym as usize] = Code {
                len,
                value: prev_code,
            };
        }

        // Group everything but EOB (always the last entry) by length
        let mut by_length = vec![Vec::new(); prev_len as usize];
        for &(len, sym) in len_sym.iter().take(len_sym.len() - 1) {
            by_length[len as usize - 1].push(sym as u8);
        }

        Some(Self { codes, by_length })
    }

    /// The code assigned to `symbol` (a byte value or EOB).
    pub fn code(&self, symbol: u16) -> Code {
        self.codes[symbol as usize]
    }

    /// Length of the longest code.
    pub fn max_len(&self) -> usize {
        self.by_length.len()
    }

    /// Write the codebook: max length - 1, the symbol count for each length, then the symbols.
    pub fn write_codebook(&self, bw: &mut BitPacker) {
        trace!(
            "Codebook with {} levels written at {}.",
            self.max_len(),
            bw.loc()
        );
        bw.out8((self.max_len() - 1) as u8);
        for symbols in &self.by_length {
            bw.out8(symbols.len() as u8);
        }
        for symbols in &self.by_length {
            symbols.iter().for_each(|&sym| bw.out8(sym));
        }
    }

    /// Size of the codebook in bytes.
    pub fn codebook_len(&self) -> usize {
        1 + self.by_length.len() + self.by_length.iter().map(Vec::len).sum::<usize>()
    }
}
