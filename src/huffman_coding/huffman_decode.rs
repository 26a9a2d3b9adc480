//! Decoding side of the canonical Huffman coder.
//!
//! The codebook is turned into the classic "first code of each length" tables. A code is read
//! one bit at a time; as long as the value read so far, shifted one level deeper, still reaches
//! the first code of that deeper level, the code is not complete yet.
//!
//! The end-of-block symbol is not in the codebook. It takes the code right after the last
//! transmitted code of the deepest length, so it is appended to the alphabet and the sentinel
//! one level below the deepest length is moved up by one code to make room for it.
//!

use log::trace;

use super::canonical::EOB;
use crate::bitstream::bitreader::BitReader;
use crate::error::{CodecError, Result};

/// Deepest code length whose codes (and the sentinel below them) fit into a u64.
pub const MAX_CODE_LEN: usize = 62;

#[derive(Debug, Default)]
pub struct HuffmanDecoder {
    /// First code of each length, index 0 being length 1, plus one sentinel level.
    first_code: Vec<u64>,
    /// Alphabet index of the first symbol of each length.
    first_symbol: Vec<usize>,
    /// Symbols ordered by code, EOB last.
    alphabet: Vec<u16>,
}

impl HuffmanDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a codebook from `br` and prepare the decoding tables.
    pub fn initialize_decoding(&mut self, br: &mut BitReader<'_>) -> Result<()> {
        trace!("Reading codebook at {}.", br.loc());
        let max_len = br.byte().ok_or(CodecError::InvalidCodebook)? as usize + 1;
        if max_len > MAX_CODE_LEN {
            return Err(CodecError::InvalidCodebook);
        }
        let counts = br.bytes(max_len).ok_or(CodecError::InvalidCodebook)?;

        self.first_code.clear();
        self.first_symbol.clear();
        let mut code = 0_u64;
        let mut symbols = 0_usize;
        for (level, &count) in counts.iter().enumerate() {
            self.first_code.push(code);
            self.first_symbol.push(symbols);
            code += count as u64;
            // Every level has room for 2^len codes; the deepest also has to fit EOB
            let used = if level + 1 == max_len { code + 1 } else { code };
            if used > 1 << (level + 1) {
                return Err(CodecError::InvalidCodebook);
            }
            code <<= 1;
            symbols += count as usize;
        }
        if symbols == 0 {
            return Err(CodecError::InvalidCodebook);
        }
        // Sentinel level, moved past the EOB code
        self.first_code.push(code + 2);

        let transmitted = br.bytes(symbols).ok_or(CodecError::InvalidCodebook)?;
        self.alphabet.clear();
        self.alphabet.extend(transmitted.iter().map(|&sym| sym as u16));
        self.alphabet.push(EOB);
        trace!(
            "Codebook of {} levels and {} symbols, data starts at {}.",
            max_len,
            symbols,
            br.loc()
        );
        Ok(())
    }

    /// Decode the next symbol from `br`. May return EOB.
    pub fn decode_symbol(&self, br: &mut BitReader<'_>) -> Result<u16> {
        let max_len = self.first_symbol.len();
        let mut code = 0_u64;
        let mut len = 0;
        loop {
            let bit = br.bit().ok_or(CodecError::TruncatedBitstream)?;
            code = code << 1 | bit as u64;
            len += 1;
            if code << 1 < self.first_code[len] {
                break;
            }
            if len == max_len {
                return Err(CodecError::InvalidCode);
            }
        }
        let idx = self.first_symbol[len - 1] + (code - self.first_code[len - 1]) as usize;
        Ok(self.alphabet[idx])
    }

    /// Decode symbols into `out` until EOB. With a `target`, decoding stops once `out` holds
    /// that many bytes, and the code that follows must then be EOB.
    pub fn decode_data(
        &self,
        br: &mut BitReader<'_>,
        out: &mut Vec<u8>,
        target: Option<usize>,
    ) -> Result<()> {
        loop {
            if let Some(target) = target {
                if out.len() >= target {
                    return match self.decode_symbol(br)? {
                        EOB => Ok(()),
                        _ => Err(CodecError::SizeMismatch {
                            expected: target as u64,
                            actual: target as u64 + 1,
                        }),
                    };
                }
            }
            match self.decode_symbol(br)? {
                EOB => return Ok(()),
                sym => out.push(sym as u8),
            }
        }
    }
}
