use log::trace;

use super::canonical::{CodeTable, EOB};
use crate::bitstream::bitpacker::BitPacker;

/// Huffman encoder for one block at a time. The output buffer is kept between blocks so
/// repeated use does not reallocate.
pub struct HuffmanEncoder {
    table: Option<CodeTable>,
    bw: BitPacker,
}

impl HuffmanEncoder {
    pub fn new(size: usize) -> Self {
        Self {
            table: None,
            bw: BitPacker::new(size),
        }
    }

    /// Build the codes for `freqs` and write the codebook. Returns false when there is no
    /// symbol to code, in which case nothing is written.
    pub fn initialize_encoding(&mut self, freqs: &[u64]) -> bool {
        self.bw.output.clear();
        self.table = CodeTable::from_freqs(freqs);
        match &self.table {
            Some(table) => {
                trace!("Writing a codebook of {} bytes.", table.codebook_len());
                table.write_codebook(&mut self.bw);
                true
            }
            None => false,
        }
    }

    /// Put the code of `symbol` on the stream.
    pub fn encode_symbol(&mut self, symbol: u16) {
        if let Some(table) = &self.table {
            let code = table.code(symbol);
            debug_assert!(code.len > 0, "symbol {} has no code", symbol);
            self.bw.out_bits(code.len, code.value);
        }
    }

    /// Encode every byte of `data`.
    pub fn encode_data(&mut self, data: &[u8]) {
        data.iter().for_each(|&sym| self.encode_symbol(sym as u16));
    }

    /// Terminate the block with the end-of-block code.
    pub fn encode_end(&mut self) {
        trace!("EOB written at {}.", self.bw.loc());
        self.encode_symbol(EOB);
    }

    /// Pad to a byte boundary and hand out the encoded block.
    pub fn finalize_encoding(&mut self) -> &[u8] {
        self.bw.flush();
        &self.bw.output
    }
}

/// Huffman code a whole block: codebook, the codes of `data`, EOB and padding. Returns None if
/// `data` is empty.
#[cfg(test)]
pub(crate) fn huf_encode(data: &[u8], freqs: &[u64]) -> Option<Vec<u8>> {
    let mut encoder = HuffmanEncoder::new(data.len() / 2 + 32);
    if !encoder.initialize_encoding(freqs) {
        return None;
    }
    encoder.encode_data(data);
    encoder.encode_end();
    Some(encoder.finalize_encoding().to_vec())
}
