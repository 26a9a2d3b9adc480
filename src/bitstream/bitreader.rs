//! BitReader: reads a packed, most significant bit first bitstream from a byte slice.
//!
//! Frames in the compressed stream always start on a byte boundary, so besides single bits the
//! reader hands out whole bytes and can skip the zero padding at the end of a frame.
//!

/// Reads bits and bytes from a compressed buffer.
#[derive(Debug)]
pub struct BitReader<'a> {
    buffer: &'a [u8],
    cursor: usize,
    bit_index: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a new BitReader positioned at the first bit of `buffer`.
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            cursor: 0,
            bit_index: 0,
        }
    }

    /// Next bit (0 or 1), or None once the buffer is used up.
    pub fn bit(&mut self) -> Option<usize> {
        let byte = *self.buffer.get(self.cursor)?;
        let bit = (byte >> (7 - self.bit_index)) & 1;
        if self.bit_index == 7 {
            self.align();
        } else {
            self.bit_index += 1;
        }
        Some(bit as usize)
    }

    /// Returns the next byte, or None if there is no more data to read. The reader
    /// must be byte aligned.
    pub fn byte(&mut self) -> Option<u8> {
        debug_assert_eq!(self.bit_index, 0, "byte read from an unaligned position");
        let byte = *self.buffer.get(self.cursor)?;
        self.cursor += 1;
        Some(byte)
    }

    /// Returns the next n bytes, or None (consuming nothing) if fewer than n are left.
    pub fn bytes(&mut self, n: usize) -> Option<&'a [u8]> {
        debug_assert_eq!(self.bit_index, 0, "bytes read from an unaligned position");
        let end = self.cursor.checked_add(n)?;
        let slice = self.buffer.get(self.cursor..end)?;
        self.cursor = end;
        Some(slice)
    }

    /// Returns every byte left, consuming them. The reader must be byte aligned.
    pub fn rest(&mut self) -> &'a [u8] {
        debug_assert_eq!(self.bit_index, 0, "bytes read from an unaligned position");
        let slice = self.buffer.get(self.cursor..).unwrap_or(&[]);
        self.cursor = self.buffer.len();
        slice
    }

    /// Skip the padding bits of a partially read byte.
    pub fn align(&mut self) {
        if self.bit_index > 0 {
            self.bit_index = 0;
            self.cursor += 1;
        }
    }

    /// Index of the byte holding the next unread bit.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Number of whole bytes not yet touched.
    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.cursor)
    }

    /// True when every bit has been consumed.
    pub fn is_empty(&self) -> bool {
        self.cursor >= self.buffer.len()
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bit_index)
    }
}
