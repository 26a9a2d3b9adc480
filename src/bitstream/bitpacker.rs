//! BitPacker: the write side of the bitstream.
//!
//! Bits are collected in a 64 bit accumulator, most significant bit first, and moved to the
//! output vector a whole byte at a time. The accumulator never holds more than 7 pending bits
//! between calls.
//!

use log::error;

/// Packs variable length codes, most significant bit first, into a byte vector.
pub struct BitPacker {
    pub output: Vec<u8>,
    acc: u64,
    pending: u32,
}

impl BitPacker {
    /// Create a BitPacker whose output starts with room for `size` bytes. flush() must be
    /// called before the output is used.
    pub fn new(size: usize) -> Self {
        Self {
            output: Vec::with_capacity(size),
            acc: 0,
            pending: 0,
        }
    }

    /// Move every complete byte from the accumulator to the output.
    fn drain(&mut self) {
        while self.pending >= 8 {
            self.pending -= 8;
            self.output.push((self.acc >> self.pending) as u8);
        }
        self.acc &= (1 << self.pending) - 1;
    }

    /// Append a whole byte.
    pub fn out8(&mut self, data: u8) {
        self.out_bits(8, data as u64);
    }

    /// Append the `len` least significant bits of `code`, most significant bit first.
    /// Codes longer than 32 bits go in two pieces.
    pub fn out_bits(&mut self, len: u32, code: u64) {
        let mut left = len;
        while left > 0 {
            let take = left.min(32);
            left -= take;
            self.acc = (self.acc << take) | ((code >> left) & ((1_u64 << take) - 1));
            self.pending += take;
            self.drain();
        }
    }

    /// Pad the last partial byte with zero bits and write it out.
    pub fn flush(&mut self) {
        if self.pending > 0 {
            let pad = 8 - self.pending;
            self.out_bits(pad, 0);
        }
        if self.pending != 0 {
            error!("{} bits left behind after flushing the BitPacker.", self.pending);
        }
    }

    /// Debugging function. Report the bytes.bits written so far.
    pub fn loc(&self) -> String {
        let bits = self.output.len() * 8 + self.pending as usize;
        format!("[{}.{}]", bits / 8, bits % 8)
    }
}

#[cfg(test)]
mod test {
    use super::BitPacker;

    #[test]
    fn out8_test() {
        let mut bw = BitPacker::new(100);
        bw.out8(b'!');
        bw.out8(b' ');
        bw.flush();
        assert_eq!(bw.output, "! ".as_bytes());
    }

    #[test]
    fn out_bits_and_loc_test() {
        let mut bw = BitPacker::new(100);
        bw.out_bits(3, 0b101);
        assert_eq!("[0.3]", &bw.loc());
        bw.out_bits(7, 0b1100110);
        assert_eq!("[1.2]", &bw.loc());
        bw.flush();
        assert_eq!(bw.output, vec![0b1011_1001, 0b1000_0000]);
        assert_eq!("[2.0]", &bw.loc());
    }

    #[test]
    fn long_code_test() {
        let mut bw = BitPacker::new(100);
        bw.out_bits(1, 1);
        bw.out_bits(40, 0x80_0000_0001);
        bw.flush();
        // 1 + 1000_0000 ... 0001 -> 41 bits, padded to 48
        assert_eq!(bw.output, vec![0b1100_0000, 0, 0, 0, 0, 0b1000_0000]);
    }

    #[test]
    fn flush_empty_test() {
        let mut bw = BitPacker::new(4);
        bw.flush();
        assert!(bw.output.is_empty());
    }
}
