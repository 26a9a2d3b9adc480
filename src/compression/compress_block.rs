use log::{debug, trace};

use crate::bitstream::bitreader::BitReader;
use crate::error::{CodecError, Result};
use crate::huffman_coding::huffman::HuffmanEncoder;
use crate::huffman_coding::huffman_decode::HuffmanDecoder;
use crate::tools::freq_count::freqs;
use crate::tools::model::{decode_adj_val_diff, encode_adj_val_diff};
use crate::tools::rle::{get_optimal_marker, rle_decode, rle_encode};

/// Literal flag of a Huffman coded block.
pub const COMPRESSED: u8 = 1;
/// Literal flag of a block stored as raw bytes.
pub const UNCOMPRESSED: u8 = 0;

/// Compress one block into `[literal flag][payload]`.
///
/// With `use_model` the data goes through the adjacent value difference model and RLE first,
/// and the payload is `[marker][codebook][bitstream]`; otherwise it is `[codebook][bitstream]`.
/// The marker byte is chosen per block by get_optimal_marker instead of being a fixed constant,
/// so model streams carry it ahead of the plain `[codebook][bitstream]` layout.
/// If that is not smaller than the data plus one byte, the raw data is stored instead, so a
/// block never grows by more than its flag byte.
pub fn compress_block(encoder: &mut HuffmanEncoder, data: &[u8], use_model: bool) -> Vec<u8> {
    let mut frame = Vec::with_capacity(data.len() + 1);
    frame.push(COMPRESSED);

    let rle;
    let symbols: &[u8] = if use_model {
        let diffs = encode_adj_val_diff(data);
        let marker = get_optimal_marker(&diffs);
        rle = rle_encode(&diffs, marker);
        frame.push(marker);
        &rle
    } else {
        data
    };

    let coded = encoder.initialize_encoding(&freqs(symbols));
    if coded {
        encoder.encode_data(symbols);
        encoder.encode_end();
        frame.extend_from_slice(encoder.finalize_encoding());
    }

    if !coded || frame.len() >= data.len() + 1 {
        debug!(
            "Storing {} bytes as a literal block (coded size {}).",
            data.len(),
            frame.len()
        );
        frame.clear();
        frame.push(UNCOMPRESSED);
        frame.extend_from_slice(data);
    } else {
        trace!("Coded {} bytes into {}.", data.len(), frame.len());
    }
    frame
}

/// Decode one block written by compress_block, starting at the literal flag.
///
/// `expected` is the number of bytes the block must produce. Without it a literal block takes
/// everything left in `br`. After a Huffman coded block `br` is left on the next byte boundary.
pub fn decompress_block(
    decoder: &mut HuffmanDecoder,
    br: &mut BitReader<'_>,
    use_model: bool,
    expected: Option<usize>,
) -> Result<Vec<u8>> {
    let flag = br.byte().ok_or(CodecError::TruncatedBitstream)?;
    match flag {
        UNCOMPRESSED => {
            let raw = match expected {
                Some(n) => br.bytes(n).ok_or(CodecError::SizeMismatch {
                    expected: n as u64,
                    actual: br.remaining() as u64,
                })?,
                None => br.rest(),
            };
            Ok(raw.to_vec())
        }
        COMPRESSED => {
            let marker = match use_model {
                true => Some(br.byte().ok_or(CodecError::TruncatedBitstream)?),
                false => None,
            };
            decoder.initialize_decoding(br)?;

            let mut out = Vec::with_capacity(expected.unwrap_or(br.remaining() * 2));
            // The RLE stream length is unknown, so only raw data is bounded by the target
            let target = if use_model { None } else { expected };
            decoder.decode_data(br, &mut out, target)?;
            br.align();

            if let Some(marker) = marker {
                out = decode_adj_val_diff(&rle_decode(&out, marker));
            }
            match expected {
                Some(n) if out.len() != n => Err(CodecError::SizeMismatch {
                    expected: n as u64,
                    actual: out.len() as u64,
                }),
                _ => Ok(out),
            }
        }
        other => Err(CodecError::InvalidFrame(other)),
    }
}

#[cfg(test)]
mod test {
    use super::{compress_block, decompress_block, COMPRESSED, UNCOMPRESSED};
    use crate::bitstream::bitreader::BitReader;
    use crate::error::CodecError;
    use crate::huffman_coding::huffman::HuffmanEncoder;
    use crate::huffman_coding::huffman_decode::HuffmanDecoder;
    use crate::tools::model::encode_adj_val_diff;
    use crate::tools::rle::get_optimal_marker;

    fn round_trip(data: &[u8], use_model: bool) -> Vec<u8> {
        let mut encoder = HuffmanEncoder::new(64);
        let frame = compress_block(&mut encoder, data, use_model);
        assert!(frame.len() <= data.len() + 1);
        let mut decoder = HuffmanDecoder::new();
        let mut br = BitReader::new(&frame);
        let out = decompress_block(&mut decoder, &mut br, use_model, Some(data.len())).unwrap();
        assert!(br.is_empty());
        out
    }

    #[test]
    fn coded_block_test() {
        let data = b"aaaaaaaaaabcccccccccccccccddddddd";
        let mut encoder = HuffmanEncoder::new(64);
        let frame = compress_block(&mut encoder, data, false);
        assert_eq!(frame[0], COMPRESSED);
        assert_eq!(round_trip(data, false), data.to_vec());
    }

    #[test]
    fn model_block_test() {
        let ramp: Vec<u8> = (0..300_u32).map(|i| (i / 4) as u8).collect();
        let mut encoder = HuffmanEncoder::new(64);
        let frame = compress_block(&mut encoder, &ramp, true);
        assert_eq!(frame[0], COMPRESSED);
        assert!(frame.len() < ramp.len() / 2);
        assert_eq!(round_trip(&ramp, true), ramp);
    }

    #[test]
    fn literal_block_test() {
        let data: Vec<u8> = (0..=255).collect();
        let mut encoder = HuffmanEncoder::new(64);
        let frame = compress_block(&mut encoder, &data, false);
        assert_eq!(frame[0], UNCOMPRESSED);
        assert_eq!(frame.len(), 257);
        assert_eq!(round_trip(&data, false), data);
        assert_eq!(round_trip(&data, true), data);
    }

    #[test]
    fn empty_block_test() {
        let mut encoder = HuffmanEncoder::new(64);
        assert_eq!(compress_block(&mut encoder, &[], false), vec![UNCOMPRESSED]);
        assert_eq!(compress_block(&mut encoder, &[], true), vec![UNCOMPRESSED]);
    }

    #[test]
    fn bad_flag_test() {
        let mut decoder = HuffmanDecoder::new();
        let mut br = BitReader::new(&[7, 1, 2]);
        assert!(matches!(
            decompress_block(&mut decoder, &mut br, false, None),
            Err(CodecError::InvalidFrame(7))
        ));
    }

    #[test]
    fn short_literal_test() {
        let mut decoder = HuffmanDecoder::new();
        let mut br = BitReader::new(&[UNCOMPRESSED, 1, 2]);
        assert!(matches!(
            decompress_block(&mut decoder, &mut br, false, Some(3)),
            Err(CodecError::SizeMismatch { expected: 3, actual: 2 })
        ));
    }

    #[test]
    fn marker_in_frame_test() {
        let ramp: Vec<u8> = (0..300_u32).map(|i| (i / 4) as u8 + 100).collect();
        let mut encoder = HuffmanEncoder::new(64);
        let frame = compress_block(&mut encoder, &ramp, true);
        assert_eq!(frame[0], COMPRESSED);
        assert_eq!(frame[1], get_optimal_marker(&encode_adj_val_diff(&ramp)));

        // without the model the codebook follows the flag directly
        let plain = compress_block(&mut encoder, b"aaaaaaaaaabcccccccccccccccddddddd", false);
        assert_eq!(&plain[..3], &[COMPRESSED, 3, 1]);
    }
}
