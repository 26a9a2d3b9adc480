use log::{debug, info, warn};

use super::compress::{HEADER_LEN, ROW_MAJOR, TRANSPOSED};
use super::compress_block::decompress_block;
use super::tile::{tile_layout, Scratch};
use crate::bitstream::bitreader::BitReader;
use crate::error::{CodecError, Result};
use crate::huffman_coding::huffman_decode::HuffmanDecoder;
use crate::tools::cli::HuffOpts;
use crate::tools::file_io::{read_whole_file, write_whole_file};

/// A tile frame takes at least 5 bytes for at most 256 samples, so no valid stream holds more
/// samples per byte than this.
const MAX_EXPANSION: u64 = 128;

/// Decompress a stream written by compress_statically. An empty stream yields empty data.
pub fn decompress_statically(data: &[u8], use_model: bool) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Ok(vec![]);
    }
    let mut br = BitReader::new(data);
    let mut decoder = HuffmanDecoder::new();
    let out = decompress_block(&mut decoder, &mut br, use_model, None)?;
    if !br.is_empty() {
        warn!(
            "Ignoring {} bytes after the end of the coded block at byte {}.",
            br.remaining(),
            br.position()
        );
    }
    Ok(out)
}

/// Decompress a stream written by compress_adaptively.
pub fn decompress_adaptively(data: &[u8], use_model: bool) -> Result<Vec<u8>> {
    let mut br = BitReader::new(data);
    let header = br.bytes(HEADER_LEN).ok_or(CodecError::InvalidHeader)?;
    let mut field = [0_u8; 8];
    field.copy_from_slice(&header[..8]);
    let size = u64::from_le_bytes(field);
    field.copy_from_slice(&header[8..]);
    let width = u64::from_le_bytes(field);

    if width == 0 && size > 0 {
        return Err(CodecError::InvalidHeader);
    }
    // Refuse to allocate for sizes the stream cannot possibly hold
    let body = br.remaining() as u64;
    if size > body.saturating_mul(MAX_EXPANSION) {
        return Err(CodecError::SizeMismatch {
            expected: size,
            actual: body,
        });
    }
    let size = usize::try_from(size).map_err(|_| CodecError::InvalidHeader)?;
    let width = usize::try_from(width).unwrap_or(usize::MAX).max(1);
    info!("Decompressing {} bytes of width {}.", size, width);

    let mut image = vec![0_u8; size];
    let mut decoder = HuffmanDecoder::new();
    let mut scratch = Scratch::new();
    let mut decoded = 0_usize;
    for tile in tile_layout(size, width) {
        let transposed = match br.byte() {
            Some(ROW_MAJOR) => false,
            Some(TRANSPOSED) => true,
            Some(other) => return Err(CodecError::InvalidFrame(other)),
            None => {
                return Err(CodecError::SizeMismatch {
                    expected: size as u64,
                    actual: decoded as u64,
                })
            }
        };
        let samples = decompress_block(&mut decoder, &mut br, use_model, Some(tile.value_count))?;
        debug!(
            "Tile at ({}, {}): {} samples, transposed {}",
            tile.x, tile.y, tile.value_count, transposed
        );
        scratch.deserialize(&tile, transposed, &samples);
        scratch.store(&mut image, width, &tile);
        decoded += tile.value_count;
    }

    if !br.is_empty() {
        return Err(CodecError::SizeMismatch {
            expected: size as u64,
            actual: (decoded + br.remaining()) as u64,
        });
    }
    Ok(image)
}

/// Decompress the input file defined in opts <HuffOpts> into the output file.
pub fn decompress(opts: &HuffOpts) -> Result<()> {
    let data = read_whole_file(&opts.input)?;

    let out = if opts.adapt {
        decompress_adaptively(&data, opts.model)?
    } else {
        decompress_statically(&data, opts.model)?
    };

    write_whole_file(&opts.output, &out)?;
    info!("Decompressed {} bytes into {}.", data.len(), out.len());
    Ok(())
}
