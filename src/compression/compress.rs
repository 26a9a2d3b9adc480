use log::{debug, info};
use rayon::prelude::*;

use super::compress_block::compress_block;
use super::tile::{tile_layout, Scratch, Tile, TILE_SIZE};
use crate::error::{CodecError, Result};
use crate::huffman_coding::huffman::HuffmanEncoder;
use crate::tools::cli::HuffOpts;
use crate::tools::file_io::{read_whole_file, write_whole_file};

/// Size of the adaptive stream header: original size and image width, both u64 little endian.
pub const HEADER_LEN: usize = 16;
/// Orientation flag of a tile scanned row by row.
pub const ROW_MAJOR: u8 = 0;
/// Orientation flag of a tile scanned column by column.
pub const TRANSPOSED: u8 = 1;

/*
    Static mode treats the whole buffer as a single block. Adaptive mode cuts the buffer,
    seen as an image of the given width, into tiles of at most 16x16 samples and compresses
    every tile on its own, choosing the scan direction that codes smaller.

    The tiles do not depend on each other, so they are encoded in parallel and the frames are
    put back together in tile order.
*/

/// Compress `data` as one block: `[literal flag][payload]`.
pub fn compress_statically(data: &[u8], use_model: bool) -> Vec<u8> {
    let mut encoder = HuffmanEncoder::new(data.len() / 2 + 64);
    compress_block(&mut encoder, data, use_model)
}

/// Compress one tile: `[orientation][literal flag][payload]`.
fn compress_tile(
    encoder: &mut HuffmanEncoder,
    data: &[u8],
    width: usize,
    tile: &Tile,
    use_model: bool,
) -> Vec<u8> {
    let mut scratch = Scratch::new();
    scratch.load(data, width, tile);

    let mut orientation = ROW_MAJOR;
    let mut best = compress_block(encoder, &scratch.serialize(tile, false), use_model);

    // Without preprocessing both scans hold the same symbols, so only one is tried
    if use_model {
        let vertical = compress_block(encoder, &scratch.serialize(tile, true), use_model);
        if vertical.len() < best.len() {
            orientation = TRANSPOSED;
            best = vertical;
        }
    }
    debug!(
        "Tile at ({}, {}) {}x{}: {} samples into {} bytes, orientation {}",
        tile.x,
        tile.y,
        tile.width,
        tile.height,
        tile.value_count,
        best.len(),
        orientation
    );

    let mut frame = Vec::with_capacity(best.len() + 1);
    frame.push(orientation);
    frame.extend_from_slice(&best);
    frame
}

/// Compress `data`, an image `width` samples wide, tile by tile behind a 16 byte header.
pub fn compress_adaptively(data: &[u8], use_model: bool, width: u64) -> Result<Vec<u8>> {
    if width == 0 {
        return Err(CodecError::InvalidArgument(
            "The image width must be at least 1".to_string(),
        ));
    }
    let tile_width = usize::try_from(width).unwrap_or(usize::MAX);
    let tiles = tile_layout(data.len(), tile_width);
    info!(
        "Compressing {} bytes of width {} in {} tiles.",
        data.len(),
        width,
        tiles.len()
    );

    let frames: Vec<Vec<u8>> = tiles
        .par_iter()
        .map_init(
            || HuffmanEncoder::new(TILE_SIZE * TILE_SIZE),
            |encoder, tile| compress_tile(encoder, data, tile_width, tile, use_model),
        )
        .collect();

    let mut out =
        Vec::with_capacity(HEADER_LEN + frames.iter().map(Vec::len).sum::<usize>());
    out.extend_from_slice(&(data.len() as u64).to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    frames.iter().for_each(|frame| out.extend_from_slice(frame));
    Ok(out)
}

/// Compress the input file defined in opts <HuffOpts> into the output file.
pub fn compress(opts: &HuffOpts) -> Result<()> {
    let data = read_whole_file(&opts.input)?;

    let out = if opts.adapt {
        compress_adaptively(&data, opts.model, opts.width)?
    } else {
        compress_statically(&data, opts.model)
    };

    write_whole_file(&opts.output, &out)?;
    info!(
        "Compressed {} bytes into {} ({:.2}%).",
        data.len(),
        out.len(),
        if data.is_empty() {
            100.0
        } else {
            out.len() as f64 * 100.0 / data.len() as f64
        }
    );
    Ok(())
}
