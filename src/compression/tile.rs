//! Tile geometry for adaptive scanning.
//!
//! The image is cut into tiles of at most 16x16 samples, visited left to right and then top to
//! bottom. Tiles on the right and bottom edges are clipped, and because the buffer does not
//! have to be a whole number of rows, the last image row may be short. Within a tile the valid
//! samples are therefore always `height - 1` full rows followed by a last row of 1..=width
//! samples. Rows holding no sample at all are not part of the tile, and a tile without samples
//! does not exist.
//!
//! A tile is copied into a fixed 16x16 scratch square. Scanning it vertically is done by
//! transposing the whole square in place and reading it with width and height swapped. After
//! the transpose the first `value_count % height` rows (all of them if that is 0) keep the
//! full length and the remaining ones are one sample shorter.
//!

pub const TILE_SIZE: usize = 16;

/// Position and clipped size of a tile within the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
    /// Number of valid samples, at most width * height.
    pub value_count: usize,
}

impl Tile {
    /// Number of valid samples in row `r` of the tile, in image orientation.
    fn row_len(&self, r: usize) -> usize {
        if r + 1 < self.height {
            self.width
        } else {
            self.value_count - (self.height - 1) * self.width
        }
    }

    /// Row lengths of the serialized tile in the requested orientation.
    fn scan_rows(&self, transposed: bool) -> Vec<usize> {
        if transposed {
            let (width, height) = (self.height, self.width);
            let full_rows = match self.value_count % height {
                0 => height,
                n => n,
            };
            (0..height)
                .map(|r| if r < full_rows { width } else { width - 1 })
                .collect()
        } else {
            (0..self.height).map(|r| self.row_len(r)).collect()
        }
    }
}

/// All non-empty tiles of an image holding `size` samples in rows of `width`, in scan order.
/// `width` must be at least 1.
pub fn tile_layout(size: usize, width: usize) -> Vec<Tile> {
    if size == 0 {
        return vec![];
    }
    let height = size / width + usize::from(size % width != 0);
    let last_row_len = size - (height - 1) * width;
    // Only a single row image can be wider than the data
    let used_width = width.min(size);

    let mut tiles = Vec::with_capacity((height / TILE_SIZE + 1) * (used_width / TILE_SIZE + 1));
    for y in (0..height).step_by(TILE_SIZE) {
        for x in (0..used_width).step_by(TILE_SIZE) {
            let tile_width = TILE_SIZE.min(width - x);
            let mut tile_height = 0;
            let mut value_count = 0;
            for row in y..height.min(y + TILE_SIZE) {
                let row_len = if row + 1 == height { last_row_len } else { width };
                let valid = row_len.saturating_sub(x).min(tile_width);
                if valid == 0 {
                    break;
                }
                tile_height += 1;
                value_count += valid;
            }
            if value_count > 0 {
                tiles.push(Tile {
                    x,
                    y,
                    width: tile_width,
                    height: tile_height,
                    value_count,
                });
            }
        }
    }
    tiles
}

/// Fixed 16x16 work area a tile is materialized in.
#[derive(Debug, Clone)]
pub struct Scratch {
    cells: [[u8; TILE_SIZE]; TILE_SIZE],
}

impl Default for Scratch {
    fn default() -> Self {
        Self::new()
    }
}

impl Scratch {
    pub fn new() -> Self {
        Self {
            cells: [[0; TILE_SIZE]; TILE_SIZE],
        }
    }

    /// Copy the valid samples of `tile` out of `image`.
    pub fn load(&mut self, image: &[u8], image_width: usize, tile: &Tile) {
        for r in 0..tile.height {
            let len = tile.row_len(r);
            let start = (tile.y + r) * image_width + tile.x;
            self.cells[r][..len].copy_from_slice(&image[start..start + len]);
        }
    }

    /// Copy the valid samples of `tile` back into `image`.
    pub fn store(&self, image: &mut [u8], image_width: usize, tile: &Tile) {
        for r in 0..tile.height {
            let len = tile.row_len(r);
            let start = (tile.y + r) * image_width + tile.x;
            image[start..start + len].copy_from_slice(&self.cells[r][..len]);
        }
    }

    /// Swap the whole square across its main diagonal.
    pub fn transpose(&mut self) {
        for r in 0..TILE_SIZE {
            for c in r + 1..TILE_SIZE {
                let tmp = self.cells[r][c];
                self.cells[r][c] = self.cells[c][r];
                self.cells[c][r] = tmp;
            }
        }
    }

    /// Linearize the loaded tile row by row, or column by column when `transposed` (which
    /// leaves the square transposed).
    pub fn serialize(&mut self, tile: &Tile, transposed: bool) -> Vec<u8> {
        if transposed {
            self.transpose();
        }
        let mut out = Vec::with_capacity(tile.value_count);
        for (r, len) in tile.scan_rows(transposed).into_iter().enumerate() {
            out.extend_from_slice(&self.cells[r][..len]);
        }
        out
    }

    /// Inverse of serialize: lay `samples` out in image orientation.
    pub fn deserialize(&mut self, tile: &Tile, transposed: bool, samples: &[u8]) {
        debug_assert_eq!(samples.len(), tile.value_count);
        let mut offset = 0;
        for (r, len) in tile.scan_rows(transposed).into_iter().enumerate() {
            self.cells[r][..len].copy_from_slice(&samples[offset..offset + len]);
            offset += len;
        }
        if transposed {
            self.transpose();
        }
    }
}

#[cfg(test)]
mod test {
    use super::{tile_layout, Scratch, Tile};

    #[test]
    fn layout_exact_test() {
        let tiles = tile_layout(32 * 20, 32);
        assert_eq!(tiles.len(), 4);
        assert_eq!(
            tiles[1],
            Tile { x: 16, y: 0, width: 16, height: 16, value_count: 256 }
        );
        assert_eq!(
            tiles[3],
            Tile { x: 16, y: 16, width: 16, height: 4, value_count: 64 }
        );
        assert_eq!(tiles.iter().map(|t| t.value_count).sum::<usize>(), 640);
    }

    #[test]
    fn layout_partial_row_test() {
        // 17 samples, width 5: rows of 5, 5, 5 and 2
        let tiles = tile_layout(17, 5);
        assert_eq!(
            tiles,
            vec![Tile { x: 0, y: 0, width: 5, height: 4, value_count: 17 }]
        );

        // width 20, 35 samples: the short last row only reaches into the first tile
        let tiles = tile_layout(35, 20);
        assert_eq!(
            tiles,
            vec![
                Tile { x: 0, y: 0, width: 16, height: 2, value_count: 31 },
                Tile { x: 16, y: 0, width: 4, height: 1, value_count: 4 },
            ]
        );
    }

    #[test]
    fn layout_wide_test() {
        // a single row much wider than the data
        let tiles = tile_layout(20, 1 << 40);
        assert_eq!(tiles.len(), 2);
        assert_eq!(tiles[1], Tile { x: 16, y: 0, width: 16, height: 1, value_count: 4 });
        assert!(tile_layout(0, 7).is_empty());
    }

    #[test]
    fn edge_tile_serialize_test() {
        // 3x2 tile missing its last sample
        let tile = Tile { x: 0, y: 0, width: 3, height: 2, value_count: 5 };
        let image = [1, 2, 3, 4, 5];
        let mut scratch = Scratch::new();
        scratch.load(&image, 3, &tile);
        assert_eq!(scratch.serialize(&tile, false), vec![1, 2, 3, 4, 5]);

        let mut scratch = Scratch::new();
        scratch.load(&image, 3, &tile);
        let columns = scratch.serialize(&tile, true);
        assert_eq!(columns, vec![1, 4, 2, 5, 3]);

        for (transposed, samples) in [(false, vec![1, 2, 3, 4, 5]), (true, columns)] {
            let mut scratch = Scratch::new();
            scratch.deserialize(&tile, transposed, &samples);
            let mut restored = [0; 5];
            scratch.store(&mut restored, 3, &tile);
            assert_eq!(restored, image);
        }
    }

    #[test]
    fn all_tiles_round_trip_test() {
        for (size, width) in [(17, 5), (300, 17), (1000, 33), (255, 1), (40, 64), (16 * 16 * 4, 32)] {
            let image: Vec<u8> = (0..size).map(|i| (i * 31 % 251) as u8).collect();
            for transposed in [false, true] {
                let mut restored = vec![0; size];
                for tile in tile_layout(size, width) {
                    let mut scratch = Scratch::new();
                    scratch.load(&image, width, &tile);
                    let samples = scratch.serialize(&tile, transposed);
                    assert_eq!(samples.len(), tile.value_count);
                    let mut scratch = Scratch::new();
                    scratch.deserialize(&tile, transposed, &samples);
                    scratch.store(&mut restored, width, &tile);
                }
                assert_eq!(restored, image, "size {} width {}", size, width);
            }
        }
    }
}
