//! Grid store and cell codec.
//!
//! The field is one contiguous byte buffer of `size × size` packed 6-byte
//! cell records, row-major. `store_cell` / `cell_at` are the only code in
//! the crate that touches the raw bytes; every other module works with the
//! unpacked [`Cell`] value.

use rand::Rng;

use crate::shared::{Cell, CELL_BYTES, INITIAL_WEED_CHANCE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldGrid {
    size: u8,
    bytes: Vec<u8>,
}

impl FieldGrid {
    /// An all-empty grid of `size × size` cells with coordinates written
    /// into every record so each one is self-describing.
    pub fn new(size: u8) -> Self {
        let mut grid = Self {
            size,
            bytes: vec![0; size as usize * size as usize * CELL_BYTES],
        };
        for row in 0..size {
            for col in 0..size {
                grid.store_cell(Cell::empty(row, col));
            }
        }
        grid
    }

    /// Rebuild a grid from a raw byte buffer (history apply, save load).
    /// Callers validate the length before getting here.
    pub fn from_bytes(size: u8, bytes: Vec<u8>) -> Self {
        debug_assert_eq!(bytes.len(), size as usize * size as usize * CELL_BYTES);
        Self { size, bytes }
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    /// Deep copy of the raw buffer for snapshot capture and encoding.
    pub fn clone_bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// Replace the buffer wholesale from a snapshot's copy.
    pub fn apply_bytes(&mut self, bytes: &[u8]) {
        debug_assert_eq!(bytes.len(), self.bytes.len());
        self.bytes.copy_from_slice(bytes);
    }

    fn offset(&self, row: u8, col: u8) -> usize {
        // Out-of-range coordinates are a programmer error: the avatar's
        // position is wrapped into range before any lookup.
        assert!(
            row < self.size && col < self.size,
            "cell ({row},{col}) outside {0}x{0} grid",
            self.size
        );
        (row as usize * self.size as usize + col as usize) * CELL_BYTES
    }

    /// Write one packed cell record at its own coordinates.
    pub fn store_cell(&mut self, cell: Cell) {
        let at = self.offset(cell.row, cell.col);
        self.bytes[at] = cell.plant;
        self.bytes[at + 1] = cell.row;
        self.bytes[at + 2] = cell.col;
        self.bytes[at + 3] = cell.water;
        self.bytes[at + 4] = cell.sun;
        self.bytes[at + 5] = cell.growth;
    }

    /// Read one cell record back as an unpacked value.
    pub fn cell_at(&self, row: u8, col: u8) -> Cell {
        let at = self.offset(row, col);
        Cell {
            plant: self.bytes[at],
            row: self.bytes[at + 1],
            col: self.bytes[at + 2],
            water: self.bytes[at + 3],
            sun: self.bytes[at + 4],
            growth: self.bytes[at + 5],
        }
    }

    /// Clear a cell back to empty soil. Water, sun, and growth are zeroed
    /// together with the plant id; an empty cell never carries levels.
    pub fn clear_cell(&mut self, row: u8, col: u8) {
        self.store_cell(Cell::empty(row, col));
    }

    /// Drop a weed onto a cell, wiping whatever was there.
    pub fn place_weed(&mut self, row: u8, col: u8, weed_id: u8) {
        self.store_cell(Cell {
            plant: weed_id,
            ..Cell::empty(row, col)
        });
    }

    /// Give every cell of a fresh grid a small chance of starting with a
    /// weed already on it.
    pub fn seed_weeds(&mut self, weed_id: u8, rng: &mut impl Rng) {
        for row in 0..self.size {
            for col in 0..self.size {
                if rng.gen::<f64>() < INITIAL_WEED_CHANCE {
                    self.place_weed(row, col, weed_id);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::GRID_SIZE;
    use rand::rngs::mock::StepRng;

    #[test]
    fn codec_round_trips_every_field() {
        let mut grid = FieldGrid::new(GRID_SIZE);
        // Field-wise byte extremes plus a mid-range value each.
        for &(plant, water, sun, growth) in
            &[(0u8, 0u8, 0u8, 0u8), (255, 255, 255, 255), (3, 17, 99, 5)]
        {
            let cell = Cell {
                plant,
                row: 4,
                col: 2,
                water,
                sun,
                growth,
            };
            grid.store_cell(cell);
            assert_eq!(grid.cell_at(4, 2), cell);
        }
    }

    #[test]
    fn records_are_row_major_and_independent() {
        let mut grid = FieldGrid::new(GRID_SIZE);
        grid.store_cell(Cell {
            plant: 1,
            row: 0,
            col: 6,
            water: 9,
            sun: 9,
            growth: 1,
        });
        grid.store_cell(Cell {
            plant: 2,
            row: 1,
            col: 0,
            water: 7,
            sun: 7,
            growth: 2,
        });
        // Adjacent records in the buffer must not bleed into each other.
        assert_eq!(grid.cell_at(0, 6).plant, 1);
        assert_eq!(grid.cell_at(1, 0).plant, 2);
        assert_eq!(grid.cell_at(0, 5), Cell::empty(0, 5));
        assert_eq!(grid.cell_at(1, 1), Cell::empty(1, 1));
    }

    #[test]
    fn fresh_cells_are_self_describing() {
        let grid = FieldGrid::new(GRID_SIZE);
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let cell = grid.cell_at(row, col);
                assert_eq!((cell.row, cell.col), (row, col));
                assert!(cell.is_empty());
            }
        }
    }

    #[test]
    fn clear_cell_zeroes_levels() {
        let mut grid = FieldGrid::new(GRID_SIZE);
        grid.store_cell(Cell {
            plant: 2,
            row: 3,
            col: 3,
            water: 40,
            sun: 12,
            growth: 5,
        });
        grid.clear_cell(3, 3);
        assert_eq!(grid.cell_at(3, 3), Cell::empty(3, 3));
    }

    #[test]
    fn clone_and_apply_bytes_are_deep() {
        let mut grid = FieldGrid::new(GRID_SIZE);
        let before = grid.clone_bytes();
        grid.store_cell(Cell {
            plant: 1,
            row: 0,
            col: 0,
            water: 1,
            sun: 1,
            growth: 1,
        });
        // The earlier clone must not observe the mutation.
        assert_ne!(before, grid.clone_bytes());
        grid.apply_bytes(&before);
        assert_eq!(grid.clone_bytes(), before);
    }

    #[test]
    fn seed_weeds_respects_the_roll() {
        // StepRng yielding 0.0 forever: every cell rolls under the 7%
        // threshold and sprouts a weed.
        let mut grid = FieldGrid::new(GRID_SIZE);
        grid.seed_weeds(7, &mut StepRng::new(0, 0));
        assert!((0..GRID_SIZE)
            .all(|row| (0..GRID_SIZE).all(|col| grid.cell_at(row, col).plant == 7)));

        // And a generator pinned at the top of the range never sprouts.
        let mut grid = FieldGrid::new(GRID_SIZE);
        grid.seed_weeds(7, &mut StepRng::new(u64::MAX, 0));
        assert!((0..GRID_SIZE)
            .all(|row| (0..GRID_SIZE).all(|col| grid.cell_at(row, col).is_empty())));
    }

    #[test]
    #[should_panic]
    fn out_of_range_lookup_panics() {
        let grid = FieldGrid::new(GRID_SIZE);
        let _ = grid.cell_at(GRID_SIZE, 0);
    }
}
