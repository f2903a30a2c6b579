use thiserror::Error;

use crate::GridSize;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BitBufferError {
    #[error("Expected {exp} bytes for a {width}x{height} grid, but got {got}")]
    Length {
        exp: usize,
        got: usize,
        width: GridSize,
        height: GridSize,
    },
}

/// Number of bytes needed to pack `cells` cells at one bit each.
pub const fn packed_len(cells: usize) -> usize {
    cells.div_ceil(8)
}

/// Read-only view over an engine's packed cell buffer.
///
/// # Layout
/// ```notrust
///  byte 0                      byte 1
///  7 6 5 4 3 2 1 0             15 14 13 12 11 10 9 8
///  ^ cell 7      ^ cell 0      ^ cell 15          ^ cell 8
/// ```
///
/// Cell `(row, col)` has linear index `row * width + col`, and index `i` lives at bit `i % 8` of
/// byte `i / 8`. A set bit means the cell is alive.
///
/// The view borrows the engine's memory, so it can only be held until the next mutation. Renderers
/// should ask the engine for a fresh view on every redraw.
#[derive(Clone, Copy, Debug)]
pub struct BitBuffer<'a> {
    bytes: &'a [u8],
    width: GridSize,
    height: GridSize,
}

impl<'a> BitBuffer<'a> {
    /// Wrap `bytes` as the cell buffer of a `width` x `height` grid. The slice must be exactly
    /// `ceil(width * height / 8)` bytes long.
    pub fn new(bytes: &'a [u8], width: GridSize, height: GridSize) -> Result<Self, BitBufferError> {
        let exp = packed_len(width as usize * height as usize);

        if bytes.len() != exp {
            return Err(BitBufferError::Length {
                exp,
                got: bytes.len(),
                width,
                height,
            });
        }

        Ok(Self {
            bytes,
            width,
            height,
        })
    }

    /// Like [`Self::new`], for engines that sized `bytes` with [`packed_len`] themselves. Panics
    /// on a length mismatch.
    pub fn from_packed(bytes: &'a [u8], width: GridSize, height: GridSize) -> Self {
        assert_eq!(
            bytes.len(),
            packed_len(width as usize * height as usize),
            "cell buffer does not match the grid"
        );

        Self {
            bytes,
            width,
            height,
        }
    }

    pub fn width(&self) -> GridSize {
        self.width
    }

    pub fn height(&self) -> GridSize {
        self.height
    }

    /// Total number of cells in the grid
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn index(&self, row: GridSize, col: GridSize) -> usize {
        row as usize * self.width as usize + col as usize
    }

    /// Whether cell `i` is alive. Panics if `i` is not a cell of the grid.
    pub fn is_alive(&self, i: usize) -> bool {
        assert!(i < self.len(), "cell index {i} is out of bounds");

        (self.bytes[i / 8] >> (i % 8)) & 1 == 1
    }

    pub fn is_alive_at(&self, row: GridSize, col: GridSize) -> bool {
        assert!(row < self.height, "row is out of bounds");
        assert!(col < self.width, "col is out of bounds");

        self.is_alive(self.index(row, col))
    }

    /// Iterate over every cell in linear order
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len()).map(|i| self.is_alive(i))
    }

    /// Number of live cells
    pub fn live_count(&self) -> usize {
        // padding bits past the last cell are never set by a well behaved engine, but don't
        // count on it
        let full = self.len() / 8;
        let whole: usize = self.bytes[..full]
            .iter()
            .map(|b| b.count_ones() as usize)
            .sum();

        whole + (full * 8..self.len()).filter(|&i| self.is_alive(i)).count()
    }
}
