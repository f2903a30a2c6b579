use thiserror::Error;

use crate::CellOffset;
use crate::GridSize;
use crate::bit_buffer::BitBuffer;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Cell ({row}, {col}) is outside of the {width}x{height} grid")]
    OutOfRange {
        row: CellOffset,
        col: CellOffset,
        width: GridSize,
        height: GridSize,
    },
}

/// The simulation the harness drives. Everything about how generations are computed and stored
/// belongs to the engine; the harness only pokes at it through this trait.
pub trait Engine {
    fn width(&self) -> GridSize;

    fn height(&self) -> GridSize;

    /// Advance exactly one generation
    fn tick(&mut self);

    /// Flip the state of a single cell. What happens with coordinates outside of the grid is up
    /// to the engine.
    fn toggle(&mut self, row: CellOffset, col: CellOffset) -> Result<(), EngineError>;

    /// Toggle every listed cell, in order. Stops at the first error.
    fn draw(&mut self, cells: &[(CellOffset, CellOffset)]) -> Result<(), EngineError> {
        for &(row, col) in cells {
            self.toggle(row, col)?;
        }

        Ok(())
    }

    /// Current packed cell buffer. Only valid until the next mutation.
    fn cells(&self) -> BitBuffer<'_>;

    /// Kill every cell
    fn clear(&mut self);

    /// Restore the initial configuration
    fn reset(&mut self);
}
