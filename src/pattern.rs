use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::CellOffset;
use crate::engine::Engine;
use crate::engine::EngineError;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown pattern \"{0}\"")]
pub struct UnknownPattern(String);

/// A group of cells toggled together, as `(row, col)` offsets from an anchor cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pattern {
    Single,
    Glider,
    Pulsar,
}

const SINGLE: [(CellOffset, CellOffset); 1] = [(0, 0)];

const GLIDER: [(CellOffset, CellOffset); 5] = [(0, 0), (1, 0), (0, 1), (-1, 1), (-1, -1)];

/// One arm of the pulsar, in the `(+, +)` quadrant
const PULSAR_ARM: [(CellOffset, CellOffset); 12] = [
    (1, 2),
    (1, 3),
    (1, 4),
    (2, 1),
    (3, 1),
    (4, 1),
    (6, 2),
    (6, 3),
    (6, 4),
    (2, 6),
    (3, 6),
    (4, 6),
];

/// Quadrant signs, in the order the arms are stamped:
/// upper left, upper right, lower left, lower right
const QUADRANTS: [(CellOffset, CellOffset); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

const PULSAR: [(CellOffset, CellOffset); 48] = {
    let mut out = [(0, 0); 48];

    let mut q = 0;
    while q < QUADRANTS.len() {
        let (sr, sc) = QUADRANTS[q];

        let mut i = 0;
        while i < PULSAR_ARM.len() {
            let (r, c) = PULSAR_ARM[i];
            out[q * PULSAR_ARM.len() + i] = (sr * r, sc * c);
            i += 1;
        }

        q += 1;
    }

    out
};

impl Pattern {
    pub const ALL: [Pattern; 3] = [Pattern::Single, Pattern::Glider, Pattern::Pulsar];

    /// Offsets relative to the anchor. Order matters, and offsets are not deduplicated: an offset
    /// listed twice would toggle its cell twice.
    pub fn offsets(self) -> &'static [(CellOffset, CellOffset)] {
        match self {
            Pattern::Single => &SINGLE,
            Pattern::Glider => &GLIDER,
            Pattern::Pulsar => &PULSAR,
        }
    }

    /// Absolute coordinates of the pattern anchored at `(row, col)`. Nothing is clamped, so cells
    /// can land outside of the grid.
    pub fn cells(
        self,
        (row, col): (CellOffset, CellOffset),
    ) -> impl Iterator<Item = (CellOffset, CellOffset)> {
        self.offsets()
            .iter()
            .map(move |&(dr, dc)| (row + dr, col + dc))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Pattern::Single => "single",
            Pattern::Glider => "glider",
            Pattern::Pulsar => "pulsar",
        };

        f.write_str(name)
    }
}

impl FromStr for Pattern {
    type Err = UnknownPattern;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::ALL
            .into_iter()
            .find(|p| p.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownPattern(s.to_string()))
    }
}

/// Toggle every cell of `pattern` anchored at `anchor`. The coordinates go to the engine as they
/// are, and whatever it says about them comes back unchanged.
pub fn stamp<E: Engine + ?Sized>(
    engine: &mut E,
    anchor: (CellOffset, CellOffset),
    pattern: Pattern,
) -> Result<(), EngineError> {
    let cells: Vec<_> = pattern.cells(anchor).collect();

    engine.draw(&cells)
}
