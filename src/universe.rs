use std::fmt;

use tracing::trace;

use crate::CellOffset;
use crate::GridSize;
use crate::bit_buffer::BitBuffer;
use crate::bit_buffer::packed_len;
use crate::engine::Engine;
use crate::engine::EngineError;
use crate::rule_set::RuleSet;

/// What [`Universe::toggle`] does with a coordinate outside of the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutOfRangePolicy {
    /// Wrap around the edges, the same way neighbours are counted
    #[default]
    Wrap,

    /// Drop the toggle
    Ignore,

    /// Fail with [`EngineError::OutOfRange`]
    Reject,
}

/// A toroidal Life universe with packed cell storage.
///
/// This is the engine the terminal front end runs. Cells are stored one bit each, in exactly the
/// layout [`BitBuffer`] decodes.
pub struct Universe {
    width: GridSize,
    height: GridSize,

    /// Packed cell states, `ceil(width * height / 8)` bytes
    cells: Vec<u8>,

    /// Where the next generation is computed before being swapped in
    scratch: Vec<u8>,

    rules: RuleSet,
    policy: OutOfRangePolicy,

    /// Generations since the last reset
    generation: u64,
}

impl Universe {
    pub fn new(
        width: GridSize,
        height: GridSize,
        rules: RuleSet,
        policy: OutOfRangePolicy,
    ) -> Self {
        assert!(width > 0 && height > 0, "universe must have at least one cell");

        let n = packed_len(width as usize * height as usize);

        let mut universe = Self {
            width,
            height,
            cells: vec![0; n],
            scratch: vec![0; n],
            rules,
            policy,
            generation: 0,
        };
        universe.seed();

        universe
    }

    pub fn rules(&self) -> RuleSet {
        self.rules
    }

    pub fn policy(&self) -> OutOfRangePolicy {
        self.policy
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Set every listed cell alive
    pub fn set_cells(&mut self, cells: &[(GridSize, GridSize)]) {
        for &(row, col) in cells {
            let i = self.index(row, col);
            set_bit(&mut self.cells, i, true);
        }
    }

    /// Starting configuration: cell `i` is alive when `i` is a multiple of 2 or of 7.
    fn seed(&mut self) {
        self.cells.fill(0);

        for i in 0..self.len() {
            if i % 2 == 0 || i % 7 == 0 {
                set_bit(&mut self.cells, i, true);
            }
        }
    }

    fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    fn index(&self, row: GridSize, col: GridSize) -> usize {
        row as usize * self.width as usize + col as usize
    }

    fn live_neighbour_count(&self, row: GridSize, col: GridSize) -> u8 {
        let mut count = 0;

        for dr in [self.height - 1, 0, 1] {
            for dc in [self.width - 1, 0, 1] {
                if dr == 0 && dc == 0 {
                    continue;
                }

                let r = (row + dr) % self.height;
                let c = (col + dc) % self.width;

                count += get_bit(&self.cells, self.index(r, c)) as u8;
            }
        }

        count
    }

    /// Resolve a possibly out of range coordinate according to the policy. `None` means drop it.
    fn resolve(&self, row: CellOffset, col: CellOffset) -> Result<Option<usize>, EngineError> {
        let (h, w) = (self.height as CellOffset, self.width as CellOffset);

        if (0..h).contains(&row) && (0..w).contains(&col) {
            return Ok(Some(self.index(row as GridSize, col as GridSize)));
        }

        match self.policy {
            OutOfRangePolicy::Wrap => {
                let (r, c) = (row.rem_euclid(h), col.rem_euclid(w));
                Ok(Some(self.index(r as GridSize, c as GridSize)))
            }
            OutOfRangePolicy::Ignore => {
                trace!(row, col, "Dropping out of range toggle");
                Ok(None)
            }
            OutOfRangePolicy::Reject => Err(EngineError::OutOfRange {
                row,
                col,
                width: self.width,
                height: self.height,
            }),
        }
    }
}

impl Engine for Universe {
    fn width(&self) -> GridSize {
        self.width
    }

    fn height(&self) -> GridSize {
        self.height
    }

    fn tick(&mut self) {
        for row in 0..self.height {
            for col in 0..self.width {
                let i = self.index(row, col);
                let alive = get_bit(&self.cells, i);
                let n = self.live_neighbour_count(row, col);

                set_bit(&mut self.scratch, i, self.rules.next_state(alive, n));
            }
        }

        std::mem::swap(&mut self.cells, &mut self.scratch);
        self.generation += 1;
    }

    fn toggle(&mut self, row: CellOffset, col: CellOffset) -> Result<(), EngineError> {
        if let Some(i) = self.resolve(row, col)? {
            let alive = get_bit(&self.cells, i);
            set_bit(&mut self.cells, i, !alive);
        }

        Ok(())
    }

    fn draw(&mut self, cells: &[(CellOffset, CellOffset)]) -> Result<(), EngineError> {
        // under `Reject`, a stamp hanging off the edge leaves the grid untouched
        let resolved = cells
            .iter()
            .map(|&(row, col)| self.resolve(row, col))
            .collect::<Result<Vec<_>, _>>()?;

        for i in resolved.into_iter().flatten() {
            let alive = get_bit(&self.cells, i);
            set_bit(&mut self.cells, i, !alive);
        }

        Ok(())
    }

    fn cells(&self) -> BitBuffer<'_> {
        BitBuffer::from_packed(&self.cells, self.width, self.height)
    }

    fn clear(&mut self) {
        self.cells.fill(0);
    }

    fn reset(&mut self) {
        self.seed();
        self.generation = 0;
    }
}

impl fmt::Display for Universe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                let c = if get_bit(&self.cells, self.index(row, col)) {
                    '◼'
                } else {
                    '◻'
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

fn get_bit(bytes: &[u8], i: usize) -> bool {
    bytes[i / 8] & (1 << (i % 8)) != 0
}

fn set_bit(bytes: &mut [u8], i: usize, on: bool) {
    let mask = 1 << (i % 8);

    if on {
        bytes[i / 8] |= mask;
    } else {
        bytes[i / 8] &= !mask;
    }
}

#[cfg(test)]
mod test {
    use super::OutOfRangePolicy;
    use super::Universe;
    use crate::engine::Engine;
    use crate::engine::EngineError;
    use crate::rule_set::B3S23;

    fn empty(w: u32, h: u32, policy: OutOfRangePolicy) -> Universe {
        let mut u = Universe::new(w, h, B3S23, policy);
        u.clear();
        u
    }

    fn alive(u: &Universe) -> Vec<(u32, u32)> {
        let cells = u.cells();
        let mut out = Vec::new();
        for row in 0..u.height() {
            for col in 0..u.width() {
                if cells.is_alive_at(row, col) {
                    out.push((row, col));
                }
            }
        }
        out
    }

    #[test]
    fn initial_configuration() {
        let u = Universe::new(8, 2, B3S23, OutOfRangePolicy::Wrap);
        let cells = u.cells();

        for i in 0..16 {
            assert_eq!(cells.is_alive(i), i % 2 == 0 || i % 7 == 0, "cell {i}");
        }
    }

    #[test]
    fn blinker_oscillates() {
        let mut u = empty(5, 5, OutOfRangePolicy::Wrap);
        u.set_cells(&[(2, 1), (2, 2), (2, 3)]);

        u.tick();
        assert_eq!(alive(&u), [(1, 2), (2, 2), (3, 2)]);

        u.tick();
        assert_eq!(alive(&u), [(2, 1), (2, 2), (2, 3)]);
        assert_eq!(u.generation(), 2);
    }

    #[test]
    fn neighbours_wrap() {
        // a blinker straddling the left/right edge
        let mut u = empty(5, 5, OutOfRangePolicy::Wrap);
        u.set_cells(&[(2, 4), (2, 0), (2, 1)]);

        u.tick();
        assert_eq!(alive(&u), [(1, 0), (2, 0), (3, 0)]);
    }

    #[test]
    fn toggle_policies() {
        let mut wrap = empty(4, 4, OutOfRangePolicy::Wrap);
        wrap.toggle(-1, 5).unwrap();
        assert_eq!(alive(&wrap), [(3, 1)]);

        let mut ignore = empty(4, 4, OutOfRangePolicy::Ignore);
        ignore.toggle(-1, 5).unwrap();
        assert!(alive(&ignore).is_empty());

        let mut reject = empty(4, 4, OutOfRangePolicy::Reject);
        assert_eq!(
            reject.toggle(-1, 5),
            Err(EngineError::OutOfRange {
                row: -1,
                col: 5,
                width: 4,
                height: 4
            })
        );
    }

    #[test]
    fn rejected_draw_changes_nothing() {
        let mut u = empty(4, 4, OutOfRangePolicy::Reject);

        assert!(u.draw(&[(0, 0), (1, 1), (4, 0)]).is_err());
        assert!(alive(&u).is_empty());
    }

    #[test]
    fn draw_twice_is_a_no_op() {
        let mut u = empty(4, 4, OutOfRangePolicy::Wrap);

        u.draw(&[(1, 1), (1, 1)]).unwrap();
        assert!(alive(&u).is_empty());
    }

    #[test]
    fn reset_restores_seed() {
        let mut u = Universe::new(9, 9, B3S23, OutOfRangePolicy::Wrap);
        let seeded = u.cells().as_bytes().to_vec();

        u.tick();
        u.tick();
        u.reset();

        assert_eq!(u.cells().as_bytes(), seeded.as_slice());
        assert_eq!(u.generation(), 0);
    }

    #[test]
    fn display() {
        let mut u = empty(3, 2, OutOfRangePolicy::Wrap);
        u.set_cells(&[(0, 1), (1, 2)]);

        assert_eq!(u.to_string(), "◻◼◻\n◻◻◼\n");
    }
}
