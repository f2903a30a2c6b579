use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Rules of Conway's Game of Life.
pub const B3S23: RuleSet = RuleSet::new(0b1000, 0b1100);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RuleSetError {
    #[error("Unexpected character '{0}' in rule string")]
    UnexpectedChar(char),

    #[error("Neighbour count {0} is out of range, expected 0 through 8")]
    OutOfRange(u32),

    #[error("Neighbour count {0} appears before 'B' or 'S'")]
    MissingSection(u32),
}

/// # Representation
/// Life rules are represented as
/// ```notrust
/// |------birth------|
/// 0000_0000_0000_0000_0000_0000_0000_0000
///                     |----survival-----|
/// ```
///
/// # Examples
/// ```notrust
/// b3s23:                0000_0000_0000_1000_0000_0000_0000_1100
///
/// b0s0:                 0000_0000_0000_0000_0000_0000_0000_0000
/// b012345678s012345678: 0000_0001_1111_1111_0000_0001_1111_1111
/// ```
///
/// See: https://conwaylife.com/wiki/Rulestring
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    rule: u32,
}

impl Default for RuleSet {
    fn default() -> Self {
        B3S23
    }
}

impl RuleSet {
    /// Create a new `RuleSet` for the given births and survivals. For both `b` and
    /// `s`, numbers are set on a bit basis. For instance if bit `i` in `b` is on, it
    /// means `i` is included in the set of births. Any bit past the 8th is ignored.
    pub const fn new(b: u16, s: u16) -> Self {
        let b = b & 0x1FF;
        let s = s & 0x1FF;

        Self {
            rule: (b as u32) << 16 | s as u32,
        }
    }

    pub fn births(&self) -> u16 {
        ((self.rule & 0x1FF0000) >> 0x10) as u16
    }

    pub fn survivals(&self) -> u16 {
        (self.rule & 0x1FF) as u16
    }

    /// State of a cell in the next generation given its current state and its number of live
    /// neighbours.
    pub fn next_state(&self, alive: bool, neighbours: u8) -> bool {
        if neighbours > 8 {
            return false;
        }

        let mask = 1 << neighbours;

        if alive {
            self.survivals() & mask == mask
        } else {
            self.births() & mask == mask
        }
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RuleSet({self})")
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = |set: u16| -> String {
            (0..=8)
                .filter(|n| set & (1 << n) != 0)
                .map(|n| char::from(b'0' + n as u8))
                .collect()
        };

        write!(f, "B{}/S{}", digits(self.births()), digits(self.survivals()))
    }
}

/// Parses rule strings like `B3/S23`, `b3s23` or `S23/B3`.
impl FromStr for RuleSet {
    type Err = RuleSetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        enum State {
            Start,
            Birth,
            Survival,
        }

        let mut state = State::Start;
        let (mut births, mut survivals) = (0u16, 0u16);

        for c in s.trim().chars() {
            match c {
                'b' | 'B' => {
                    state = State::Birth;
                }
                's' | 'S' => {
                    state = State::Survival;
                }
                '/' => {}
                c => {
                    let n = c.to_digit(10).ok_or(RuleSetError::UnexpectedChar(c))?;

                    if n > 8 {
                        return Err(RuleSetError::OutOfRange(n));
                    }

                    match state {
                        State::Start => return Err(RuleSetError::MissingSection(n)),
                        State::Birth => births |= 1 << n,
                        State::Survival => survivals |= 1 << n,
                    }
                }
            }
        }

        Ok(RuleSet::new(births, survivals))
    }
}

#[cfg(test)]
mod test {
    use super::B3S23;
    use super::RuleSet;
    use super::RuleSetError;

    #[test]
    fn conway() {
        for (alive, n, want) in [
            (false, 2, false),
            (false, 3, true),
            (true, 1, false),
            (true, 2, true),
            (true, 3, true),
            (true, 4, false),
        ] {
            assert_eq!(B3S23.next_state(alive, n), want, "alive={alive} n={n}");
        }
    }

    #[test]
    fn parse_forms() {
        for s in ["B3/S23", "b3s23", "S23/B3", " B3/S23 "] {
            assert_eq!(s.parse::<RuleSet>().unwrap(), B3S23, "{s}");
        }

        let highlife: RuleSet = "B36/S23".parse().unwrap();
        assert_eq!(highlife.births(), 0b100_1000);
    }

    #[test]
    fn parse_errors() {
        assert_eq!("B9/S23".parse::<RuleSet>(), Err(RuleSetError::OutOfRange(9)));
        assert_eq!("3/23".parse::<RuleSet>(), Err(RuleSetError::MissingSection(3)));
        assert_eq!(
            "B3-S23".parse::<RuleSet>(),
            Err(RuleSetError::UnexpectedChar('-'))
        );
    }

    #[test]
    fn display() {
        assert_eq!(B3S23.to_string(), "B3/S23");
        assert_eq!(RuleSet::new(0, 0).to_string(), "B/S");
    }
}
