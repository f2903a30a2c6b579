use crate::geometry::PointerPosition;
use crate::pattern::Pattern;

/// Modifier keys held during a click
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        meta: false,
        shift: false,
    };

    /// What a click with these modifiers stamps. Ctrl (or meta) wins over shift.
    pub fn pattern(&self) -> Pattern {
        if self.ctrl || self.meta {
            Pattern::Glider
        } else if self.shift {
            Pattern::Pulsar
        } else {
            Pattern::Single
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerClick {
    pub position: PointerPosition,
    pub modifiers: Modifiers,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Pointer(PointerClick),
    Control(ControlEvent),

    /// The host moved or resized the surface on screen
    Resize { cols: u16, rows: u16 },

    /// Exit the application
    Exit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlEvent {
    PlayPause,
    Restart,
    Clear,

    /// Raw contents of the ticks per frame input
    SetTicksPerFrame(String),

    /// Nudge ticks per frame up or down
    AdjustTicksPerFrame(i64),
}

#[cfg(test)]
mod test {
    use super::Modifiers;
    use crate::pattern::Pattern;

    #[test]
    fn modifier_patterns() {
        let m = |ctrl, meta, shift| Modifiers { ctrl, meta, shift };

        assert_eq!(Modifiers::NONE.pattern(), Pattern::Single);
        assert_eq!(m(true, false, false).pattern(), Pattern::Glider);
        assert_eq!(m(false, true, false).pattern(), Pattern::Glider);
        assert_eq!(m(false, false, true).pattern(), Pattern::Pulsar);
        assert_eq!(m(true, false, true).pattern(), Pattern::Glider);
    }
}
