use std::fmt;
use std::num::NonZeroU32;

use tracing::debug;
use tracing::warn;

use crate::scheduler::FrameHandle;
use crate::scheduler::Scheduler;

/// Label of the play/pause control while the animation is running
pub const PAUSE_LABEL: &str = "⏸️";

/// Label of the play/pause control while the animation is paused
pub const PLAY_LABEL: &str = "▶️";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationState {
    Paused,

    /// Running, with exactly one frame scheduled
    Running { handle: FrameHandle },
}

/// Generations advanced per rendered frame. Always between 1 and [`TicksPerFrame::MAX`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TicksPerFrame(NonZeroU32);

impl TicksPerFrame {
    pub const ONE: TicksPerFrame = TicksPerFrame(NonZeroU32::MIN);

    /// Upper bound, so a single frame can't stall the host loop
    pub const MAX: TicksPerFrame = match NonZeroU32::new(1_000) {
        Some(n) => TicksPerFrame(n),
        None => TicksPerFrame(NonZeroU32::MIN),
    };

    /// Anything below 1 becomes 1, anything above [`Self::MAX`] becomes [`Self::MAX`]
    pub fn new(n: i64) -> Self {
        let n = n.clamp(1, Self::MAX.get() as i64) as u32;

        Self(NonZeroU32::new(n).unwrap_or(NonZeroU32::MIN))
    }

    /// Read a user supplied value. Numbers are clamped into range (fractions round down), and
    /// anything that isn't a number is rejected.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();

        if let Ok(n) = s.parse::<i64>() {
            return Some(Self::new(n));
        }

        // `as` saturates, so infinities land on the ends of the range
        match s.parse::<f64>() {
            Ok(x) if !x.is_nan() => Some(Self::new(x.floor() as i64)),
            _ => None,
        }
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for TicksPerFrame {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Debug for TicksPerFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TicksPerFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owns the play/pause state and the schedule of the next frame.
///
/// The scheduled handle lives inside [`AnimationState::Running`], so there's never more than one
/// frame in flight: every transition that schedules a frame first cancels the one it replaces.
pub struct AnimationController<S> {
    state: AnimationState,
    ticks_per_frame: TicksPerFrame,
    scheduler: S,
}

impl<S: Scheduler> AnimationController<S> {
    /// A paused controller
    pub fn new(scheduler: S, ticks_per_frame: TicksPerFrame) -> Self {
        Self {
            state: AnimationState::Paused,
            ticks_per_frame,
            scheduler,
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, AnimationState::Running { .. })
    }

    pub fn ticks_per_frame(&self) -> TicksPerFrame {
        self.ticks_per_frame
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Text for the play/pause control: what pressing it would do
    pub fn label(&self) -> &'static str {
        match self.state {
            AnimationState::Paused => PLAY_LABEL,
            AnimationState::Running { .. } => PAUSE_LABEL,
        }
    }

    /// Start running. Returns whether anything changed.
    pub fn play(&mut self) -> bool {
        if self.is_running() {
            return false;
        }

        let handle = self.scheduler.request_frame();
        self.state = AnimationState::Running { handle };
        debug!(?handle, "Playing");

        true
    }

    /// Stop running and withdraw the scheduled frame. Returns whether anything changed.
    pub fn pause(&mut self) -> bool {
        let AnimationState::Running { handle } = self.state else {
            return false;
        };

        self.scheduler.cancel(handle);
        self.state = AnimationState::Paused;
        debug!(?handle, "Paused");

        true
    }

    /// Pause when running, play when paused. Returns whether the controller is now running.
    pub fn toggle(&mut self) -> bool {
        if !self.pause() {
            self.play();
        }

        self.is_running()
    }

    /// Running from a fresh schedule, whatever the state was. A frame that was already scheduled
    /// is replaced, not doubled.
    pub fn restart(&mut self) {
        self.pause();
        self.play();
    }

    /// Check a frame delivered by the scheduler. Only the currently scheduled frame is accepted;
    /// frames that were cancelled (or superseded) after being dispatched come back `false` and
    /// must not do any work.
    pub fn accept_frame(&self, handle: FrameHandle) -> bool {
        let current = self.state == AnimationState::Running { handle };

        if !current {
            debug!(?handle, state = ?self.state, "Ignoring stale frame");
        }

        current
    }

    /// Schedule the frame after `handle`, once its work is done. Does nothing if `handle` is no
    /// longer the current frame.
    pub fn finish_frame(&mut self, handle: FrameHandle) {
        if self.state == (AnimationState::Running { handle }) {
            let handle = self.scheduler.request_frame();
            self.state = AnimationState::Running { handle };
        }
    }

    /// Takes effect from the next frame
    pub fn set_ticks_per_frame(&mut self, ticks: TicksPerFrame) {
        debug!(%ticks, "Ticks per frame");
        self.ticks_per_frame = ticks;
    }

    /// Update ticks per frame from user input. Input that isn't a number is rejected and leaves
    /// the current value in place.
    pub fn set_ticks_per_frame_str(&mut self, s: &str) -> Option<TicksPerFrame> {
        match TicksPerFrame::parse(s) {
            Some(ticks) => {
                self.set_ticks_per_frame(ticks);
                Some(ticks)
            }
            None => {
                warn!(input = s, "Rejecting ticks per frame");
                None
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::AnimationController;
    use super::AnimationState;
    use super::PAUSE_LABEL;
    use super::PLAY_LABEL;
    use super::TicksPerFrame;
    use crate::scheduler::FrameQueue;

    fn controller() -> AnimationController<FrameQueue> {
        AnimationController::new(FrameQueue::new(), TicksPerFrame::ONE)
    }

    #[test]
    fn starts_paused() {
        let c = controller();

        assert_eq!(c.state(), AnimationState::Paused);
        assert_eq!(c.label(), PLAY_LABEL);
        assert_eq!(c.scheduler().pending(), 0);
    }

    #[test]
    fn play_is_idempotent() {
        let mut c = controller();

        assert!(c.play());
        assert!(!c.play());

        assert_eq!(c.scheduler().pending(), 1);
        assert_eq!(c.label(), PAUSE_LABEL);
    }

    #[test]
    fn pause_cancels() {
        let mut c = controller();

        c.play();
        assert!(c.pause());
        assert!(!c.pause());

        assert_eq!(c.state(), AnimationState::Paused);
        assert_eq!(c.scheduler().pending(), 0);
    }

    #[test]
    fn restart_never_doubles() {
        let mut c = controller();

        c.restart();
        assert!(c.is_running());
        assert_eq!(c.scheduler().pending(), 1);

        c.restart();
        assert!(c.is_running());
        assert_eq!(c.scheduler().pending(), 1);
    }

    #[test]
    fn frame_reschedules() {
        let mut c = controller();
        c.play();

        let due = c.scheduler_mut().take_due();
        assert_eq!(due.len(), 1);

        assert!(c.accept_frame(due[0]));
        c.finish_frame(due[0]);

        assert_eq!(c.scheduler().pending(), 1);
        assert!(!c.accept_frame(due[0]), "a frame only runs once");
    }

    #[test]
    fn dispatched_then_paused_is_stale() {
        let mut c = controller();
        c.play();

        let due = c.scheduler_mut().take_due();
        c.pause();

        assert!(!c.accept_frame(due[0]));
        c.finish_frame(due[0]);
        assert_eq!(c.scheduler().pending(), 0);
    }

    #[test]
    fn dispatched_then_restarted_is_stale() {
        let mut c = controller();
        c.play();

        let old = c.scheduler_mut().take_due();
        c.restart();

        assert!(!c.accept_frame(old[0]));
        assert_eq!(c.scheduler().pending(), 1);
    }

    #[test]
    fn toggle() {
        let mut c = controller();

        assert!(c.toggle());
        assert!(!c.toggle());
        assert_eq!(c.scheduler().pending(), 0);
    }

    #[test]
    fn ticks_parse() {
        let cases = [
            ("3", Some(3)),
            (" 10 ", Some(10)),
            ("0", Some(1)),
            ("-4", Some(1)),
            ("2.7", Some(2)),
            ("0.5", Some(1)),
            ("99999999999", Some(1_000)),
            ("1e30", Some(1_000)),
            ("-inf", Some(1)),
            ("fast", None),
            ("", None),
            ("NaN", None),
        ];

        for (s, want) in cases {
            assert_eq!(TicksPerFrame::parse(s).map(TicksPerFrame::get), want, "{s:?}");
        }
    }

    #[test]
    fn rejected_ticks_keep_current() {
        let mut c = controller();

        c.set_ticks_per_frame(TicksPerFrame::new(4));
        assert_eq!(c.set_ticks_per_frame_str("lots"), None);
        assert_eq!(c.ticks_per_frame().get(), 4);

        assert_eq!(c.set_ticks_per_frame_str("-1").map(TicksPerFrame::get), Some(1));
        assert_eq!(c.ticks_per_frame(), TicksPerFrame::ONE);
    }
}
