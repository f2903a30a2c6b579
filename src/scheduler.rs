use std::collections::VecDeque;
use std::fmt;

/// Identifies one scheduled frame callback. Handles are never reused, so an old handle can't be
/// mistaken for a newer schedule.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(u64);

impl fmt::Debug for FrameHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame#{}", self.0)
    }
}

/// Cooperative frame scheduling, in the style of `requestAnimationFrame`: a requested frame is
/// delivered back to the requester at some later point, one at a time, unless it's cancelled
/// first.
pub trait Scheduler {
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw a request. Cancelling a handle that already fired (or was already cancelled) does
    /// nothing.
    fn cancel(&mut self, handle: FrameHandle);
}

/// A deterministic scheduler. Requests queue up until the host loop calls [`Self::take_due`] and
/// dispatches them.
#[derive(Default)]
pub struct FrameQueue {
    next: u64,
    pending: VecDeque<FrameHandle>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every request made so far, oldest first. Frames requested while these are being
    /// handled wait for the next call.
    pub fn take_due(&mut self) -> Vec<FrameHandle> {
        self.pending.drain(..).collect()
    }

    /// Number of outstanding requests
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, handle: FrameHandle) -> bool {
        self.pending.contains(&handle)
    }
}

impl Scheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next);
        self.next += 1;
        self.pending.push_back(handle);

        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        self.pending.retain(|&h| h != handle);
    }
}
