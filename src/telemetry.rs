use std::collections::VecDeque;
use std::fmt;

use tracing::debug;

use crate::clock::Clock;

/// How many samples the statistics are computed over
pub const WINDOW: usize = 100;

/// Frame rate statistics over the current window
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FpsReport {
    pub latest: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl fmt::Display for FpsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Frames per Second:")?;
        writeln!(f, "         latest = {}", self.latest.round())?;
        writeln!(f, "avg of last {WINDOW} = {}", self.mean.round())?;
        writeln!(f, "min of last {WINDOW} = {}", self.min.round())?;
        write!(f, "max of last {WINDOW} = {}", self.max.round())
    }
}

/// Sliding window of instantaneous frame rates.
pub struct FpsTelemetry<C> {
    clock: C,

    /// Oldest sample at the front
    frames: VecDeque<f64>,

    /// Timestamp of the previous sample. `None` until the first (warm-up) sample.
    last: Option<f64>,

    report: Option<FpsReport>,
}

impl<C: Clock> FpsTelemetry<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            frames: VecDeque::with_capacity(WINDOW + 1),
            last: None,
            report: None,
        }
    }

    /// Record one rendered frame.
    ///
    /// Returns the refreshed statistics, or `None` if this frame produced no usable sample: the
    /// very first call only takes a reference timestamp, and a non-positive time delta is
    /// dropped instead of producing an infinite rate.
    pub fn sample(&mut self) -> Option<FpsReport> {
        let now = self.clock.now_ms();
        let last = self.last.replace(now)?;

        let delta = now - last;
        if delta <= 0.0 || !delta.is_finite() {
            debug!(delta, "Discarding frame sample");
            return None;
        }

        Some(self.record(1_000.0 / delta))
    }

    /// Push an instantaneous frame rate into the window
    pub fn record(&mut self, fps: f64) -> FpsReport {
        self.frames.push_back(fps);
        if self.frames.len() > WINDOW {
            self.frames.pop_front();
        }

        let (sum, min, max) = self.frames.iter().fold(
            (0.0, f64::INFINITY, f64::NEG_INFINITY),
            |(sum, min, max), &x| (sum + x, min.min(x), max.max(x)),
        );

        let report = FpsReport {
            latest: fps,
            mean: sum / self.frames.len() as f64,
            min,
            max,
        };
        self.report = Some(report);

        report
    }

    /// Latest statistics, if any sample has been taken
    pub fn report(&self) -> Option<FpsReport> {
        self.report
    }

    pub fn samples(&self) -> impl Iterator<Item = f64> + '_ {
        self.frames.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Forget the reference timestamp, so the next sample is a warm-up again. The window is
    /// kept.
    pub fn rewarm(&mut self) {
        self.last = None;
    }

    /// Drop every sample and the reference timestamp
    pub fn reset(&mut self) {
        self.frames.clear();
        self.last = None;
        self.report = None;
    }
}
