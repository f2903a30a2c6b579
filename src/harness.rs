use tracing::debug;
use tracing::info;
use tracing::trace;
use tracing::warn;

use crate::CellOffset;
use crate::clock::Clock;
use crate::controller::AnimationController;
use crate::controller::AnimationState;
use crate::controller::TicksPerFrame;
use crate::engine::Engine;
use crate::engine::EngineError;
use crate::events::ControlEvent;
use crate::events::Event;
use crate::events::PointerClick;
use crate::geometry::GridGeometry;
use crate::pattern::Pattern;
use crate::pattern::stamp;
use crate::renderer::GridRenderer;
use crate::renderer::Palette;
use crate::scheduler::FrameHandle;
use crate::scheduler::FrameQueue;
use crate::scheduler::Scheduler;
use crate::surface::Surface;
use crate::telemetry::FpsReport;
use crate::telemetry::FpsTelemetry;

/// What the host loop should do after an event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Ties an engine to a surface: redraws, pointer input, the animation loop and its telemetry.
///
/// Everything runs on the caller's thread. Each method finishes its work (including any redraw it
/// implies) before returning, so a click is always drawn before the next frame runs.
pub struct Harness<E, D, S, C> {
    engine: E,
    surface: D,
    renderer: GridRenderer,
    controller: AnimationController<S>,
    telemetry: FpsTelemetry<C>,
}

impl<E, D, S, C> Harness<E, D, S, C>
where
    E: Engine,
    D: Surface,
    S: Scheduler,
    C: Clock,
{
    /// A paused harness. Nothing is drawn until [`Self::start`] or [`Self::redraw`].
    pub fn new(
        engine: E,
        surface: D,
        cell_size: u32,
        palette: Palette,
        scheduler: S,
        clock: C,
        ticks_per_frame: TicksPerFrame,
    ) -> Self {
        let geometry = GridGeometry::new(engine.width(), engine.height(), cell_size);

        Self {
            engine,
            surface,
            renderer: GridRenderer::new(geometry, palette),
            controller: AnimationController::new(scheduler, ticks_per_frame),
            telemetry: FpsTelemetry::new(clock),
        }
    }

    /// Draw once and start animating
    pub fn start(&mut self) {
        self.redraw();
        self.play();
    }

    pub fn redraw(&mut self) {
        self.renderer.render(&mut self.surface, &self.engine);
    }

    /// Toggle the cell under the pointer, or stamp a pattern there if a modifier is held, then
    /// redraw.
    ///
    /// Engine errors come back as they are. The surface is redrawn either way, since the engine
    /// may have applied part of a stamp before failing.
    pub fn click(&mut self, click: PointerClick) -> Result<(), EngineError> {
        let rect = self.surface.bounding_rect();
        let (row, col) = self.renderer.geometry().pixel_to_cell(click.position, rect);
        let anchor = (row as CellOffset, col as CellOffset);

        let pattern = click.modifiers.pattern();
        debug!(row, col, %pattern, "Click");

        let res = match pattern {
            Pattern::Single => self.engine.toggle(anchor.0, anchor.1),
            pattern => stamp(&mut self.engine, anchor, pattern),
        };

        self.redraw();

        if let Err(e) = &res {
            warn!("Engine rejected {pattern} at ({row}, {col}): {e}");
        }

        res
    }

    /// Run a frame delivered by the scheduler: advance the engine, redraw, take a telemetry
    /// sample, and schedule the next frame. Returns `false` (having done nothing) for frames that
    /// are no longer current.
    pub fn on_frame(&mut self, handle: FrameHandle) -> bool {
        if !self.controller.accept_frame(handle) {
            return false;
        }

        for _ in 0..self.controller.ticks_per_frame().get() {
            self.engine.tick();
        }

        self.redraw();

        if let Some(report) = self.telemetry.sample() {
            trace!(latest = report.latest, mean = report.mean, "Frame");
        }

        self.controller.finish_frame(handle);

        true
    }

    pub fn play(&mut self) {
        if self.controller.play() {
            // time spent paused is not a frame
            self.telemetry.rewarm();
            info!("Playing");
        }
    }

    pub fn pause(&mut self) {
        if self.controller.pause() {
            info!("Paused");
        }
    }

    pub fn toggle_play(&mut self) {
        if self.controller.is_running() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Back to the initial configuration, running
    pub fn restart(&mut self) {
        self.engine.reset();
        self.controller.restart();
        self.telemetry.rewarm();
        info!("Restarted");
    }

    /// Kill every cell and pause
    pub fn clear(&mut self) {
        self.pause();
        self.engine.clear();
        self.redraw();
        info!("Cleared");
    }

    /// Update ticks per frame from the raw input text. Returns the new value, or `None` if the
    /// input was rejected.
    pub fn set_ticks_per_frame(&mut self, input: &str) -> Option<TicksPerFrame> {
        self.controller.set_ticks_per_frame_str(input)
    }

    pub fn adjust_ticks_per_frame(&mut self, delta: i64) -> TicksPerFrame {
        let current = self.controller.ticks_per_frame().get() as i64;
        let ticks = TicksPerFrame::new(current.saturating_add(delta));
        self.controller.set_ticks_per_frame(ticks);

        ticks
    }

    pub fn handle(&mut self, event: Event) -> Result<Flow, EngineError> {
        match event {
            Event::Pointer(click) => self.click(click)?,
            Event::Control(ControlEvent::PlayPause) => self.toggle_play(),
            Event::Control(ControlEvent::Restart) => self.restart(),
            Event::Control(ControlEvent::Clear) => self.clear(),
            Event::Control(ControlEvent::SetTicksPerFrame(input)) => {
                self.set_ticks_per_frame(&input);
            }
            Event::Control(ControlEvent::AdjustTicksPerFrame(delta)) => {
                self.adjust_ticks_per_frame(delta);
            }
            Event::Resize { .. } => self.redraw(),
            Event::Exit => return Ok(Flow::Exit),
        }

        Ok(Flow::Continue)
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }

    pub fn geometry(&self) -> &GridGeometry {
        self.renderer.geometry()
    }

    pub fn state(&self) -> AnimationState {
        self.controller.state()
    }

    pub fn is_running(&self) -> bool {
        self.controller.is_running()
    }

    /// Label for the play/pause control
    pub fn label(&self) -> &'static str {
        self.controller.label()
    }

    pub fn ticks_per_frame(&self) -> TicksPerFrame {
        self.controller.ticks_per_frame()
    }

    pub fn report(&self) -> Option<FpsReport> {
        self.telemetry.report()
    }

    pub fn telemetry(&self) -> &FpsTelemetry<C> {
        &self.telemetry
    }

    pub fn scheduler(&self) -> &S {
        self.controller.scheduler()
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        self.controller.scheduler_mut()
    }
}

impl<E, D, C> Harness<E, D, FrameQueue, C>
where
    E: Engine,
    D: Surface,
    C: Clock,
{
    /// Dispatch every frame that's currently due. Returns how many actually ran.
    pub fn run_due_frames(&mut self) -> usize {
        let mut ran = 0;

        for handle in self.scheduler_mut().take_due() {
            if self.on_frame(handle) {
                ran += 1;
            }
        }

        ran
    }
}
