use std::fs::File;
use std::io;
use std::io::Write;
use std::sync::Mutex;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use crossterm::cursor;
use crossterm::event;
use crossterm::execute;
use crossterm::terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use lifeharness::clock::SystemClock;
use lifeharness::config::Args;
use lifeharness::config::Config;
use lifeharness::engine::Engine;
use lifeharness::events::Event;
use lifeharness::geometry::GridGeometry;
use lifeharness::harness::Flow;
use lifeharness::harness::Harness;
use lifeharness::io::convert_event;
use lifeharness::scheduler::FrameQueue;
use lifeharness::surface::PixelCanvas;
use lifeharness::terminal::TerminalView;
use lifeharness::universe::Universe;

type App = Harness<Universe, PixelCanvas, FrameQueue, SystemClock>;

/// Text rows above the canvas
const HEADER_ROWS: u16 = 1;

const KEYS: &str = "[space] play/pause  [r]estart  [c]lear  [+/-] speed  [q]uit";

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = args.config().context("Invalid configuration")?;

    let (writer, default_filter) = match &args.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Cannot create log file {}", path.display()))?;
            (BoxMakeWriter::new(Mutex::new(file)), "info")
        }
        // stderr is the terminal the grid is drawn on
        None => (BoxMakeWriter::new(io::stderr), "error"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_ansi(args.log_file.is_none())
        .with_writer(writer)
        .init();

    let mut stdout = io::stdout();

    terminal::enable_raw_mode()?;
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        event::EnableMouseCapture,
        cursor::Hide
    )?;

    let res = run(&config, args.paused, &mut stdout);

    // restore the terminal even if the loop failed
    execute!(
        stdout,
        cursor::Show,
        event::DisableMouseCapture,
        terminal::LeaveAlternateScreen
    )?;
    terminal::disable_raw_mode()?;

    res
}

fn run<W: Write>(config: &Config, paused: bool, out: &mut W) -> anyhow::Result<()> {
    let universe = Universe::new(config.width, config.height, config.rules, config.out_of_range);
    let geometry = GridGeometry::new(config.width, config.height, config.cell_size);
    let (cw, ch) = geometry.canvas_size();

    let mut view = TerminalView::new((cw, ch), HEADER_ROWS, terminal::size()?);
    let mut canvas = PixelCanvas::new(cw, ch);
    canvas.set_display_rect(view.display_rect());

    let mut app: App = Harness::new(
        universe,
        canvas,
        config.cell_size,
        config.palette,
        FrameQueue::new(),
        SystemClock::new(),
        config.ticks_per_frame,
    );

    if paused {
        app.redraw();
    } else {
        app.start();
    }

    info!(
        width = config.width,
        height = config.height,
        rules = %config.rules,
        "Starting"
    );

    let frame_time = config.frame_time();

    // last engine error, shown until the next event
    let mut notice = None;

    'main: loop {
        let t = Instant::now();

        // Poll events for as long as the frame lasts
        while let Some(left) = frame_time.checked_sub(t.elapsed()) {
            if !event::poll(left)? {
                break;
            }

            let Some(event) = convert_event(event::read()?, &view) else {
                continue;
            };

            if let Event::Resize { cols, rows } = event {
                view.resize(cols, rows);
                execute!(out, terminal::Clear(terminal::ClearType::All))?;
            }

            // the harness has already logged engine errors
            notice = match app.handle(event) {
                Ok(Flow::Exit) => break 'main,
                Ok(Flow::Continue) => None,
                Err(e) => Some(e.to_string()),
            };

            present(out, &view, &app, notice.as_deref())?;
        }

        app.run_due_frames();
        present(out, &view, &app, notice.as_deref())?;
    }

    Ok(())
}

fn present<W: Write>(
    out: &mut W,
    view: &TerminalView,
    app: &App,
    notice: Option<&str>,
) -> io::Result<()> {
    let header = format!(
        "{}  gen {}  ticks/frame {}  {}   {KEYS}",
        app.label(),
        app.engine().generation(),
        app.ticks_per_frame(),
        app.engine().rules(),
    );

    execute!(
        out,
        cursor::MoveTo(0, 0),
        terminal::Clear(terminal::ClearType::CurrentLine),
        crossterm::style::Print(header)
    )?;

    view.draw(out, app.surface())?;

    let live = app.engine().cells().live_count();
    let status = TerminalView::status_lines(app.report(), live, notice);
    view.draw_status(out, &status)?;

    out.flush()
}
