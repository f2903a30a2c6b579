use std::io;
use std::io::Write;

use crossterm::cursor;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;

use crate::Pixel;
use crate::geometry::BoundingRect;
use crate::geometry::PointerPosition;
use crate::surface::Color;
use crate::surface::PixelCanvas;
use crate::surface::Surface;
use crate::telemetry::FpsReport;

/// Text rows below the canvas: the frame rate report, then a notice line
pub const STATUS_ROWS: usize = 6;

/// Upper half block. The foreground paints the top pixel and the background the bottom one.
const HALF_BLOCK: char = '▀';

/// Shows a [`PixelCanvas`] in the terminal.
///
/// Every text cell covers one pixel column and two pixel rows:
/// ```notrust
///   column c, row r  <->  pixels (c, 2r) on top, (c, 2r + 1) below
/// ```
/// so the canvas is displayed at a different aspect than its internal resolution, and pointer
/// positions (reported in text cells) need scaling back, which is what [`Self::display_rect`] is
/// for.
pub struct TerminalView {
    /// Text row the canvas starts at
    top: u16,

    canvas: (Pixel, Pixel),

    /// Size of the terminal, in text cells
    term: (u16, u16),
}

impl TerminalView {
    pub fn new(canvas: (Pixel, Pixel), top: u16, term: (u16, u16)) -> Self {
        Self { top, canvas, term }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.term = (cols, rows);
    }

    /// Text rows taken by the canvas
    pub fn rows(&self) -> u16 {
        self.canvas.1.div_ceil(2).min(u16::MAX as Pixel) as u16
    }

    /// First text row below the canvas
    pub fn bottom(&self) -> u16 {
        self.top.saturating_add(self.rows())
    }

    /// Where the canvas sits, in text cells
    pub fn display_rect(&self) -> BoundingRect {
        BoundingRect {
            left: 0.0,
            top: self.top as f64,
            width: self.canvas.0 as f64,
            height: self.rows() as f64,
        }
    }

    /// Pointer position of a click on a text cell. Clicks are taken to land in the middle of the
    /// cell.
    pub fn pointer_at(&self, column: u16, row: u16) -> PointerPosition {
        PointerPosition {
            x: column as f64 + 0.5,
            y: row as f64 + 0.5,
        }
    }

    /// Pair up pixel rows into half block cells: `(top, bottom)` colors, where the bottom is
    /// missing on the last row of an odd height canvas.
    pub fn half_blocks(canvas: &PixelCanvas) -> Vec<Vec<(Color, Option<Color>)>> {
        let rows: Vec<_> = canvas.rows().collect();

        rows.chunks(2)
            .map(|pair| match pair {
                [top, bottom] => top
                    .iter()
                    .zip(bottom.iter())
                    .map(|(&t, &b)| (t, Some(b)))
                    .collect(),
                [top] => top.iter().map(|&t| (t, None)).collect(),
                _ => unreachable!(),
            })
            .collect()
    }

    /// Draw the canvas, clipped to the terminal
    pub fn draw<W: Write>(&self, out: &mut W, canvas: &PixelCanvas) -> io::Result<()> {
        let (cols, rows) = self.term;
        let (w, _) = canvas.size();
        let width = (w as usize).min(cols as usize);

        let mut colors = None;

        for (r, line) in Self::half_blocks(canvas).into_iter().enumerate() {
            let y = self.top as usize + r;
            if y >= rows as usize {
                break;
            }

            queue!(out, cursor::MoveTo(0, y as u16))?;

            for (top, bottom) in line.into_iter().take(width) {
                let bottom = bottom.map(term_color).unwrap_or(style::Color::Reset);
                let next = (term_color(top), bottom);

                if colors != Some(next) {
                    queue!(
                        out,
                        style::SetForegroundColor(next.0),
                        style::SetBackgroundColor(next.1)
                    )?;
                    colors = Some(next);
                }

                queue!(out, style::Print(HALF_BLOCK))?;
            }
        }

        queue!(out, style::ResetColor)?;

        Ok(())
    }

    /// Lines shown below the canvas. The frame rate report (or the live cell count before there
    /// is one) comes first, and `notice` always sits on the last row. There are always
    /// [`STATUS_ROWS`] lines, so a shorter status overwrites a longer one.
    pub fn status_lines(
        report: Option<FpsReport>,
        live_cells: usize,
        notice: Option<&str>,
    ) -> Vec<String> {
        let mut lines: Vec<String> = match report {
            Some(report) => report.to_string().lines().map(str::to_string).collect(),
            None => vec![format!("{live_cells} live cells")],
        };

        lines.resize(STATUS_ROWS - 1, String::new());
        lines.push(notice.unwrap_or_default().to_string());

        lines
    }

    /// Print plain text lines below the canvas, clearing whatever was there
    pub fn draw_status<W: Write>(&self, out: &mut W, lines: &[String]) -> io::Result<()> {
        let (cols, rows) = self.term;

        for (i, line) in lines.iter().enumerate() {
            let y = self.bottom() as usize + i;
            if y >= rows as usize {
                break;
            }

            let line: String = line.chars().take(cols as usize).collect();

            queue!(
                out,
                cursor::MoveTo(0, y as u16),
                terminal::Clear(terminal::ClearType::CurrentLine),
                style::Print(line)
            )?;
        }

        Ok(())
    }
}

fn term_color(c: Color) -> style::Color {
    style::Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}
