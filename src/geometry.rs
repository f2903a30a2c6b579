use crate::GridSize;
use crate::Pixel;

/// Position of a pointer event, in the same units as the [`BoundingRect`] it's reported against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

/// Where (and how large) a surface is actually displayed. This can differ from the surface's
/// internal resolution when the host scales it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// An axis aligned rectangle of surface pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: Pixel,
    pub y: Pixel,
    pub w: Pixel,
    pub h: Pixel,
}

impl Rect {
    pub fn center(&self) -> PointerPosition {
        PointerPosition {
            x: self.x as f64 + self.w as f64 / 2.0,
            y: self.y as f64 + self.h as f64 / 2.0,
        }
    }
}

/// Layout of a `width` x `height` grid on a surface.
///
/// Every cell takes `cell_size` pixels plus one pixel of grid line, and there's one extra grid
/// line closing off the bottom and right edges:
/// ```notrust
///   |<- cs ->|<- cs ->|
///   +--------+--------+
///   | (0, 0) | (0, 1) |
///   +--------+--------+
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridGeometry {
    pub width: GridSize,
    pub height: GridSize,
    pub cell_size: Pixel,
}

impl GridGeometry {
    /// Panics if the grid is empty, or if its canvas doesn't fit in [`Pixel`] coordinates (see
    /// [`Self::checked_canvas_size`]).
    pub fn new(width: GridSize, height: GridSize, cell_size: Pixel) -> Self {
        assert!(width > 0 && height > 0, "grid must have at least one cell");
        assert!(cell_size > 0, "cells must be at least one pixel wide");
        assert!(
            Self::checked_canvas_size(width, height, cell_size).is_some(),
            "canvas of a {width}x{height} grid with {cell_size}px cells is too large"
        );

        Self {
            width,
            height,
            cell_size,
        }
    }

    /// Distance in pixels from one cell to the next
    pub fn pitch(&self) -> Pixel {
        self.cell_size + 1
    }

    /// Internal resolution of a surface holding the whole grid, as `(width, height)`
    pub fn canvas_size(&self) -> (Pixel, Pixel) {
        (
            self.pitch() * self.width + 1,
            self.pitch() * self.height + 1,
        )
    }

    /// [`Self::canvas_size`] for a grid that may not be constructible. `None` if either side
    /// overflows.
    pub fn checked_canvas_size(
        width: GridSize,
        height: GridSize,
        cell_size: Pixel,
    ) -> Option<(Pixel, Pixel)> {
        let pitch = cell_size.checked_add(1)?;
        let side = |n: GridSize| pitch.checked_mul(n)?.checked_add(1);

        Some((side(width)?, side(height)?))
    }

    /// Fill rectangle of a cell. This is the exact placement used when drawing, so it's also what
    /// [`Self::pixel_to_cell`] inverts.
    pub fn cell_rect(&self, row: GridSize, col: GridSize) -> Rect {
        Rect {
            x: col * self.pitch() + 1,
            y: row * self.pitch() + 1,
            w: self.cell_size,
            h: self.cell_size,
        }
    }

    /// Offsets of the vertical grid lines, left to right
    pub fn column_lines(&self) -> impl Iterator<Item = Pixel> + '_ {
        (0..=self.width).map(move |i| i * self.pitch())
    }

    /// Offsets of the horizontal grid lines, top to bottom
    pub fn row_lines(&self) -> impl Iterator<Item = Pixel> + '_ {
        (0..=self.height).map(move |j| j * self.pitch())
    }

    /// Map a pointer position to the `(row, col)` under it.
    ///
    /// `pos` is first moved into the surface's internal resolution using `rect`, then divided by
    /// the cell pitch. Anything past the edges of the grid snaps to the nearest edge cell.
    pub fn pixel_to_cell(&self, pos: PointerPosition, rect: BoundingRect) -> (GridSize, GridSize) {
        let (cw, ch) = self.canvas_size();

        let scale = |internal: Pixel, displayed: f64| {
            if displayed > 0.0 {
                internal as f64 / displayed
            } else {
                1.0
            }
        };

        let x = (pos.x - rect.left) * scale(cw, rect.width);
        let y = (pos.y - rect.top) * scale(ch, rect.height);

        let pitch = self.pitch() as f64;
        let clamp = |v: f64, len: GridSize| {
            (v / pitch).floor().clamp(0.0, (len - 1) as f64) as GridSize
        };

        (clamp(y, self.height), clamp(x, self.width))
    }
}
