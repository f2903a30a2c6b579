use crate::bit_buffer::BitBuffer;
use crate::engine::Engine;
use crate::geometry::GridGeometry;
use crate::surface::Color;
use crate::surface::Line;
use crate::surface::Surface;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub grid: Color,
    pub dead: Color,
    pub alive: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            grid: Color::rgb(0xCC, 0xCC, 0xCC),
            dead: Color::WHITE,
            alive: Color::BLACK,
        }
    }
}

/// Draws the whole grid every time it's asked to. There's no dirty tracking: every call strokes
/// every grid line and fills every cell.
pub struct GridRenderer {
    geometry: GridGeometry,
    palette: Palette,
}

impl GridRenderer {
    pub fn new(geometry: GridGeometry, palette: Palette) -> Self {
        Self { geometry, palette }
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn draw_grid<S: Surface + ?Sized>(&self, surface: &mut S) {
        let (cw, ch) = self.geometry.canvas_size();
        let (right, bottom) = (cw - 1, ch - 1);

        let vertical = self.geometry.column_lines().map(|x| Line {
            from: (x, 0),
            to: (x, bottom),
        });
        let horizontal = self.geometry.row_lines().map(|y| Line {
            from: (0, y),
            to: (right, y),
        });

        let lines: Vec<_> = vertical.chain(horizontal).collect();
        surface.stroke_lines(self.palette.grid, &lines);
    }

    pub fn draw_cells<S: Surface + ?Sized>(&self, surface: &mut S, cells: BitBuffer<'_>) {
        debug_assert_eq!(cells.width(), self.geometry.width);
        debug_assert_eq!(cells.height(), self.geometry.height);

        for row in 0..self.geometry.height {
            for col in 0..self.geometry.width {
                let color = if cells.is_alive(cells.index(row, col)) {
                    self.palette.alive
                } else {
                    self.palette.dead
                };

                surface.fill_rect(self.geometry.cell_rect(row, col), color);
            }
        }
    }

    /// Full redraw from the engine's current cell buffer
    pub fn render<E, S>(&self, surface: &mut S, engine: &E)
    where
        E: Engine + ?Sized,
        S: Surface + ?Sized,
    {
        self.draw_grid(surface);
        self.draw_cells(surface, engine.cells());
    }
}
