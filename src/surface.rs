use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::Pixel;
use crate::geometry::BoundingRect;
use crate::geometry::Rect;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid color \"{0}\", expected #rrggbb")]
pub struct ColorError(String);

#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorError(s.to_string());

        let hex = s.strip_prefix('#').ok_or_else(err)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(err());
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());

        Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// A 1px wide line segment between two (inclusive) pixel coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Line {
    pub from: (Pixel, Pixel),
    pub to: (Pixel, Pixel),
}

/// Something the grid can be drawn on.
pub trait Surface {
    /// Internal resolution, as `(width, height)`
    fn size(&self) -> (Pixel, Pixel);

    /// Where the surface currently sits on screen. Pointer positions are reported against this.
    fn bounding_rect(&self) -> BoundingRect;

    /// Stroke a batch of lines with one color
    fn stroke_lines(&mut self, color: Color, lines: &[Line]);

    fn fill_rect(&mut self, rect: Rect, color: Color);
}

/// An in-memory RGB framebuffer.
pub struct PixelCanvas {
    width: Pixel,
    height: Pixel,

    /// Row major pixels
    pixels: Vec<Color>,

    display: BoundingRect,
}

impl PixelCanvas {
    pub fn new(width: Pixel, height: Pixel) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::default(); width as usize * height as usize],
            display: BoundingRect {
                left: 0.0,
                top: 0.0,
                width: width as f64,
                height: height as f64,
            },
        }
    }

    /// Tell the canvas where (and at what size) it's being shown
    pub fn set_display_rect(&mut self, rect: BoundingRect) {
        self.display = rect;
    }

    pub fn pixel(&self, x: Pixel, y: Pixel) -> Color {
        assert!(x < self.width, "x is out of bounds");
        assert!(y < self.height, "y is out of bounds");

        self.pixels[self.xy_from(x, y)]
    }

    /// Rows of pixels, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.pixels.chunks(self.width.max(1) as usize)
    }

    fn xy_from(&self, x: Pixel, y: Pixel) -> usize {
        y as usize * self.width as usize + x as usize
    }

    fn put(&mut self, x: Pixel, y: Pixel, color: Color) {
        if x < self.width && y < self.height {
            let i = self.xy_from(x, y);
            self.pixels[i] = color;
        }
    }
}

impl Surface for PixelCanvas {
    fn size(&self) -> (Pixel, Pixel) {
        (self.width, self.height)
    }

    fn bounding_rect(&self) -> BoundingRect {
        self.display
    }

    fn stroke_lines(&mut self, color: Color, lines: &[Line]) {
        for line in lines {
            let (x0, y0) = (line.from.0 as i64, line.from.1 as i64);
            let (x1, y1) = (line.to.0 as i64, line.to.1 as i64);

            let steps = (x1 - x0).abs().max((y1 - y0).abs());

            if steps == 0 {
                self.put(x0 as Pixel, y0 as Pixel, color);
                continue;
            }

            for s in 0..=steps {
                let x = x0 + (x1 - x0) * s / steps;
                let y = y0 + (y1 - y0) * s / steps;
                self.put(x as Pixel, y as Pixel, color);
            }
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let x_end = (rect.x + rect.w).min(self.width);
        let y_end = (rect.y + rect.h).min(self.height);

        for y in rect.y..y_end {
            let (start, end) = (self.xy_from(rect.x.min(x_end), y), self.xy_from(x_end, y));
            self.pixels[start..end].fill(color);
        }
    }
}

#[cfg(test)]
mod test {
    use super::Color;
    use super::ColorError;
    use super::Line;
    use super::PixelCanvas;
    use super::Surface;
    use crate::geometry::Rect;

    #[test]
    fn parse_color() {
        assert_eq!("#cccccc".parse::<Color>(), Ok(Color::rgb(0xCC, 0xCC, 0xCC)));
        assert_eq!("#000000".parse::<Color>(), Ok(Color::BLACK));
        assert_eq!(
            "cccccc".parse::<Color>(),
            Err(ColorError("cccccc".to_string()))
        );
        assert!("#ccccc".parse::<Color>().is_err());
        assert!("#gggggg".parse::<Color>().is_err());
    }

    #[test]
    fn color_display() {
        assert_eq!(Color::rgb(0xCC, 0x0A, 0xFF).to_string(), "#cc0aff");
    }

    #[test]
    fn fill_is_clipped() {
        let mut canvas = PixelCanvas::new(4, 3);

        canvas.fill_rect(
            Rect {
                x: 2,
                y: 1,
                w: 10,
                h: 10,
            },
            Color::WHITE,
        );

        assert_eq!(canvas.pixel(1, 1), Color::BLACK);
        assert_eq!(canvas.pixel(2, 1), Color::WHITE);
        assert_eq!(canvas.pixel(3, 2), Color::WHITE);
        assert_eq!(canvas.pixel(3, 0), Color::BLACK);
    }

    #[test]
    fn fill_entirely_outside() {
        let mut canvas = PixelCanvas::new(4, 3);

        canvas.fill_rect(
            Rect {
                x: 6,
                y: 0,
                w: 2,
                h: 2,
            },
            Color::WHITE,
        );

        assert!(canvas.rows().flatten().all(|&c| c == Color::BLACK));
    }

    #[test]
    fn lines() {
        let mut canvas = PixelCanvas::new(5, 5);
        let red = Color::rgb(0xFF, 0, 0);

        canvas.stroke_lines(
            red,
            &[
                Line {
                    from: (0, 0),
                    to: (0, 4),
                },
                Line {
                    from: (0, 4),
                    to: (9, 4),
                },
            ],
        );

        for i in 0..5 {
            assert_eq!(canvas.pixel(0, i), red);
            assert_eq!(canvas.pixel(i, 4), red);
        }
        assert_eq!(canvas.pixel(1, 1), Color::BLACK);
    }
}
