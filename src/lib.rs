pub mod bit_buffer;
pub mod clock;
pub mod config;
pub mod controller;
pub mod engine;
pub mod events;
pub mod geometry;
pub mod harness;
pub mod io;
pub mod pattern;
pub mod renderer;
pub mod rule_set;
pub mod scheduler;
pub mod surface;
pub mod telemetry;
pub mod terminal;
pub mod universe;

/// Grid dimension (rows, columns, cell counts along one axis)
pub type GridSize = u32;

/// Signed grid coordinate. Stamped patterns can land outside the grid, so coordinates handed to
/// the engine are signed.
pub type CellOffset = i64;

/// Pixel coordinate on a drawing surface
pub type Pixel = u32;
