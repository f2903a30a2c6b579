use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::GridSize;
use crate::Pixel;
use crate::controller::TicksPerFrame;
use crate::geometry::GridGeometry;
use crate::renderer::Palette;
use crate::rule_set::B3S23;
use crate::rule_set::RuleSet;
use crate::surface::Color;
use crate::universe::OutOfRangePolicy;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be at least 1")]
    Zero(&'static str),

    #[error("A {width}x{height} grid with {cell_size}px cells does not fit on a canvas")]
    CanvasTooLarge {
        width: GridSize,
        height: GridSize,
        cell_size: Pixel,
    },
}

/// Everything that can be tuned about a run
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub width: GridSize,
    pub height: GridSize,

    /// Side of a cell in canvas pixels, not counting the grid line
    pub cell_size: Pixel,

    pub ticks_per_frame: TicksPerFrame,

    /// How often the host delivers animation frames
    pub frame_rate: u32,

    pub rules: RuleSet,
    pub out_of_range: OutOfRangePolicy,
    pub palette: Palette,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            cell_size: 5,
            ticks_per_frame: TicksPerFrame::ONE,
            frame_rate: 60,
            rules: B3S23,
            out_of_range: OutOfRangePolicy::default(),
            palette: Palette::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            (self.width, "width"),
            (self.height, "height"),
            (self.cell_size, "cell size"),
            (self.frame_rate, "frame rate"),
        ];

        if let Some((_, what)) = checks.into_iter().find(|(v, _)| *v == 0) {
            return Err(ConfigError::Zero(what));
        }

        if GridGeometry::checked_canvas_size(self.width, self.height, self.cell_size).is_none() {
            return Err(ConfigError::CanvasTooLarge {
                width: self.width,
                height: self.height,
                cell_size: self.cell_size,
            });
        }

        Ok(())
    }

    /// Time between two animation frames
    pub fn frame_time(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.frame_rate.max(1) as f64)
    }
}

/// Interactive Game of Life in the terminal.
///
/// Click a cell to toggle it, ctrl-click to drop a glider, shift-click to drop a pulsar.
/// Space pauses, `r` restarts, `c` clears, `+`/`-` or `1`-`9` set the generations per frame,
/// `q` quits.
#[derive(Parser, Debug)]
#[command(version)]
pub struct Args {
    /// grid width in cells
    #[arg(long, default_value_t = 64)]
    pub width: GridSize,

    /// grid height in cells
    #[arg(long, default_value_t = 64)]
    pub height: GridSize,

    /// cell size in pixels (each terminal column is one pixel, each row two)
    #[arg(long, default_value_t = 1)]
    pub cell_size: Pixel,

    /// generations per frame, clamped to 1 through 1000
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub ticks: i64,

    /// frames per second to aim for
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// life-like rule, e.g. B3/S23 or B36/S23
    #[arg(long, default_value_t = B3S23)]
    pub rule: RuleSet,

    /// what happens to stamps that hang off the edge of the grid
    #[arg(long, value_enum, default_value_t = OutOfRangePolicy::Wrap)]
    pub edges: OutOfRangePolicy,

    #[arg(long, default_value = "#cccccc")]
    pub grid_color: Color,

    #[arg(long, default_value = "#ffffff")]
    pub dead_color: Color,

    #[arg(long, default_value = "#000000")]
    pub alive_color: Color,

    /// start paused
    #[arg(long)]
    pub paused: bool,

    /// write logs to this file (filtered by RUST_LOG, default info); without it only errors
    /// are logged, to stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn config(&self) -> Result<Config, ConfigError> {
        let config = Config {
            width: self.width,
            height: self.height,
            cell_size: self.cell_size,
            ticks_per_frame: TicksPerFrame::new(self.ticks),
            frame_rate: self.fps,
            rules: self.rule,
            out_of_range: self.edges,
            palette: Palette {
                grid: self.grid_color,
                dead: self.dead_color,
                alive: self.alive_color,
            },
        };

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod test {
    use std::path::Path;

    use clap::Parser;

    use super::Args;
    use super::Config;
    use super::ConfigError;
    use crate::controller::TicksPerFrame;
    use crate::renderer::Palette;
    use crate::rule_set::B3S23;
    use crate::surface::Color;
    use crate::universe::OutOfRangePolicy;

    #[test]
    fn defaults_match_the_classic_page() {
        let config = Config::default();

        assert_eq!((config.width, config.height, config.cell_size), (64, 64, 5));
        assert_eq!(config.rules, B3S23);
        assert_eq!(config.palette.grid, Color::rgb(0xCC, 0xCC, 0xCC));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_is_rejected() {
        let config = Config {
            cell_size: 0,
            ..Config::default()
        };

        assert_eq!(config.validate(), Err(ConfigError::Zero("cell size")));
    }

    #[test]
    fn oversized_canvas_is_rejected() {
        let args = Args::try_parse_from([
            "lifeharness",
            "--width",
            "800000000",
            "--cell-size",
            "5",
        ])
        .unwrap();

        assert_eq!(
            args.config(),
            Err(ConfigError::CanvasTooLarge {
                width: 800_000_000,
                height: 64,
                cell_size: 5
            })
        );

        let config = Config {
            cell_size: u32::MAX,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::CanvasTooLarge { .. })));
    }

    #[test]
    fn parse_args() {
        let args = Args::try_parse_from([
            "lifeharness",
            "--width",
            "32",
            "--ticks",
            "-3",
            "--rule",
            "B36/S23",
            "--edges",
            "reject",
            "--alive-color",
            "#ff0000",
            "--log-file",
            "life.log",
        ])
        .unwrap();

        let config = args.config().unwrap();

        assert_eq!(args.log_file.as_deref(), Some(Path::new("life.log")));
        assert_eq!(config.width, 32);
        assert_eq!(config.height, 64);
        assert_eq!(config.ticks_per_frame.get(), 1);
        assert_eq!(config.rules.to_string(), "B36/S23");
        assert_eq!(config.out_of_range, OutOfRangePolicy::Reject);
        assert_eq!(
            config.palette,
            Palette {
                alive: Color::rgb(0xFF, 0, 0),
                ..Palette::default()
            }
        );
    }

    #[test]
    fn bad_args() {
        assert!(Args::try_parse_from(["lifeharness", "--rule", "B9"]).is_err());
        assert!(Args::try_parse_from(["lifeharness", "--grid-color", "grey"]).is_err());

        let args = Args::try_parse_from(["lifeharness", "--height", "0"]).unwrap();
        assert_eq!(args.config(), Err(ConfigError::Zero("height")));
    }

    #[test]
    fn huge_ticks_are_capped() {
        let args = Args::try_parse_from(["lifeharness", "--ticks", "99999999999"]).unwrap();

        assert_eq!(args.config().unwrap().ticks_per_frame, TicksPerFrame::MAX);
    }
}
