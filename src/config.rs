// Command-line configuration.
//
//   scribble-shot                         (red, radius 4)
//   scribble-shot --color blue --radius 8
//   RUST_LOG=debug scribble-shot          (log every stroke/undo/brush change)

use clap::{Parser, ValueEnum};

use crate::controller::{BrushState, DEFAULT_MAX_POINTS, StrokeLimits};
use crate::sampler::DEFAULT_STEP_FACTOR;
use crate::types::Color;

/// Palette colors selectable at startup (same set as the R/G/B/Y/K/W keys).
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PaletteColor {
    Red,
    Green,
    Blue,
    Yellow,
    Black,
    White,
}

impl PaletteColor {
    pub fn color(self) -> Color {
        match self {
            PaletteColor::Red => Color::RED,
            PaletteColor::Green => Color::GREEN,
            PaletteColor::Blue => Color::BLUE,
            PaletteColor::Yellow => Color::YELLOW,
            PaletteColor::Black => Color::BLACK,
            PaletteColor::White => Color::WHITE,
        }
    }
}

/// Screenshot the display under the mouse and scribble on it.
///
/// Keys: R/G/B/Y/K/W color, +/- or [/] or wheel brush size,
/// Ctrl+Z or Backspace undo, C clear, Esc or Q quit.
#[derive(Parser, Debug, Clone)]
#[command(name = "scribble-shot", version)]
pub struct Config {
    /// Initial brush radius in pixels.
    #[arg(long, value_name = "PX", default_value_t = 4,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub radius: u32,

    /// Initial brush color.
    #[arg(long, value_enum, default_value_t = PaletteColor::Red)]
    pub color: PaletteColor,

    /// Interpolation step as a fraction of the brush radius.
    #[arg(long, value_name = "F", default_value_t = DEFAULT_STEP_FACTOR,
          value_parser = parse_step_factor)]
    pub step_factor: f32,

    /// Points per stroke before it is split in two.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_POINTS,
          value_parser = parse_max_points)]
    pub max_points: usize,

    /// Sleep between frames, in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = 10)]
    pub frame_delay_ms: u64,

    /// Radius change per key press or wheel notch.
    #[arg(long, value_name = "PX", default_value_t = 1,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub radius_step: u32,
}

impl Config {
    pub fn brush(&self) -> BrushState {
        BrushState { color: self.color.color(), radius: self.radius }
    }

    pub fn stroke_limits(&self) -> StrokeLimits {
        StrokeLimits {
            step_factor: self.step_factor,
            max_points: self.max_points,
            radius_step: self.radius_step,
        }
    }
}

fn parse_step_factor(s: &str) -> Result<f32, String> {
    let f: f32 = s.parse().map_err(|e| format!("not a number: {e}"))?;
    if f.is_finite() && f > 0.0 {
        Ok(f)
    } else {
        Err(format!("step factor must be greater than 0 (got {s})"))
    }
}

fn parse_max_points(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("max points must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("not a count: {e}")),
    }
}
