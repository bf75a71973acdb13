//! Charts module - Scene layout and rendering

mod axis;
mod renderer;
mod scene;

pub use axis::{format_tick, nice_step, tick_values};
pub use renderer::{default_file_name, ExportError, StaticChartRenderer};
pub use scene::{curve_segments, Anchor, Label, LineSegment, PlotTransform, Px, Rgb, Scene, Stroke};
