//! Chart Scene Module
//! Resolves plot data into pixel-space primitives.
//!
//! The scene is a pure function of the plot data and config; both the egui
//! viewer and the PNG renderer draw the same scene.

use super::axis::{format_tick, nice_step, tick_values};
use crate::config::{Padding, PlotConfig};
use crate::data::{PlotData, SamplePoint, YRange};

/// Pixel position, origin at the top-left corner.
pub type Px = (f32, f32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const BACKGROUND: Rgb = Rgb(255, 255, 255);
pub const GRID_COLOR: Rgb = Rgb(240, 240, 240);
pub const AXIS_COLOR: Rgb = Rgb(51, 51, 51);
pub const CURVE_COLOR: Rgb = Rgb(52, 152, 219); // Blue
pub const MARKER_COLOR: Rgb = Rgb(41, 128, 185); // Darker blue
pub const TITLE_COLOR: Rgb = Rgb(44, 62, 80);

const TICK_HALF_LENGTH: f32 = 5.0;
const TICK_LABEL_GAP: f32 = 8.0;
const MARKER_RADIUS: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub from: Px,
    pub to: Px,
}

/// Which point of the text box sits on the label position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopCenter,
    BottomCenter,
    RightCenter,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub pos: Px,
    pub anchor: Anchor,
    pub size: f32,
    pub bold: bool,
    pub color: Rgb,
    /// Rotated 90 degrees counter-clockwise (reads bottom to top).
    pub vertical: bool,
}

/// Affine map from data space to pixel space with fixed insets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotTransform {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub width: f64,
    pub height: f64,
    pub padding: Padding,
}

impl PlotTransform {
    pub fn new(x_min: f64, x_max: f64, y_range: YRange, config: &PlotConfig) -> Self {
        Self {
            x_min,
            x_max,
            y_min: y_range.min,
            y_max: y_range.max,
            width: config.width as f64,
            height: config.height as f64,
            padding: config.padding,
        }
    }

    fn scale_x(&self) -> f64 {
        (self.width - self.padding.left as f64 - self.padding.right as f64)
            / (self.x_max - self.x_min)
    }

    fn scale_y(&self) -> f64 {
        (self.height - self.padding.top as f64 - self.padding.bottom as f64)
            / (self.y_max - self.y_min)
    }

    pub fn to_px_x(&self, x: f64) -> f64 {
        self.padding.left as f64 + (x - self.x_min) * self.scale_x()
    }

    /// Data y grows upward, pixel y downward.
    pub fn to_px_y(&self, y: f64) -> f64 {
        self.height - self.padding.bottom as f64 - (y - self.y_min) * self.scale_y()
    }

    pub fn to_px(&self, p: SamplePoint) -> Px {
        (self.to_px_x(p.x) as f32, self.to_px_y(p.y) as f32)
    }

    pub fn left(&self) -> f64 {
        self.padding.left as f64
    }

    pub fn right(&self) -> f64 {
        self.width - self.padding.right as f64
    }

    pub fn top(&self) -> f64 {
        self.padding.top as f64
    }

    pub fn bottom(&self) -> f64 {
        self.height - self.padding.bottom as f64
    }

    /// Pixel row of the horizontal axis.
    ///
    /// Through data y = 0 when visible, else pinned to the bottom edge for
    /// all-positive ranges and to the top edge otherwise.
    pub fn x_axis_row(&self) -> f64 {
        let origin = self.to_px_y(0.0);
        if origin >= self.top() && origin <= self.bottom() {
            origin
        } else if self.y_min > 0.0 {
            self.bottom()
        } else {
            self.top()
        }
    }

    /// Pixel column of the vertical axis.
    ///
    /// Through data x = 0 when visible, else pinned to the left edge for
    /// all-positive ranges and to the right edge otherwise.
    pub fn y_axis_column(&self) -> f64 {
        let origin = self.to_px_x(0.0);
        if origin >= self.left() && origin <= self.right() {
            origin
        } else if self.x_min > 0.0 {
            self.left()
        } else {
            self.right()
        }
    }
}

/// Split the samples into drawable runs.
///
/// A run ends where the jump to the next point exceeds half the y span; that
/// point is skipped and a new run starts after it. A run also ends at a
/// detected pole, with the new run starting at the point past it. Runs with
/// fewer than two points draw nothing and are dropped.
pub fn curve_segments(data: &PlotData) -> Vec<Vec<SamplePoint>> {
    let threshold = data.y_range.span().abs() * 0.5;
    let mut segments = Vec::new();
    let mut current: Vec<SamplePoint> = Vec::new();

    let mut flush = |current: &mut Vec<SamplePoint>| {
        if current.len() > 1 {
            segments.push(std::mem::take(current));
        } else {
            current.clear();
        }
    };

    for (i, point) in data.points.iter().enumerate() {
        if i > 0 {
            let prev = data.points[i - 1];
            if (point.y - prev.y).abs() > threshold {
                flush(&mut current);
                continue;
            }
            if data.pole_breaks.binary_search(&i).is_ok() {
                flush(&mut current);
            }
        }
        current.push(*point);
    }
    flush(&mut current);

    segments
}

/// Everything needed to draw one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub background: Rgb,
    pub grid: Vec<LineSegment>,
    pub grid_stroke: Stroke,
    pub axes: Vec<LineSegment>,
    pub axis_stroke: Stroke,
    pub ticks: Vec<LineSegment>,
    pub tick_stroke: Stroke,
    pub curve: Vec<Vec<Px>>,
    pub curve_stroke: Stroke,
    pub markers: Vec<Px>,
    pub marker_radius: f32,
    pub marker_color: Rgb,
    pub labels: Vec<Label>,
}

impl Scene {
    /// Lay out gridlines, axes, ticks, curve, markers and labels.
    pub fn build(data: &PlotData, config: &PlotConfig) -> Self {
        let t = PlotTransform::new(data.x_min, data.x_max, data.y_range, config);
        let (w, h) = (config.width as f32, config.height as f32);

        let x_step = nice_step(data.x_min, data.x_max);
        let y_step = nice_step(data.y_range.min, data.y_range.max);
        let x_ticks = tick_values(data.x_min, data.x_max, x_step);
        let y_ticks = tick_values(data.y_range.min, data.y_range.max, y_step);

        let (left, right) = (t.left() as f32, t.right() as f32);
        let (top, bottom) = (t.top() as f32, t.bottom() as f32);

        // Gridlines
        let mut grid = Vec::with_capacity(x_ticks.len() + y_ticks.len());
        for &x in &x_ticks {
            let px = t.to_px_x(x) as f32;
            grid.push(LineSegment {
                from: (px, top),
                to: (px, bottom),
            });
        }
        for &y in &y_ticks {
            let py = t.to_px_y(y) as f32;
            grid.push(LineSegment {
                from: (left, py),
                to: (right, py),
            });
        }

        // Axes
        let axis_row = t.x_axis_row() as f32;
        let axis_col = t.y_axis_column() as f32;
        let axes = vec![
            LineSegment {
                from: (left, axis_row),
                to: (right, axis_row),
            },
            LineSegment {
                from: (axis_col, top),
                to: (axis_col, bottom),
            },
        ];

        // Ticks and tick labels along the placed axes
        let mut ticks = Vec::new();
        let mut labels = Vec::new();
        for &x in &x_ticks {
            let px = t.to_px_x(x) as f32;
            ticks.push(LineSegment {
                from: (px, axis_row - TICK_HALF_LENGTH),
                to: (px, axis_row + TICK_HALF_LENGTH),
            });
            labels.push(Label {
                text: format_tick(x),
                pos: (px, axis_row + TICK_LABEL_GAP),
                anchor: Anchor::TopCenter,
                size: 12.0,
                bold: false,
                color: AXIS_COLOR,
                vertical: false,
            });
        }
        for &y in &y_ticks {
            let py = t.to_px_y(y) as f32;
            ticks.push(LineSegment {
                from: (axis_col - TICK_HALF_LENGTH, py),
                to: (axis_col + TICK_HALF_LENGTH, py),
            });
            labels.push(Label {
                text: format_tick(y),
                pos: (axis_col - TICK_LABEL_GAP, py),
                anchor: Anchor::RightCenter,
                size: 12.0,
                bold: false,
                color: AXIS_COLOR,
                vertical: false,
            });
        }

        // Curve
        let curve: Vec<Vec<Px>> = curve_segments(data)
            .into_iter()
            .map(|segment| segment.into_iter().map(|p| t.to_px(p)).collect())
            .collect();

        let stride = (data.points.len() / config.marker_target.max(1)).max(1);
        let markers: Vec<Px> = data
            .points
            .iter()
            .step_by(stride)
            .map(|&p| t.to_px(p))
            .collect();

        // Titles
        labels.push(Label {
            text: format!("f(x) = {}", data.expression),
            pos: (w / 2.0, 25.0),
            anchor: Anchor::BottomCenter,
            size: 18.0,
            bold: true,
            color: TITLE_COLOR,
            vertical: false,
        });
        labels.push(Label {
            text: "X axis".to_string(),
            pos: (w / 2.0, h - 15.0),
            anchor: Anchor::BottomCenter,
            size: 14.0,
            bold: false,
            color: TITLE_COLOR,
            vertical: false,
        });
        labels.push(Label {
            text: "Y axis".to_string(),
            pos: (15.0, h / 2.0),
            anchor: Anchor::Center,
            size: 14.0,
            bold: false,
            color: TITLE_COLOR,
            vertical: true,
        });

        Self {
            width: config.width,
            height: config.height,
            background: BACKGROUND,
            grid,
            grid_stroke: Stroke {
                width: 0.5,
                color: GRID_COLOR,
            },
            axes,
            axis_stroke: Stroke {
                width: 2.0,
                color: AXIS_COLOR,
            },
            ticks,
            tick_stroke: Stroke {
                width: 1.0,
                color: AXIS_COLOR,
            },
            curve,
            curve_stroke: Stroke {
                width: 3.0,
                color: CURVE_COLOR,
            },
            markers,
            marker_radius: MARKER_RADIUS,
            marker_color: MARKER_COLOR,
            labels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Sampler;

    fn plot(expr: &str, x_min: f64, x_max: f64) -> PlotData {
        Sampler::plot(expr, x_min, x_max, &PlotConfig::default()).unwrap()
    }

    fn transform(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> PlotTransform {
        PlotTransform::new(
            x_min,
            x_max,
            YRange {
                min: y_min,
                max: y_max,
                clamped: false,
            },
            &PlotConfig::default(),
        )
    }

    #[test]
    fn transform_maps_corners_to_plot_area() {
        let t = transform(-10.0, 10.0, -2.0, 2.0);
        assert_eq!(t.to_px_x(-10.0), 60.0);
        assert_eq!(t.to_px_x(10.0), 860.0);
        assert_eq!(t.to_px_y(-2.0), 490.0);
        assert_eq!(t.to_px_y(2.0), 40.0);
        assert_eq!(t.to_px_x(0.0), 460.0);
    }

    #[test]
    fn axes_cross_at_visible_origin() {
        let t = transform(-10.0, 10.0, -2.0, 2.0);
        assert_eq!(t.x_axis_row(), t.to_px_y(0.0));
        assert_eq!(t.y_axis_column(), 460.0);
    }

    #[test]
    fn axes_pin_to_nearest_edge() {
        // All-positive ranges: x axis at the bottom, y axis at the left.
        let t = transform(1.0, 5.0, 3.0, 9.0);
        assert_eq!(t.x_axis_row(), t.bottom());
        assert_eq!(t.y_axis_column(), t.left());

        // All-negative ranges: x axis at the top, y axis at the right.
        let t = transform(-5.0, -1.0, -9.0, -3.0);
        assert_eq!(t.x_axis_row(), t.top());
        assert_eq!(t.y_axis_column(), t.right());
    }

    #[test]
    fn smooth_function_is_one_segment() {
        let data = plot("x**2 + 3*x - 5", -10.0, 10.0);
        let segments = curve_segments(&data);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].len(), 801);
    }

    #[test]
    fn jumps_over_half_span_break_the_line() {
        let data = plot("1/(x-5)", 0.0, 10.0);
        let threshold = data.y_range.span() * 0.5;
        let segments = curve_segments(&data);
        assert!(segments.len() >= 2);
        for segment in &segments {
            for pair in segment.windows(2) {
                assert!((pair[1].y - pair[0].y).abs() <= threshold);
                assert!(!(pair[0].x < 5.0 && pair[1].x > 5.0));
            }
        }
    }

    #[test]
    fn tangent_breaks_at_every_asymptote() {
        let data = plot("Math.tan(x)", -10.0, 10.0);
        let segments = curve_segments(&data);
        assert_eq!(segments.len(), 7);
    }

    #[test]
    fn step_function_breaks_at_the_jump() {
        let data = plot("x >= 0 ? 1 : -1", -10.0, 10.0);
        assert_eq!(curve_segments(&data).len(), 2);
    }

    #[test]
    fn scene_contents() {
        let config = PlotConfig::default();
        let data = plot("Math.sin(x)", -10.0, 10.0);
        let scene = Scene::build(&data, &config);

        assert_eq!((scene.width, scene.height), (900, 550));
        assert_eq!(scene.axes.len(), 2);
        assert_eq!(scene.curve.len(), 1);
        // 801 points, one marker every 16th
        assert_eq!(scene.markers.len(), 51);
        // x ticks every 2 from -10 to 10
        let x_labels: Vec<&str> = scene
            .labels
            .iter()
            .filter(|l| l.anchor == Anchor::TopCenter)
            .map(|l| l.text.as_str())
            .collect();
        assert_eq!(x_labels.first(), Some(&"-10"));
        assert_eq!(x_labels.len(), 11);
        assert!(scene
            .labels
            .iter()
            .any(|l| l.text == "f(x) = sin(x)" && l.bold));
        assert!(scene.labels.iter().any(|l| l.vertical));
    }
}
