//! Static Chart Renderer
//! Rasterizes a scene with plotters and encodes it as PNG.
//!
//! Layout comes entirely from the scene; this module only turns primitives
//! into pixels:
//! 1. Background fill
//! 2. Gridlines, then axes and tick marks
//! 3. Curve polylines and markers
//! 4. Tick labels, title and axis titles

use super::scene::{Anchor, Label, Px, Rgb, Scene, Stroke};
use image::{DynamicImage, ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to draw chart: {0}")]
    Draw(String),
    #[error("Failed to encode image: {0}")]
    Image(#[from] image::ImageError),
    #[error("Failed to write image: {0}")]
    Io(#[from] std::io::Error),
    #[error("Pixel buffer does not match a {0}x{1} image")]
    Buffer(u32, u32),
}

fn draw_err<E: std::error::Error>(e: E) -> ExportError {
    ExportError::Draw(e.to_string())
}

fn color(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

fn coord(p: Px) -> (i32, i32) {
    (p.0.round() as i32, p.1.round() as i32)
}

fn line_style(stroke: Stroke) -> ShapeStyle {
    color(stroke.color).stroke_width((stroke.width.round() as u32).max(1))
}

/// File name offered for a download: `plot-<expression>.png` with every
/// non-alphanumeric character replaced by `-`.
pub fn default_file_name(expression: &str) -> String {
    let safe: String = expression
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    format!("plot-{}.png", safe)
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Draw the scene into a packed RGB8 buffer.
    pub fn render_rgb(scene: &Scene) -> Result<Vec<u8>, ExportError> {
        let (w, h) = (scene.width, scene.height);
        let mut buffer = vec![0u8; w as usize * h as usize * 3];

        {
            let root = BitMapBackend::with_buffer(&mut buffer, (w, h)).into_drawing_area();
            root.fill(&color(scene.background)).map_err(draw_err)?;

            Self::draw_segments(&root, &scene.grid, scene.grid_stroke)?;
            Self::draw_segments(&root, &scene.axes, scene.axis_stroke)?;
            Self::draw_segments(&root, &scene.ticks, scene.tick_stroke)?;

            let curve_style = line_style(scene.curve_stroke);
            for polyline in &scene.curve {
                let points: Vec<(i32, i32)> = polyline.iter().map(|&p| coord(p)).collect();
                root.draw(&PathElement::new(points, curve_style))
                    .map_err(draw_err)?;
            }

            let marker_style = color(scene.marker_color).filled();
            let radius = scene.marker_radius.round() as i32;
            for &m in &scene.markers {
                root.draw(&Circle::new(coord(m), radius, marker_style))
                    .map_err(draw_err)?;
            }

            for label in &scene.labels {
                Self::draw_label(&root, label);
            }

            root.present().map_err(draw_err)?;
        }

        Ok(buffer)
    }

    /// Render and encode as PNG bytes.
    pub fn render_png(scene: &Scene) -> Result<Vec<u8>, ExportError> {
        let buffer = Self::render_rgb(scene)?;
        let image = RgbImage::from_raw(scene.width, scene.height, buffer)
            .ok_or(ExportError::Buffer(scene.width, scene.height))?;

        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(image).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Render and write a PNG file.
    pub fn save_png(scene: &Scene, path: &Path) -> Result<(), ExportError> {
        let bytes = Self::render_png(scene)?;
        std::fs::write(path, &bytes)?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "Chart exported");
        Ok(())
    }

    fn draw_segments(
        root: &DrawingArea<BitMapBackend<'_>, Shift>,
        segments: &[super::scene::LineSegment],
        stroke: Stroke,
    ) -> Result<(), ExportError> {
        let style = line_style(stroke);
        for segment in segments {
            root.draw(&PathElement::new(
                vec![coord(segment.from), coord(segment.to)],
                style,
            ))
            .map_err(draw_err)?;
        }
        Ok(())
    }

    /// Text needs a system font; a missing one costs the label, not the export.
    fn draw_label(root: &DrawingArea<BitMapBackend<'_>, Shift>, label: &Label) {
        let font_style = if label.bold {
            FontStyle::Bold
        } else {
            FontStyle::Normal
        };
        let mut font = FontDesc::new(FontFamily::SansSerif, label.size as f64, font_style);
        if label.vertical {
            font = font.transform(FontTransform::Rotate270);
        }

        let pos = match label.anchor {
            Anchor::TopCenter => Pos::new(HPos::Center, VPos::Top),
            Anchor::BottomCenter => Pos::new(HPos::Center, VPos::Bottom),
            Anchor::RightCenter => Pos::new(HPos::Right, VPos::Center),
            Anchor::Center => Pos::new(HPos::Center, VPos::Center),
        };
        let text_color = color(label.color);
        let style = TextStyle::from(font).color(&text_color).pos(pos);

        if let Err(e) = root.draw(&Text::new(label.text.as_str(), coord(label.pos), style)) {
            tracing::warn!(label = %label.text, error = %e, "Skipping chart label");
        }
    }
}
