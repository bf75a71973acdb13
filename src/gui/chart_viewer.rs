//! Chart Viewer Widget
//! Central panel: status badge, error box, the painted plot and its footer.

use crate::charts::{Anchor, Label, LineSegment, Px, Rgb, Scene, Stroke};
use crate::config::PlotConfig;
use crate::state::{help, PlotStatus, ViewState};
use egui::epaint::TextShape;
use egui::{Align2, Color32, FontId, Pos2, Rect, RichText, Sense, Shape};

const ERROR_COLOR: Color32 = Color32::from_rgb(220, 53, 69);
const READY_COLOR: Color32 = Color32::from_rgb(40, 167, 69);

fn color32(c: Rgb) -> Color32 {
    Color32::from_rgb(c.0, c.1, c.2)
}

/// Maps scene pixels into the allocated rect, keeping the aspect ratio.
struct ScreenMap {
    origin: Pos2,
    scale: f32,
}

impl ScreenMap {
    fn fit(rect: Rect, scene: &Scene) -> Self {
        let scale = (rect.width() / scene.width as f32)
            .min(rect.height() / scene.height as f32)
            .max(0.1);
        Self {
            origin: rect.min,
            scale,
        }
    }

    fn pos(&self, p: Px) -> Pos2 {
        Pos2::new(
            self.origin.x + p.0 * self.scale,
            self.origin.y + p.1 * self.scale,
        )
    }

    fn stroke(&self, stroke: Stroke) -> egui::Stroke {
        egui::Stroke::new(stroke.width * self.scale, color32(stroke.color))
    }
}

/// Draws the current plot and everything around it.
#[derive(Default)]
pub struct ChartViewer {
    scene: Option<Scene>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the cached scene from the latest status.
    pub fn update(&mut self, status: &PlotStatus, config: &PlotConfig) {
        self.scene = status.plot().map(|data| Scene::build(data, config));
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn show(&self, ui: &mut egui::Ui, state: &ViewState, config: &PlotConfig) {
        ui.horizontal(|ui| {
            ui.label(RichText::new("Live Plot").size(20.0).strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                Self::draw_status_badge(ui, &state.status);
            });
        });
        ui.add_space(8.0);

        if let Some(message) = state.status.error() {
            Self::draw_error_box(ui, message);
            ui.add_space(8.0);
        }

        let footer_height = 60.0;
        let size = egui::vec2(
            ui.available_width(),
            (ui.available_height() - footer_height).max(100.0),
        );
        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        match &self.scene {
            Some(scene) => Self::paint_scene(&painter, response.rect, scene),
            None => {
                painter.text(
                    response.rect.center(),
                    Align2::CENTER_CENTER,
                    "No plot",
                    FontId::proportional(20.0),
                    Color32::GRAY,
                );
            }
        }

        ui.add_space(6.0);
        ui.separator();
        let summary = state.summary(config);
        ui.horizontal_wrapped(|ui| {
            Self::stat(ui, "Points:", summary.points.to_string());
            let (x_min, x_max) = summary.x_range;
            Self::stat(ui, "X range:", format!("[{:.2}, {:.2}]", x_min, x_max));
            let y_range = summary
                .y_range
                .map(|(min, max)| format!("[{:.2}, {:.2}]", min, max))
                .unwrap_or_else(|| "n/a".to_string());
            Self::stat(ui, "Y range:", y_range);
            Self::stat(
                ui,
                "Resolution:",
                format!("{} units/pixel", summary.resolution),
            );
        });
        ui.label(
            RichText::new(format!("Function: {}", state.expression))
                .monospace()
                .size(12.0),
        );
    }

    fn draw_status_badge(ui: &mut egui::Ui, status: &PlotStatus) {
        let (text, color) = match status {
            PlotStatus::Error(_) => ("❌ Error", ERROR_COLOR),
            PlotStatus::Ready(_) => ("✅ Plot ready", READY_COLOR),
            PlotStatus::Idle => ("⏳ Computing...", Color32::GRAY),
        };
        ui.label(RichText::new(text).size(13.0).strong().color(color));
    }

    fn draw_error_box(ui: &mut egui::Ui, message: &str) {
        egui::Frame::none()
            .rounding(6.0)
            .stroke(egui::Stroke::new(1.5, ERROR_COLOR))
            .fill(ERROR_COLOR.gamma_multiply(0.1))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(
                    RichText::new(format!("Error: {}", message))
                        .strong()
                        .color(ERROR_COLOR),
                );
                ui.add_space(4.0);
                ui.label(RichText::new("Possible fixes:").size(12.0));
                for suggestion in help::ERROR_SUGGESTIONS {
                    ui.label(RichText::new(format!("• {}", suggestion)).size(12.0));
                }
            });
    }

    fn stat(ui: &mut egui::Ui, label: &str, value: String) {
        ui.label(RichText::new(label).size(12.0).color(Color32::GRAY));
        ui.label(RichText::new(value).size(12.0).strong());
        ui.add_space(12.0);
    }

    /// Paint the scene with the egui painter, scaled into `rect`.
    fn paint_scene(painter: &egui::Painter, rect: Rect, scene: &Scene) {
        let map = ScreenMap::fit(rect, scene);
        let canvas = Rect::from_min_max(
            map.pos((0.0, 0.0)),
            map.pos((scene.width as f32, scene.height as f32)),
        );
        painter.rect_filled(canvas, 0.0, color32(scene.background));

        let draw_segments = |segments: &[LineSegment], stroke: Stroke| {
            let stroke = map.stroke(stroke);
            for segment in segments {
                painter.line_segment([map.pos(segment.from), map.pos(segment.to)], stroke);
            }
        };
        draw_segments(&scene.grid, scene.grid_stroke);
        draw_segments(&scene.axes, scene.axis_stroke);
        draw_segments(&scene.ticks, scene.tick_stroke);

        let curve_stroke = map.stroke(scene.curve_stroke);
        for polyline in &scene.curve {
            let points: Vec<Pos2> = polyline.iter().map(|&p| map.pos(p)).collect();
            painter.add(Shape::line(points, curve_stroke));
        }

        let marker_color = color32(scene.marker_color);
        for &m in &scene.markers {
            painter.circle_filled(map.pos(m), scene.marker_radius * map.scale, marker_color);
        }

        for label in &scene.labels {
            Self::paint_label(painter, &map, label);
        }
    }

    fn paint_label(painter: &egui::Painter, map: &ScreenMap, label: &Label) {
        let font = FontId::proportional(label.size * map.scale);
        let color = color32(label.color);
        let pos = map.pos(label.pos);

        if label.vertical {
            // Rotated a quarter turn counter-clockwise around the galley's
            // top-left corner, so offset it to stay centered on `pos`.
            let galley = painter.layout_no_wrap(label.text.clone(), font, color);
            let size = galley.size();
            let corner = Pos2::new(pos.x - size.y / 2.0, pos.y + size.x / 2.0);
            painter.add(
                TextShape::new(corner, galley, color).with_angle(-std::f32::consts::FRAC_PI_2),
            );
            return;
        }

        let align = match label.anchor {
            Anchor::TopCenter => Align2::CENTER_TOP,
            Anchor::BottomCenter => Align2::CENTER_BOTTOM,
            Anchor::RightCenter => Align2::RIGHT_CENTER,
            Anchor::Center => Align2::CENTER_CENTER,
        };
        painter.text(pos, align, &label.text, font, color);
    }
}
