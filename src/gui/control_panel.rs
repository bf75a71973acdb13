//! Control Panel Widget
//! Left side panel with the function input, range, presets, history and help.

use crate::expr::Expression;
use crate::state::{help, Action, HistoryEntry, PlotStatus, ViewState, PRESETS};
use egui::{Color32, RichText};

const ACCENT: Color32 = Color32::from_rgb(52, 152, 219);
const HISTORY_PREVIEW_CHARS: usize = 30;

/// Left side control panel. The inputs mirror `ViewState`; every edit is
/// reported as an action and applied by the app.
#[derive(Default)]
pub struct ControlPanel {
    /// Outcome of the last export
    pub status: String,
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui, state: &ViewState) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(RichText::new("📈 Chartify FX").size(22.0).color(ACCENT));
            ui.label(
                RichText::new("Function Plotter")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Function Section =====
        ui.label(RichText::new("ƒ Function").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.label("f(x) =");
            let mut expression = state.expression.clone();
            let field = egui::TextEdit::singleline(&mut expression)
                .hint_text("e.g. Math.sin(x)")
                .font(egui::TextStyle::Monospace)
                .desired_width(ui.available_width() - 30.0);
            if ui.add(field).changed() {
                action = ControlPanelAction::Dispatch(Action::SetExpression(expression));
            }
            if ui
                .small_button("✖")
                .on_hover_text("Clear the function")
                .clicked()
            {
                action = ControlPanelAction::Dispatch(Action::ClearExpression);
            }
        });

        ui.add_space(10.0);

        // ===== Range Section =====
        let label_width = 60.0;
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("X min:"));
            let mut x_min = state.x_min;
            if ui
                .add(egui::DragValue::new(&mut x_min).speed(0.5))
                .changed()
            {
                action = ControlPanelAction::Dispatch(Action::SetXMin(x_min));
            }
        });
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("X max:"));
            let mut x_max = state.x_max;
            if ui
                .add(egui::DragValue::new(&mut x_max).speed(0.5))
                .changed()
            {
                action = ControlPanelAction::Dispatch(Action::SetXMax(x_max));
            }
        });

        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.horizontal(|ui| {
            if ui.button("🔄 Regenerate").clicked() {
                action = ControlPanelAction::Dispatch(Action::Regenerate);
            }
            if ui.button("↺ Reset").clicked() {
                action = ControlPanelAction::Dispatch(Action::Reset);
            }
            let can_download = matches!(state.status, PlotStatus::Ready(_));
            ui.add_enabled_ui(can_download, |ui| {
                if ui.button("💾 Download PNG").clicked() {
                    action = ControlPanelAction::Download;
                }
            });
        });

        if !self.status.is_empty() {
            let status_color = if self.status.contains("Error") {
                Color32::from_rgb(220, 53, 69)
            } else {
                Color32::from_rgb(40, 167, 69)
            };
            ui.label(RichText::new(&self.status).size(11.0).color(status_color));
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Presets Section =====
        ui.label(RichText::new("⭐ Examples").size(14.0).strong());
        ui.add_space(5.0);

        let active = state.active_preset();
        egui::Grid::new("presets")
            .num_columns(2)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for (i, preset) in PRESETS.iter().enumerate() {
                    let button = egui::Button::new(RichText::new(preset.name).size(12.0))
                        .selected(active == Some(i))
                        .min_size(egui::vec2(140.0, 24.0));
                    if ui
                        .add(button)
                        .on_hover_text(preset.expression)
                        .clicked()
                    {
                        action = ControlPanelAction::Dispatch(Action::SelectPreset(i));
                    }
                    if i % 2 == 1 {
                        ui.end_row();
                    }
                }
            });

        // ===== History Section =====
        if !state.history.is_empty() {
            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);
            ui.label(RichText::new("🕘 History").size(14.0).strong());
            ui.add_space(5.0);

            for (i, entry) in state.history.entries().iter().enumerate().rev() {
                if Self::draw_history_entry(ui, entry) {
                    action = ControlPanelAction::Dispatch(Action::SelectHistory(i));
                }
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Help Section =====
        let toggle = if state.show_help { "▼ Help" } else { "▶ Help" };
        if ui
            .selectable_label(state.show_help, RichText::new(toggle).size(14.0).strong())
            .clicked()
        {
            action = ControlPanelAction::Dispatch(Action::ToggleHelp);
        }

        if state.show_help {
            Self::draw_help(ui);
        }

        action
    }

    /// Returns true when the entry was clicked.
    fn draw_history_entry(ui: &mut egui::Ui, entry: &HistoryEntry) -> bool {
        let preview = history_preview(&entry.expression);
        let detail = format!(
            "X: [{}, {}] • {}",
            entry.x_min,
            entry.x_max,
            entry.time_label()
        );

        let response = egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(6.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(preview).monospace().size(12.0));
                ui.label(RichText::new(detail).size(10.0).color(Color32::GRAY));
            })
            .response
            .interact(egui::Sense::click())
            .on_hover_text(&entry.expression);
        ui.add_space(4.0);

        response.clicked()
    }

    fn draw_help(ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.label(RichText::new("Supported syntax:").strong());
                for (syntax, meaning) in help::SYNTAX {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(syntax).monospace().color(ACCENT));
                        ui.label(meaning);
                    });
                }
                ui.add_space(6.0);
                ui.label(RichText::new("Advanced examples:").strong());
                for (source, description) in help::ADVANCED_EXAMPLES {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(source).monospace().color(ACCENT));
                        ui.label(format!("- {}", description));
                    });
                }
            });
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Pretty form of a history expression, cut to a fixed width.
pub fn history_preview(source: &str) -> String {
    let pretty = Expression::parse(source)
        .map(|e| e.to_string())
        .unwrap_or_else(|_| source.to_string());

    if pretty.chars().count() > HISTORY_PREVIEW_CHARS {
        let cut: String = pretty.chars().take(HISTORY_PREVIEW_CHARS).collect();
        format!("{}...", cut)
    } else {
        pretty
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    Dispatch(Action),
    Download,
}
