//! Chartify FX Main Application
//! Main window with control panel and chart viewer.

use crate::charts::{default_file_name, StaticChartRenderer};
use crate::config::PlotConfig;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::state::{reduce, Action, ViewState};
use chrono::Local;
use egui::SidePanel;

/// Main application window.
pub struct PlotterApp {
    config: PlotConfig,
    state: ViewState,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl PlotterApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: PlotConfig,
        expression: &str,
        x_min: f64,
        x_max: f64,
    ) -> Self {
        let state = ViewState::initial(expression, x_min, x_max, &config, Local::now());
        let mut chart_viewer = ChartViewer::new();
        chart_viewer.update(&state.status, &config);

        Self {
            config,
            state,
            control_panel: ControlPanel::new(),
            chart_viewer,
        }
    }

    fn dispatch(&mut self, action: Action) {
        let replots = !matches!(action, Action::ToggleHelp);
        self.state = reduce(&self.state, action, &self.config, Local::now());
        if replots {
            self.chart_viewer.update(&self.state.status, &self.config);
            self.control_panel.set_status("");
        }
    }

    /// Handle PNG export - ask for a path and rasterize the current scene
    fn handle_download(&mut self) {
        let Some(scene) = self.chart_viewer.scene() else {
            self.control_panel.set_status("Error: nothing to export");
            return;
        };

        let output_path = match rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name(default_file_name(&self.state.expression))
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        match StaticChartRenderer::save_png(scene, &output_path) {
            Ok(()) => {
                let name = output_path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                self.control_panel.set_status(&format!("Saved {}", name));
            }
            Err(e) => {
                tracing::warn!(error = %e, "PNG export failed");
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for PlotterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui, &self.state) {
                        ControlPanelAction::Dispatch(action) => self.dispatch(action),
                        ControlPanelAction::Download => self.handle_download(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui, &self.state, &self.config);
        });
    }
}
