//! View State
//! Everything the window shows, and the pure transition function that
//! drives it.

use super::history::{History, HistoryEntry};
use super::presets::PRESETS;
use crate::config::PlotConfig;
use crate::data::{PlotData, Sampler};
use chrono::{DateTime, Local};

pub const DEFAULT_EXPRESSION: &str = "Math.sin(x)";
pub const DEFAULT_X_MIN: f64 = -10.0;
pub const DEFAULT_X_MAX: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PlotStatus {
    /// Nothing plotted yet.
    #[default]
    Idle,
    Ready(PlotData),
    Error(String),
}

impl PlotStatus {
    pub fn plot(&self) -> Option<&PlotData> {
        match self {
            PlotStatus::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PlotStatus::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// User intents, produced by the control panel.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetExpression(String),
    SetXMin(f64),
    SetXMax(f64),
    ClearExpression,
    SelectPreset(usize),
    SelectHistory(usize),
    Reset,
    Regenerate,
    ToggleHelp,
}

/// What the chart footer reports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotSummary {
    pub points: usize,
    pub x_range: (f64, f64),
    /// Only known after a successful plot.
    pub y_range: Option<(f64, f64)>,
    /// X units per pixel.
    pub resolution: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub expression: String,
    pub x_min: f64,
    pub x_max: f64,
    pub history: History,
    pub show_help: bool,
    pub status: PlotStatus,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            expression: DEFAULT_EXPRESSION.to_string(),
            x_min: DEFAULT_X_MIN,
            x_max: DEFAULT_X_MAX,
            history: History::new(),
            show_help: false,
            status: PlotStatus::Idle,
        }
    }
}

impl ViewState {
    /// Initial state for the given inputs, plotted once.
    pub fn initial(
        expression: &str,
        x_min: f64,
        x_max: f64,
        config: &PlotConfig,
        now: DateTime<Local>,
    ) -> Self {
        let state = Self {
            expression: expression.to_string(),
            x_min,
            x_max,
            ..Self::default()
        };
        reduce(&state, Action::Regenerate, config, now)
    }

    /// Footer figures. Ranges and resolution follow the current inputs, so
    /// they stay visible after a failed plot.
    pub fn summary(&self, config: &PlotConfig) -> PlotSummary {
        let plot = self.status.plot();
        PlotSummary {
            points: plot.map_or(0, |data| data.points.len()),
            x_range: (self.x_min, self.x_max),
            y_range: plot.map(|data| (data.y_range.min, data.y_range.max)),
            resolution: (self.x_max - self.x_min) / config.sample_count as f64,
        }
    }

    /// Index of the preset whose expression is currently entered.
    pub fn active_preset(&self) -> Option<usize> {
        PRESETS
            .iter()
            .position(|p| p.expression == self.expression)
    }
}

/// Apply `action` to `state`, returning the next state.
///
/// Every action except `ToggleHelp` ends in a re-plot. A successful plot is
/// recorded in the history; a failed one replaces the status with its message.
pub fn reduce(
    state: &ViewState,
    action: Action,
    config: &PlotConfig,
    now: DateTime<Local>,
) -> ViewState {
    let mut next = state.clone();

    match action {
        Action::SetExpression(expression) => next.expression = expression,
        Action::SetXMin(value) => next.x_min = value,
        Action::SetXMax(value) => next.x_max = value,
        Action::ClearExpression => next.expression.clear(),
        Action::SelectPreset(index) => match PRESETS.get(index) {
            Some(preset) => next.expression = preset.expression.to_string(),
            None => return next,
        },
        Action::SelectHistory(index) => match state.history.get(index) {
            Some(entry) => {
                next.expression = entry.expression.clone();
                next.x_min = entry.x_min;
                next.x_max = entry.x_max;
            }
            None => return next,
        },
        Action::Reset => {
            next.expression = DEFAULT_EXPRESSION.to_string();
            next.x_min = DEFAULT_X_MIN;
            next.x_max = DEFAULT_X_MAX;
        }
        Action::Regenerate => {}
        Action::ToggleHelp => {
            next.show_help = !next.show_help;
            return next;
        }
    }

    replot(next, config, now)
}

fn replot(mut state: ViewState, config: &PlotConfig, now: DateTime<Local>) -> ViewState {
    match Sampler::plot(&state.expression, state.x_min, state.x_max, config) {
        Ok(data) => {
            state.history = state.history.with_entry(HistoryEntry {
                expression: state.expression.clone(),
                x_min: state.x_min,
                x_max: state.x_max,
                timestamp: now,
            });
            state.status = PlotStatus::Ready(data);
        }
        Err(e) => {
            tracing::debug!(expression = %state.expression, error = %e, "Plot failed");
            state.status = PlotStatus::Error(e.to_string());
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::HISTORY_LIMIT;

    fn apply(state: &ViewState, action: Action) -> ViewState {
        reduce(state, action, &PlotConfig::default(), Local::now())
    }

    fn start() -> ViewState {
        ViewState::initial(
            DEFAULT_EXPRESSION,
            DEFAULT_X_MIN,
            DEFAULT_X_MAX,
            &PlotConfig::default(),
            Local::now(),
        )
    }

    #[test]
    fn initial_state_is_plotted() {
        let state = start();
        let data = state.status.plot().expect("sine should plot");
        assert_eq!(data.points.len(), 801);
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.active_preset(), Some(0));
    }

    #[test]
    fn setting_expression_replots_and_records_history() {
        let state = apply(&start(), Action::SetExpression("x^2".to_string()));
        assert!(state.status.plot().is_some());
        assert_eq!(state.history.len(), 2);
        assert_eq!(state.history.entries()[1].expression, "x^2");
        assert_eq!(state.active_preset(), None);
    }

    #[test]
    fn reducer_leaves_input_untouched() {
        let before = start();
        let snapshot = before.clone();
        let _ = apply(&before, Action::SetXMin(-2.0));
        assert_eq!(before, snapshot);
    }

    #[test]
    fn clear_reports_empty_expression() {
        let state = apply(&start(), Action::ClearExpression);
        assert_eq!(state.expression, "");
        assert_eq!(state.status.error(), Some("Please enter a function"));
        // Failed plots leave history alone
        assert_eq!(state.history.len(), 1);
    }

    #[test]
    fn inverted_range_is_an_error() {
        let state = apply(&start(), Action::SetXMin(20.0));
        assert!(state.status.error().is_some());
        assert!(state.status.plot().is_none());
    }

    #[test]
    fn malformed_expression_is_an_error() {
        let state = apply(&start(), Action::SetExpression("x +++ * 2".to_string()));
        let message = state.status.error().unwrap();
        assert!(message.starts_with("Invalid function"), "{}", message);
    }

    #[test]
    fn preset_selection() {
        let state = apply(&start(), Action::SelectPreset(4));
        assert_eq!(state.expression, "x**2 + 3*x - 5");
        assert_eq!(state.active_preset(), Some(4));

        let ignored = apply(&state, Action::SelectPreset(99));
        assert_eq!(ignored, state);
    }

    #[test]
    fn history_selection_restores_range() {
        let state = apply(&start(), Action::SetExpression("x^3".to_string()));
        let state = apply(&state, Action::SetXMax(3.0));
        let state = apply(&state, Action::SelectHistory(0));
        assert_eq!(state.expression, DEFAULT_EXPRESSION);
        assert_eq!((state.x_min, state.x_max), (-10.0, 10.0));
    }

    #[test]
    fn reset_restores_defaults() {
        let state = apply(&start(), Action::SetExpression("bogus(".to_string()));
        let state = apply(&state, Action::SetXMin(1.0));
        let state = apply(&state, Action::Reset);
        assert_eq!(state.expression, DEFAULT_EXPRESSION);
        assert_eq!((state.x_min, state.x_max), (DEFAULT_X_MIN, DEFAULT_X_MAX));
        assert!(state.status.error().is_none());
    }

    #[test]
    fn history_is_capped() {
        let mut state = start();
        for i in 1..=7 {
            state = apply(&state, Action::SetExpression(format!("x * {}", i)));
        }
        assert_eq!(state.history.len(), HISTORY_LIMIT);
        assert_eq!(state.history.entries()[HISTORY_LIMIT - 1].expression, "x * 7");
    }

    #[test]
    fn summary_tracks_inputs_even_when_plot_fails() {
        let config = PlotConfig::default();
        let summary = start().summary(&config);
        assert_eq!(summary.points, 801);
        assert_eq!(summary.x_range, (-10.0, 10.0));
        assert!(summary.y_range.is_some());
        assert_eq!(summary.resolution, 0.025);

        let failed = apply(&start(), Action::SetExpression("x +".to_string()));
        let failed = apply(&failed, Action::SetXMax(30.0));
        assert!(failed.status.error().is_some());
        let summary = failed.summary(&config);
        assert_eq!(summary.points, 0);
        assert_eq!(summary.x_range, (-10.0, 30.0));
        assert_eq!(summary.y_range, None);
        assert_eq!(summary.resolution, 0.05);
    }

    #[test]
    fn help_toggle_does_not_replot() {
        let state = apply(&start(), Action::ToggleHelp);
        assert!(state.show_help);
        assert_eq!(state.history.len(), 1);
        assert!(!apply(&state, Action::ToggleHelp).show_help);
    }
}
