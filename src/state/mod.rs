//! View state: presets, history, help text and the reducer.

pub mod help;
mod history;
mod presets;
mod view_state;

pub use history::{History, HistoryEntry, HISTORY_LIMIT};
pub use presets::{Preset, PRESETS};
pub use view_state::{
    reduce, Action, PlotStatus, PlotSummary, ViewState, DEFAULT_EXPRESSION, DEFAULT_X_MAX,
    DEFAULT_X_MIN,
};
