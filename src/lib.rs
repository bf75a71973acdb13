//! Chartify FX - single-variable function plotter.
//!
//! Parses `f(x)`, samples it over a range, lays the curve out as a scene and
//! draws that scene either in an egui window or into a PNG.

pub mod charts;
pub mod config;
pub mod data;
pub mod expr;
pub mod gui;
pub mod state;
