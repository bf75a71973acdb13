//! Data module - Function sampling and range derivation

mod sampler;

pub use sampler::{PlotData, PlotError, SamplePoint, Sampler, YRange};
