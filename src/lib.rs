//! trellis-chart: headless engine for trellis line charts.
//!
//! Rows are grouped into panels and lines, every panel gets its own X axis
//! and a stack of left/right Y axes, and the engine emits a deterministic
//! `RenderFrame` for any `Renderer` backend. Tooltips, range sliders,
//! cross-filter selection and persisted series styles are driven through
//! [`TrellisEngine`].

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{TrellisEngine, TrellisEngineConfig, TrellisSettings, UpdateInput, UpdateOutcome};
pub use error::{ChartError, ChartResult};
