//! sucrose-rs: cartesian chart layout with adaptive axis labels.
//!
//! The crate lays out chart axes whose tick labels resolve collisions by
//! wrapping, staggering or rotating, feeds the resulting axis margins back into
//! the plot area over a fixed number of passes, and emits a backend-agnostic
//! scene that an SVG writer (or any [`render::Renderer`]) can draw.

pub mod api;
pub mod axis;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{Chart, ChartConfig, ChartKind, RenderOutcome};
pub use error::{ChartError, ChartResult};
