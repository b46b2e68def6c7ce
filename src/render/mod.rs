mod frame;
mod measure;
mod null_renderer;
mod primitives;
mod reconcile;
mod svg_backend;

pub use frame::RenderFrame;
pub use measure::{HeuristicTextMeasurer, MonospaceTextMeasurer, TextMeasurer, TextMetrics};
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, LinePrimitive, PolylinePrimitive, PrimitiveRole, RectPrimitive,
    TextAnchor, TextBaseline, TextPrimitive,
};
pub use reconcile::{SceneDiff, reconcile};
pub use svg_backend::{SvgRenderStats, SvgRenderer};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from chart layout and event logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
