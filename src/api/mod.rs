//! Chart facade: configuration, kind registry, layout passes and rendering.

mod chart;
mod chart_config;
mod chart_init;
mod chart_kind;
mod event_dispatch;
mod events;
pub mod format;
mod header;
mod layout_pass;
mod painters;
mod render_coordinator;
mod scale_builder;
mod state;

pub use chart::Chart;
pub use chart_config::{ChartConfig, MAX_LAYOUT_PASSES};
pub use chart_kind::ChartKind;
pub use events::{ChartEvent, Dispatcher, EventHandler, EventKind};
pub use header::{HeaderLayout, LegendEntry, LegendItem};
pub use layout_pass::{LayoutReport, PassRecord, PlotLayout, RenderOutcome};
pub use painters::{BarPainter, BubblePainter, LinePainter, NoopPainter, PaintContext, SeriesPainter};
pub use state::ChartState;
