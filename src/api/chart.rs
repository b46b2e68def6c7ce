use crate::core::ChartData;
use crate::error::{ChartError, ChartResult};
use crate::render::{Renderer, SceneDiff, TextMeasurer};

use super::{ChartConfig, ChartKind, Dispatcher, LayoutReport, RenderOutcome, SeriesPainter};

/// Main chart facade consumed by host applications.
///
/// `Chart` owns its configuration, data, event handlers and renderer, and
/// re-derives the whole layout from them on every `render()`. The only state
/// carried across renders is the previous series key set used for keyed
/// reconciliation, the chart state and the handlers.
pub struct Chart<R: Renderer> {
    pub(super) renderer: R,
    pub(super) kind: ChartKind,
    pub(super) config: ChartConfig,
    pub(super) data: ChartData,
    pub(super) measurer: Box<dyn TextMeasurer>,
    pub(super) painter: Box<dyn SeriesPainter>,
    pub(super) dispatcher: Dispatcher,
    pub(super) active: Vec<bool>,
    pub(super) style: Option<String>,
    pub(super) previous_keys: Vec<String>,
    pub(super) last_diff: SceneDiff<String>,
    pub(super) last_report: Option<LayoutReport>,
    pub(super) last_outcome: Option<RenderOutcome>,
}

impl<R: Renderer> Chart<R> {
    #[must_use]
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Replaces the configuration after validating it.
    pub fn set_config(&mut self, config: ChartConfig) -> ChartResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    #[must_use]
    pub fn data(&self) -> &ChartData {
        &self.data
    }

    pub fn set_data(&mut self, data: ChartData) -> ChartResult<()> {
        data.validate()?;
        self.data = data;
        Ok(())
    }

    /// Installs the measurer used for every label box.
    pub fn set_measurer(&mut self, measurer: impl TextMeasurer + 'static) {
        self.measurer = Box::new(measurer);
    }

    /// Replaces the kind's default series painter.
    pub fn set_painter(&mut self, painter: Box<dyn SeriesPainter>) {
        self.painter = painter;
    }

    #[must_use]
    pub fn painter_name(&self) -> &'static str {
        self.painter.name()
    }

    /// Resizes the chart; the next render lays out against the new viewport.
    pub fn resize(&mut self, width: u32, height: u32) -> ChartResult<()> {
        if width == 0 || height == 0 {
            return Err(ChartError::InvalidViewport { width, height });
        }
        self.config.viewport.width = width;
        self.config.viewport.height = height;
        Ok(())
    }

    #[must_use]
    pub fn last_report(&self) -> Option<&LayoutReport> {
        self.last_report.as_ref()
    }

    #[must_use]
    pub fn last_outcome(&self) -> Option<RenderOutcome> {
        self.last_outcome
    }

    /// Series keys that entered, stayed or left in the last render.
    #[must_use]
    pub fn last_diff(&self) -> &SceneDiff<String> {
        &self.last_diff
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
