use tracing::debug;

use crate::core::ChartData;
use crate::error::ChartResult;
use crate::render::{HeuristicTextMeasurer, Renderer, SceneDiff};

use super::{Chart, ChartConfig, ChartKind, Dispatcher};

impl<R: Renderer> Chart<R> {
    /// Creates a chart of `kind` with the kind's default painter and a
    /// font-independent text measurer.
    pub fn new(renderer: R, kind: ChartKind, config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;
        debug!(
            %kind,
            width = config.viewport.width,
            height = config.viewport.height,
            "create chart"
        );
        Ok(Self {
            renderer,
            kind,
            painter: kind.default_painter(),
            config,
            data: ChartData::default(),
            measurer: Box::new(HeuristicTextMeasurer),
            dispatcher: Dispatcher::new(),
            active: Vec::new(),
            style: None,
            previous_keys: Vec::new(),
            last_diff: SceneDiff::default(),
            last_report: None,
            last_outcome: None,
        })
    }

    /// Creates a chart from a string tag such as `"multibar"` or `"line"`.
    pub fn from_tag(renderer: R, tag: &str, config: ChartConfig) -> ChartResult<Self> {
        Self::new(renderer, tag.parse()?, config)
    }

    /// Builder-style data attachment.
    pub fn with_data(mut self, data: ChartData) -> ChartResult<Self> {
        self.set_data(data)?;
        Ok(self)
    }
}
