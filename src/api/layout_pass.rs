use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::axis::{AxisConfig, AxisLayout, LabelStrategy};
use crate::core::{Margin, Scale};
use crate::error::ChartResult;
use crate::render::TextMeasurer;

/// How a render ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RenderOutcome {
    Rendered,
    NoData,
    InsufficientSpace,
}

/// Inner margin and plot size after one Y-then-X layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PassRecord {
    pub pass: usize,
    pub margin: Margin,
    pub inner_width: f64,
    pub inner_height: f64,
}

/// What the margin passes produced, kept so instability stays observable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutReport {
    pub passes: Vec<PassRecord>,
    pub header_height: f64,
    pub inner_margin: Margin,
    pub inner_width: f64,
    pub inner_height: f64,
    pub x_strategy: Option<LabelStrategy>,
}

impl LayoutReport {
    /// Largest side-wise change between the last two passes.
    #[must_use]
    pub fn last_delta(&self) -> Option<f64> {
        match self.passes.as_slice() {
            [.., previous, last] => Some(previous.margin.max_delta(last.margin)),
            _ => None,
        }
    }

    /// Whether the last two passes agree within `tolerance` pixels.
    #[must_use]
    pub fn is_stable(&self, tolerance: f64) -> bool {
        self.last_delta().is_none_or(|delta| delta < tolerance)
    }
}

/// Scales and axes placed on the settled plot area, axis-local coordinates.
#[derive(Debug, Clone)]
pub struct PlotLayout {
    pub inner_margin: Margin,
    pub inner_width: f64,
    pub inner_height: f64,
    pub x_scale: Scale,
    pub y_scale: Scale,
    pub x_axis: AxisLayout,
    pub y_axis: AxisLayout,
}

/// Inputs shared by every pass.
pub(super) struct LayoutPassInput<'a> {
    pub available_width: f64,
    pub available_height: f64,
    pub passes: usize,
    pub x_config: &'a AxisConfig,
    pub y_config: &'a AxisConfig,
    pub x_scale: &'a Scale,
    pub y_scale: &'a Scale,
    /// Reverse the x range (right-to-left).
    pub x_reversed: bool,
    pub measurer: &'a dyn TextMeasurer,
}

impl LayoutPassInput<'_> {
    fn inner_size(&self, margin: Margin) -> (f64, f64) {
        (
            (self.available_width - margin.horizontal()).max(0.0),
            (self.available_height - margin.vertical()).max(0.0),
        )
    }

    fn layout_y(&self, inner_height: f64) -> ChartResult<(Scale, AxisLayout)> {
        let scale = self.y_scale.with_range((inner_height, 0.0))?;
        let axis = AxisLayout::compute(self.y_config, &scale, self.measurer)?;
        Ok((scale, axis))
    }

    fn layout_x(&self, inner_width: f64) -> ChartResult<(Scale, AxisLayout)> {
        let range = if self.x_reversed {
            (inner_width, 0.0)
        } else {
            (0.0, inner_width)
        };
        let scale = self.x_scale.with_range(range)?;
        let axis = AxisLayout::compute(self.x_config, &scale, self.measurer)?;
        Ok((scale, axis))
    }
}

/// Runs the fixed number of Y-then-X margin passes and places both axes on
/// the resulting plot area.
///
/// Each pass starts from the previous pass's margin: the Y axis is laid out on
/// the current inner height, its margin is merged with the last X margin, then
/// the X axis is laid out on the updated inner width. There is no early exit;
/// every pass is recorded.
pub(super) fn run_layout_passes(
    input: &LayoutPassInput<'_>,
) -> ChartResult<(PlotLayout, Vec<PassRecord>)> {
    let mut margin = Margin::default();
    let mut x_margin = Margin::default();
    let mut records = Vec::with_capacity(input.passes);

    for pass in 0..input.passes.max(1) {
        let (_, inner_height) = input.inner_size(margin);
        let (_, y_axis) = input.layout_y(inner_height)?;
        margin = y_axis.margin.max(x_margin);

        let (inner_width, _) = input.inner_size(margin);
        let (_, x_axis) = input.layout_x(inner_width)?;
        x_margin = x_axis.margin;
        margin = y_axis.margin.max(x_margin);

        let (inner_width, inner_height) = input.inner_size(margin);
        trace!(
            pass,
            top = margin.top,
            right = margin.right,
            bottom = margin.bottom,
            left = margin.left,
            "layout pass"
        );
        records.push(PassRecord {
            pass,
            margin,
            inner_width,
            inner_height,
        });
    }

    let (inner_width, inner_height) = input.inner_size(margin);
    let (y_scale, y_axis) = input.layout_y(inner_height)?;
    let (x_scale, x_axis) = input.layout_x(inner_width)?;

    if let [.., previous, last] = records.as_slice() {
        let delta = previous.margin.max_delta(last.margin);
        if delta >= 1.0 {
            debug!(delta, passes = records.len(), "axis margins still moving after final pass");
        }
    }

    Ok((
        PlotLayout {
            inner_margin: margin,
            inner_width,
            inner_height,
            x_scale,
            y_scale,
            x_axis,
            y_axis,
        },
        records,
    ))
}

#[cfg(test)]
mod tests {
    use super::{LayoutPassInput, LayoutReport, PassRecord, run_layout_passes};
    use crate::axis::AxisConfig;
    use crate::core::{Margin, Scale};
    use crate::render::MonospaceTextMeasurer;

    #[test]
    fn passes_are_recorded_and_settle() {
        let measurer = MonospaceTextMeasurer::new(7.0, 14.0);
        let categories: Vec<String> = ["Alpha", "Bravo", "Charlie", "Delta", "Echo"]
            .into_iter()
            .map(str::to_owned)
            .collect();
        let x_scale = Scale::band(categories, (0.0, 1.0)).expect("x");
        let y_scale = Scale::linear((0.0, 100.0), (1.0, 0.0)).expect("y");
        let x_config = AxisConfig::bottom();
        let y_config = AxisConfig::left();
        let input = LayoutPassInput {
            available_width: 480.0,
            available_height: 300.0,
            passes: 3,
            x_config: &x_config,
            y_config: &y_config,
            x_scale: &x_scale,
            y_scale: &y_scale,
            x_reversed: false,
            measurer: &measurer,
        };
        let (plot, records) = run_layout_passes(&input).expect("layout");

        assert_eq!(records.len(), 3);
        assert!(records[2].margin.max_delta(records[1].margin) < 1.0);
        assert_eq!(plot.inner_margin, records[2].margin);
        assert_eq!(plot.x_scale.range(), (0.0, plot.inner_width));
        assert!(plot.inner_margin.left > 0.0);
        assert!(plot.inner_margin.bottom > 0.0);
    }

    #[test]
    fn report_delta_needs_two_passes() {
        let record = |pass, left| PassRecord {
            pass,
            margin: Margin::new(0.0, 0.0, 0.0, left),
            inner_width: 0.0,
            inner_height: 0.0,
        };
        let mut report = LayoutReport::default();
        assert!(report.is_stable(1.0));
        report.passes = vec![record(0, 10.0), record(1, 12.5)];
        assert_eq!(report.last_delta(), Some(2.5));
        assert!(!report.is_stable(1.0));
    }
}
