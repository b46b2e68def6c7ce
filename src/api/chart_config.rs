use serde::{Deserialize, Serialize};

use crate::axis::{AxisConfig, AxisOrientation, Direction};
use crate::core::{Margin, Viewport};
use crate::error::{ChartError, ChartResult};

use super::ChartKind;

/// Passes above this are rejected; layouts settle long before.
pub const MAX_LAYOUT_PASSES: usize = 10;

/// Public chart configuration.
///
/// Serializable so hosts can persist chart setup next to the data; every
/// field has a default, so partial documents are accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub viewport: Viewport,
    /// Outer margin around everything the chart draws.
    pub margin: Margin,
    pub direction: Direction,
    /// Transition duration forwarded to animated backends.
    pub duration_ms: u32,
    pub delay_ms: u32,
    /// Overrides the chart kind's number of layout passes.
    pub layout_passes: Option<usize>,
    pub x_axis: AxisConfig,
    pub y_axis: AxisConfig,
    /// Title override; falls back to `properties.title` of the data.
    pub title: Option<String>,
    pub show_title: bool,
    pub show_legend: bool,
    pub title_font_size_px: f64,
    pub legend_font_size_px: f64,
    pub stacked: bool,
    /// Series colors used when a series has none of its own.
    pub palette: Vec<String>,
    pub no_data_message: String,
    pub insufficient_space_message: String,
    /// Plot heights below this render the insufficient-space message.
    pub min_inner_height: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::new(Viewport::new(960, 500))
    }
}

impl ChartConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            margin: Margin::uniform(10.0),
            direction: Direction::Ltr,
            duration_ms: 0,
            delay_ms: 0,
            layout_passes: None,
            x_axis: AxisConfig::bottom(),
            y_axis: AxisConfig::left(),
            title: None,
            show_title: true,
            show_legend: true,
            title_font_size_px: 16.0,
            legend_font_size_px: 12.0,
            stacked: false,
            palette: default_palette(),
            no_data_message: "No Data Available".to_owned(),
            insufficient_space_message: "Chart cannot be displayed".to_owned(),
            min_inner_height: 100.0,
        }
    }

    pub fn from_json_str(json: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    #[must_use]
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub fn with_transition(mut self, duration_ms: u32, delay_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self.delay_ms = delay_ms;
        self
    }

    #[must_use]
    pub fn with_layout_passes(mut self, passes: usize) -> Self {
        self.layout_passes = Some(passes);
        self
    }

    #[must_use]
    pub fn with_x_axis(mut self, axis: AxisConfig) -> Self {
        self.x_axis = axis;
        self
    }

    #[must_use]
    pub fn with_y_axis(mut self, axis: AxisConfig) -> Self {
        self.y_axis = axis;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_show_title(mut self, show: bool) -> Self {
        self.show_title = show;
        self
    }

    #[must_use]
    pub fn with_show_legend(mut self, show: bool) -> Self {
        self.show_legend = show;
        self
    }

    #[must_use]
    pub fn with_stacked(mut self, stacked: bool) -> Self {
        self.stacked = stacked;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Vec<String>) -> Self {
        self.palette = palette;
        self
    }

    #[must_use]
    pub fn with_no_data_message(mut self, message: impl Into<String>) -> Self {
        self.no_data_message = message.into();
        self
    }

    #[must_use]
    pub fn with_min_inner_height(mut self, height: f64) -> Self {
        self.min_inner_height = height;
        self
    }

    /// Layout passes for `kind`, honoring the override.
    #[must_use]
    pub fn layout_passes_for(&self, kind: ChartKind) -> usize {
        self.layout_passes.unwrap_or_else(|| kind.layout_passes())
    }

    /// Axis configs as the chart lays them out: orientations forced to the
    /// plot edges, mirrored for right-to-left, and the chart direction applied.
    #[must_use]
    pub fn effective_axes(&self) -> (AxisConfig, AxisConfig) {
        let mut x = self.x_axis.clone();
        let mut y = self.y_axis.clone();
        if !x.orientation.is_horizontal() {
            x.orientation = AxisOrientation::Bottom;
        }
        if y.orientation.is_horizontal() {
            y.orientation = AxisOrientation::Left;
        }
        if self.direction.is_rtl() {
            y.orientation = match y.orientation {
                AxisOrientation::Left => AxisOrientation::Right,
                _ => AxisOrientation::Left,
            };
        }
        x.direction = self.direction;
        y.direction = self.direction;
        (x, y)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        let margin = self.margin;
        if !margin.is_finite()
            || margin.top < 0.0
            || margin.right < 0.0
            || margin.bottom < 0.0
            || margin.left < 0.0
        {
            return Err(ChartError::InvalidConfig(
                "chart margin must be finite and >= 0".to_owned(),
            ));
        }
        if let Some(passes) = self.layout_passes {
            if passes == 0 || passes > MAX_LAYOUT_PASSES {
                return Err(ChartError::InvalidConfig(format!(
                    "layout passes must be in 1..={MAX_LAYOUT_PASSES}, got {passes}"
                )));
            }
        }
        for (name, size) in [
            ("title_font_size_px", self.title_font_size_px),
            ("legend_font_size_px", self.legend_font_size_px),
        ] {
            if !size.is_finite() || size <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "`{name}` must be finite and > 0"
                )));
            }
        }
        if !self.min_inner_height.is_finite() || self.min_inner_height < 0.0 {
            return Err(ChartError::InvalidConfig(
                "min inner height must be finite and >= 0".to_owned(),
            ));
        }
        if self.palette.is_empty() {
            return Err(ChartError::InvalidConfig(
                "palette must contain at least one color".to_owned(),
            ));
        }
        self.x_axis.validate()?;
        self.y_axis.validate()
    }
}

fn default_palette() -> Vec<String> {
    [
        "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
        "#bcbd22", "#17becf",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::ChartConfig;
    use crate::api::ChartKind;
    use crate::axis::{AxisOrientation, Direction};

    #[test]
    fn partial_json_fills_defaults() {
        let config = ChartConfig::from_json_str(
            r#"{"viewport": {"width": 400, "height": 300}, "layout_passes": 2, "x_axis": {"wrap_ticks": true}}"#,
        )
        .expect("config");
        assert_eq!(config.viewport.width, 400);
        assert_eq!(config.layout_passes_for(ChartKind::Bar), 2);
        assert!(config.x_axis.wrap_ticks);
        assert_eq!(config.no_data_message, "No Data Available");
    }

    #[test]
    fn out_of_range_passes_are_rejected() {
        assert!(ChartConfig::default().with_layout_passes(0).validate().is_err());
        assert!(ChartConfig::default().with_layout_passes(11).validate().is_err());
        assert_eq!(ChartConfig::default().layout_passes_for(ChartKind::Line), 4);
    }

    #[test]
    fn rtl_moves_value_axis_to_the_right() {
        let (x, y) = ChartConfig::default()
            .with_direction(Direction::Rtl)
            .effective_axes();
        assert_eq!(y.orientation, AxisOrientation::Right);
        assert_eq!(x.orientation, AxisOrientation::Bottom);
        assert_eq!(x.direction, Direction::Rtl);
    }
}
