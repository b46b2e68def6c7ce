use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::axis::DEFAULT_ROTATION_DEG;
use crate::core::TickValue;
use crate::error::{ChartError, ChartResult};

/// Where the axis sits relative to the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisOrientation {
    Top,
    Bottom,
    Left,
    Right,
}

impl AxisOrientation {
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// `+1` when labels grow away from the plot in positive screen direction
    /// (bottom, right), `-1` otherwise.
    #[must_use]
    pub fn outward_sign(self) -> f64 {
        match self {
            Self::Bottom | Self::Right => 1.0,
            Self::Top | Self::Left => -1.0,
        }
    }
}

/// Reading direction of the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    #[must_use]
    pub fn is_rtl(self) -> bool {
        self == Self::Rtl
    }
}

/// Formats a tick value; the second argument is the tick index.
#[derive(Clone)]
pub struct TickFormatter(Arc<dyn Fn(&TickValue, usize) -> String + Send + Sync>);

impl TickFormatter {
    pub fn new(f: impl Fn(&TickValue, usize) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    #[must_use]
    pub fn format(&self, value: &TickValue, index: usize) -> String {
        (self.0)(value, index)
    }
}

impl fmt::Debug for TickFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TickFormatter(..)")
    }
}

/// Declarative description of one axis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisConfig {
    pub orientation: AxisOrientation,
    /// Approximate number of ticks for continuous scales.
    pub tick_count: usize,
    /// Explicit tick values; overrides `tick_count` for continuous scales.
    pub tick_values: Option<Vec<f64>>,
    #[serde(skip)]
    pub value_formatter: Option<TickFormatter>,
    /// Render the domain extremes as independent end labels.
    pub show_max_min: bool,
    pub highlight_zero: bool,
    /// Fallback rotation angle in degrees.
    pub rotate_ticks: f64,
    pub stagger_ticks: bool,
    pub wrap_ticks: bool,
    pub direction: Direction,
    pub tick_size: f64,
    pub tick_padding: f64,
    /// Minimum free space between adjacent labels.
    pub label_gap: f64,
    pub font_size_px: f64,
    pub show_grid: bool,
    pub show_domain: bool,
    /// Optional axis title.
    pub axis_label: Option<String>,
    pub axis_label_distance: f64,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self::new(AxisOrientation::Bottom)
    }
}

impl AxisConfig {
    #[must_use]
    pub fn new(orientation: AxisOrientation) -> Self {
        Self {
            orientation,
            tick_count: 5,
            tick_values: None,
            value_formatter: None,
            show_max_min: false,
            highlight_zero: true,
            rotate_ticks: DEFAULT_ROTATION_DEG,
            stagger_ticks: false,
            wrap_ticks: false,
            direction: Direction::Ltr,
            tick_size: 4.0,
            tick_padding: 4.0,
            label_gap: 4.0,
            font_size_px: 12.0,
            show_grid: false,
            show_domain: true,
            axis_label: None,
            axis_label_distance: 12.0,
        }
    }

    #[must_use]
    pub fn bottom() -> Self {
        Self::new(AxisOrientation::Bottom)
    }

    #[must_use]
    pub fn top() -> Self {
        Self::new(AxisOrientation::Top)
    }

    #[must_use]
    pub fn left() -> Self {
        Self::new(AxisOrientation::Left)
    }

    #[must_use]
    pub fn right() -> Self {
        Self::new(AxisOrientation::Right)
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: AxisOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    #[must_use]
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    #[must_use]
    pub fn with_tick_values(mut self, values: Vec<f64>) -> Self {
        self.tick_values = Some(values);
        self
    }

    #[must_use]
    pub fn with_value_formatter(
        mut self,
        f: impl Fn(&TickValue, usize) -> String + Send + Sync + 'static,
    ) -> Self {
        self.value_formatter = Some(TickFormatter::new(f));
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: TickFormatter) -> Self {
        self.value_formatter = Some(formatter);
        self
    }

    #[must_use]
    pub fn with_show_max_min(mut self, show: bool) -> Self {
        self.show_max_min = show;
        self
    }

    #[must_use]
    pub fn with_highlight_zero(mut self, highlight: bool) -> Self {
        self.highlight_zero = highlight;
        self
    }

    #[must_use]
    pub fn with_rotate_ticks(mut self, angle_deg: f64) -> Self {
        self.rotate_ticks = angle_deg;
        self
    }

    #[must_use]
    pub fn with_stagger_ticks(mut self, stagger: bool) -> Self {
        self.stagger_ticks = stagger;
        self
    }

    #[must_use]
    pub fn with_wrap_ticks(mut self, wrap: bool) -> Self {
        self.wrap_ticks = wrap;
        self
    }

    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub fn with_tick_size(mut self, tick_size: f64) -> Self {
        self.tick_size = tick_size;
        self
    }

    #[must_use]
    pub fn with_tick_padding(mut self, tick_padding: f64) -> Self {
        self.tick_padding = tick_padding;
        self
    }

    #[must_use]
    pub fn with_label_gap(mut self, gap: f64) -> Self {
        self.label_gap = gap;
        self
    }

    #[must_use]
    pub fn with_font_size(mut self, font_size_px: f64) -> Self {
        self.font_size_px = font_size_px;
        self
    }

    #[must_use]
    pub fn with_grid(mut self, show: bool) -> Self {
        self.show_grid = show;
        self
    }

    #[must_use]
    pub fn with_domain(mut self, show: bool) -> Self {
        self.show_domain = show;
        self
    }

    #[must_use]
    pub fn with_axis_label(mut self, label: impl Into<String>) -> Self {
        self.axis_label = Some(label.into());
        self
    }

    /// Formats a tick with the configured formatter, or the value's plain rendering.
    #[must_use]
    pub fn format_tick(&self, value: &TickValue, index: usize) -> String {
        match &self.value_formatter {
            Some(formatter) => formatter.format(value, index),
            None => value.default_label(),
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "axis font size must be finite and > 0".to_owned(),
            ));
        }
        for (name, value) in [
            ("tick_size", self.tick_size),
            ("tick_padding", self.tick_padding),
            ("label_gap", self.label_gap),
            ("axis_label_distance", self.axis_label_distance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "axis `{name}` must be finite and >= 0"
                )));
            }
        }
        if !self.rotate_ticks.is_finite() {
            return Err(ChartError::InvalidConfig(
                "axis rotation angle must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisConfig, AxisOrientation, Direction};
    use crate::core::TickValue;

    #[test]
    fn config_deserializes_with_defaults() {
        let config: AxisConfig =
            serde_json::from_str(r#"{"orientation": "left", "wrap_ticks": true, "direction": "rtl"}"#)
                .expect("parse");
        assert_eq!(config.orientation, AxisOrientation::Left);
        assert!(config.wrap_ticks);
        assert_eq!(config.direction, Direction::Rtl);
        assert_eq!(config.rotate_ticks, 30.0);
        assert!(config.value_formatter.is_none());
    }

    #[test]
    fn formatter_receives_value_and_index() {
        let config = AxisConfig::bottom()
            .with_value_formatter(|value, index| format!("{index}:{}", value.default_label()));
        assert_eq!(config.format_tick(&TickValue::Number(2.0), 3), "3:2");
        assert_eq!(AxisConfig::bottom().format_tick(&TickValue::Number(2.5), 0), "2.5");
    }

    #[test]
    fn negative_padding_is_rejected() {
        assert!(AxisConfig::left().with_tick_padding(-1.0).validate().is_err());
        assert!(AxisConfig::left().validate().is_ok());
    }
}
