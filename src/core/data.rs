use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// An `x` value as it arrives from the host: numeric (or epoch millis) or categorical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Datum {
    Number(f64),
    Text(String),
}

impl Datum {
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(_) => None,
        }
    }

    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Number(value) => format!("{value}"),
            Self::Text(text) => text.clone(),
        }
    }
}

/// One plotted value. Deserializes from either `{"x": .., "y": ..}` or `[x, y]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSeriesValue")]
pub struct SeriesValue {
    pub x: Datum,
    pub y: f64,
    /// Optional bubble size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

impl SeriesValue {
    #[must_use]
    pub fn new(x: impl Into<Datum>, y: f64) -> Self {
        Self {
            x: x.into(),
            y,
            size: None,
        }
    }

    #[must_use]
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSeriesValue {
    Object {
        x: Datum,
        y: f64,
        #[serde(default)]
        size: Option<f64>,
    },
    Pair(Datum, f64),
}

impl From<RawSeriesValue> for SeriesValue {
    fn from(raw: RawSeriesValue) -> Self {
        match raw {
            RawSeriesValue::Object { x, y, size } => Self { x, y, size },
            RawSeriesValue::Pair(x, y) => Self { x, y, size: None },
        }
    }
}

impl From<f64> for Datum {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Datum {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Datum {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A named group of values drawn as one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub key: String,
    #[serde(default)]
    pub values: Vec<SeriesValue>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classes: Option<String>,
}

impl Series {
    #[must_use]
    pub fn new(key: impl Into<String>, values: Vec<SeriesValue>) -> Self {
        Self {
            key: key.into(),
            values,
            disabled: false,
            color: None,
            classes: None,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// One categorical group declared in `properties.groups`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub group: Datum,
    #[serde(default)]
    pub label: Option<String>,
}

/// Data type hint steering scale and formatter selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    #[default]
    Numeric,
    Datetime,
    Ordinal,
    Currency,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartProperties {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub x_data_type: Option<DataType>,
    #[serde(default)]
    pub y_data_type: Option<DataType>,
    #[serde(default)]
    pub groups: Vec<Group>,
    /// Any property the library does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Normalized chart input: `{ properties, data: [series] }`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(default)]
    pub properties: ChartProperties,
    #[serde(default)]
    pub data: Vec<Series>,
}

impl ChartData {
    #[must_use]
    pub fn new(data: Vec<Series>) -> Self {
        Self {
            properties: ChartProperties::default(),
            data,
        }
    }

    pub fn from_json_str(json: &str) -> ChartResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.properties.title = Some(title.into());
        self
    }

    pub fn enabled_series(&self) -> impl Iterator<Item = &Series> {
        self.data.iter().filter(|series| !series.disabled)
    }

    /// True when nothing would be drawn: no enabled series, or every value is zero
    /// or non-finite.
    #[must_use]
    pub fn is_empty_or_zero(&self) -> bool {
        !self
            .enabled_series()
            .flat_map(|series| series.values.iter())
            .any(|value| value.y.is_finite() && value.y != 0.0)
    }

    /// Keys that data values are matched against, in display order.
    ///
    /// Declared `properties.groups` win; otherwise every distinct `x` in
    /// first-seen order.
    #[must_use]
    pub fn category_keys(&self) -> Vec<String> {
        if !self.properties.groups.is_empty() {
            return self
                .properties
                .groups
                .iter()
                .map(|g| g.group.label())
                .collect();
        }
        let mut out: Vec<String> = Vec::new();
        for value in self.data.iter().flat_map(|s| s.values.iter()) {
            let label = value.x.label();
            if !out.contains(&label) {
                out.push(label);
            }
        }
        out
    }

    /// Display labels, index-aligned with [`Self::category_keys`].
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        if self.properties.groups.is_empty() {
            return self.category_keys();
        }
        self.properties
            .groups
            .iter()
            .map(|g| g.label.clone().unwrap_or_else(|| g.group.label()))
            .collect()
    }

    /// Whether every `x` in the data is numeric.
    #[must_use]
    pub fn has_numeric_x(&self) -> bool {
        self.data
            .iter()
            .flat_map(|s| s.values.iter())
            .all(|value| value.x.as_number().is_some())
    }

    pub fn validate(&self) -> ChartResult<()> {
        for series in &self.data {
            if series.key.trim().is_empty() {
                return Err(ChartError::InvalidData(
                    "series key must not be empty".to_owned(),
                ));
            }
        }
        Ok(())
    }
}
