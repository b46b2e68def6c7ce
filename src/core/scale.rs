use serde::{Deserialize, Serialize};

use crate::core::ticks::{nice_ticks, nice_time_ticks};
use crate::error::{ChartError, ChartResult};

/// Scale family, as declared by chart configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKind {
    Linear,
    Time,
    Band,
    Ordinal,
}

/// One tick's underlying data value.
#[derive(Debug, Clone, PartialEq)]
pub enum TickValue {
    Number(f64),
    Category { index: usize, label: String },
}

impl TickValue {
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Category { .. } => None,
        }
    }

    /// Plain rendering used when no formatter is configured.
    #[must_use]
    pub fn default_label(&self) -> String {
        match self {
            Self::Number(value) => {
                if value.fract() == 0.0 && value.abs() < 1e15 {
                    format!("{value:.0}")
                } else {
                    format!("{value}")
                }
            }
            Self::Category { label, .. } => label.clone(),
        }
    }
}

/// Continuous mapping from a numeric domain to a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinuousScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ContinuousScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() || domain.0 == domain.1 {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        validate_range(range)?;
        Ok(Self { domain, range })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.domain
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.range
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }
}

/// Discrete mapping from ordered categories to evenly spaced bands.
///
/// An ordinal (point) scale is a band scale whose inner padding is `1`, so
/// every band collapses to a point.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    categories: Vec<String>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
}

impl BandScale {
    pub fn new(categories: Vec<String>, range: (f64, f64)) -> ChartResult<Self> {
        if categories.is_empty() {
            return Err(ChartError::InvalidData(
                "band scale requires at least one category".to_owned(),
            ));
        }
        validate_range(range)?;
        Ok(Self {
            categories,
            range,
            padding_inner: 0.1,
            padding_outer: 0.1,
        })
    }

    /// Point-scale flavor (zero-width bands, half-step outer padding).
    pub fn points(categories: Vec<String>, range: (f64, f64)) -> ChartResult<Self> {
        Ok(Self::new(categories, range)?.with_padding(1.0, 0.5))
    }

    #[must_use]
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.clamp(0.0, 1.0);
        self.padding_outer = outer.max(0.0);
        self
    }

    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Signed distance between the starts of two adjacent bands.
    #[must_use]
    pub fn signed_step(&self) -> f64 {
        let n = self.categories.len() as f64;
        let slots = n - self.padding_inner + 2.0 * self.padding_outer;
        if slots <= 0.0 {
            return self.range.1 - self.range.0;
        }
        (self.range.1 - self.range.0) / slots
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.signed_step().abs()
    }

    #[must_use]
    pub fn band_width(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    /// Leading edge of the band at `index`.
    #[must_use]
    pub fn position(&self, index: usize) -> f64 {
        let step = self.signed_step();
        let lead = self.range.0 + step * self.padding_outer + step * index as f64;
        if step < 0.0 {
            lead - self.band_width()
        } else {
            lead
        }
    }

    #[must_use]
    pub fn center(&self, index: usize) -> f64 {
        self.position(index) + 0.5 * self.band_width()
    }
}

/// A scale instance with a concrete pixel range.
#[derive(Debug, Clone, PartialEq)]
pub enum Scale {
    Linear(ContinuousScale),
    Time(ContinuousScale),
    Band(BandScale),
    Ordinal(BandScale),
}

impl Scale {
    pub fn linear(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        Ok(Self::Linear(ContinuousScale::new(domain, range)?))
    }

    pub fn time(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        Ok(Self::Time(ContinuousScale::new(domain, range)?))
    }

    pub fn band(categories: Vec<String>, range: (f64, f64)) -> ChartResult<Self> {
        Ok(Self::Band(BandScale::new(categories, range)?))
    }

    pub fn ordinal(categories: Vec<String>, range: (f64, f64)) -> ChartResult<Self> {
        Ok(Self::Ordinal(BandScale::points(categories, range)?))
    }

    #[must_use]
    pub fn kind(&self) -> ScaleKind {
        match self {
            Self::Linear(_) => ScaleKind::Linear,
            Self::Time(_) => ScaleKind::Time,
            Self::Band(_) => ScaleKind::Band,
            Self::Ordinal(_) => ScaleKind::Ordinal,
        }
    }

    #[must_use]
    pub fn is_continuous(&self) -> bool {
        matches!(self, Self::Linear(_) | Self::Time(_))
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        match self {
            Self::Linear(s) | Self::Time(s) => s.range(),
            Self::Band(s) | Self::Ordinal(s) => s.range(),
        }
    }

    /// Range as `(low, high)` regardless of direction.
    #[must_use]
    pub fn range_extent(&self) -> (f64, f64) {
        let (r0, r1) = self.range();
        (r0.min(r1), r0.max(r1))
    }

    /// Returns the same scale mapped onto a new pixel range.
    pub fn with_range(&self, range: (f64, f64)) -> ChartResult<Self> {
        validate_range(range)?;
        Ok(match self {
            Self::Linear(s) => Self::Linear(ContinuousScale { range, ..*s }),
            Self::Time(s) => Self::Time(ContinuousScale { range, ..*s }),
            Self::Band(s) => Self::Band(BandScale {
                range,
                ..s.clone()
            }),
            Self::Ordinal(s) => Self::Ordinal(BandScale {
                range,
                ..s.clone()
            }),
        })
    }

    #[must_use]
    pub fn continuous_domain(&self) -> Option<(f64, f64)> {
        match self {
            Self::Linear(s) | Self::Time(s) => Some(s.domain()),
            Self::Band(_) | Self::Ordinal(_) => None,
        }
    }

    /// Pixel position for a tick value. Categories map to their band centers.
    #[must_use]
    pub fn position(&self, value: &TickValue) -> f64 {
        match (self, value) {
            (Self::Linear(s) | Self::Time(s), TickValue::Number(v)) => s.map(*v),
            (Self::Band(s) | Self::Ordinal(s), TickValue::Category { index, .. }) => {
                s.center(*index)
            }
            (Self::Band(s) | Self::Ordinal(s), TickValue::Number(v)) => {
                s.center(v.max(0.0).round() as usize)
            }
            (Self::Linear(s) | Self::Time(s), TickValue::Category { index, .. }) => {
                s.map(*index as f64)
            }
        }
    }

    /// Tick values for this scale; categorical scales tick every category.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<TickValue> {
        match self {
            Self::Linear(s) => {
                let (d0, d1) = s.domain();
                nice_ticks(d0, d1, count)
                    .into_iter()
                    .map(TickValue::Number)
                    .collect()
            }
            Self::Time(s) => {
                let (d0, d1) = s.domain();
                nice_time_ticks(d0, d1, count)
                    .into_iter()
                    .map(TickValue::Number)
                    .collect()
            }
            Self::Band(s) | Self::Ordinal(s) => s
                .categories()
                .iter()
                .enumerate()
                .map(|(index, label)| TickValue::Category {
                    index,
                    label: label.clone(),
                })
                .collect(),
        }
    }

    /// Band step for categorical scales.
    #[must_use]
    pub fn step(&self) -> Option<f64> {
        match self {
            Self::Band(s) | Self::Ordinal(s) => Some(s.step()),
            Self::Linear(_) | Self::Time(_) => None,
        }
    }

    #[must_use]
    pub fn band_width(&self) -> f64 {
        match self {
            Self::Band(s) | Self::Ordinal(s) => s.band_width(),
            Self::Linear(_) | Self::Time(_) => 0.0,
        }
    }
}

fn validate_range(range: (f64, f64)) -> ChartResult<()> {
    if !range.0.is_finite() || !range.1.is_finite() {
        return Err(ChartError::InvalidData(
            "scale range must be finite".to_owned(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{BandScale, Scale, TickValue};

    fn months(n: usize) -> Vec<String> {
        ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul"]
            .iter()
            .take(n)
            .map(|s| (*s).to_owned())
            .collect()
    }

    #[test]
    fn band_scale_centers_are_evenly_spaced() {
        let scale = BandScale::new(months(4), (0.0, 410.0)).expect("band");
        assert_relative_eq!(scale.step(), 100.0);
        assert_relative_eq!(scale.band_width(), 90.0);
        assert_relative_eq!(scale.center(0), 55.0);
        assert_relative_eq!(scale.center(3), 355.0);
    }

    #[test]
    fn reversed_band_scale_mirrors_positions() {
        let forward = BandScale::new(months(3), (0.0, 300.0)).expect("band");
        let reversed = BandScale::new(months(3), (300.0, 0.0)).expect("band");
        assert_relative_eq!(forward.center(0), 300.0 - reversed.center(0));
        assert_relative_eq!(forward.center(2), 300.0 - reversed.center(2));
    }

    #[test]
    fn ordinal_scale_places_points_with_half_step_padding() {
        let scale = Scale::ordinal(months(3), (0.0, 300.0)).expect("ordinal");
        assert_relative_eq!(scale.step().expect("step"), 100.0);
        assert_relative_eq!(scale.band_width(), 0.0);
        let first = TickValue::Category {
            index: 0,
            label: "Jan".to_owned(),
        };
        assert_relative_eq!(scale.position(&first), 50.0);
    }

    #[test]
    fn with_range_keeps_domain() {
        let scale = Scale::linear((0.0, 10.0), (0.0, 100.0)).expect("linear");
        let moved = scale.with_range((100.0, 0.0)).expect("range");
        assert_eq!(moved.continuous_domain(), Some((0.0, 10.0)));
        assert_relative_eq!(moved.position(&TickValue::Number(2.5)), 75.0);
    }

    #[test]
    fn degenerate_continuous_domain_is_rejected() {
        assert!(Scale::linear((1.0, 1.0), (0.0, 10.0)).is_err());
        assert!(Scale::band(Vec::new(), (0.0, 10.0)).is_err());
    }
}
