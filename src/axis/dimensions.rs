use crate::axis::TickLabel;
use crate::core::{Bounds, TickValue};

/// Measured box of one tick label, re-derived after every label mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct TickDimension {
    pub key: TickValue,
    /// Index into the owning label list.
    pub label_index: usize,
    pub width: f64,
    pub height: f64,
    pub bounds: Bounds,
    /// Extent along the axis direction.
    pub start: f64,
    pub end: f64,
}

impl TickDimension {
    #[must_use]
    pub fn from_label(label: &TickLabel, label_index: usize, horizontal: bool) -> Self {
        let bounds = label.bounds();
        let (start, end) = if horizontal {
            (bounds.left, bounds.right)
        } else {
            (bounds.top, bounds.bottom)
        };
        Self {
            key: label.value.clone(),
            label_index,
            width: bounds.width(),
            height: bounds.height(),
            bounds,
            start,
            end,
        }
    }

    #[must_use]
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// Dimensions of the visible labels, sorted by position along the axis.
#[must_use]
pub fn tick_dimensions(labels: &[TickLabel], horizontal: bool) -> Vec<TickDimension> {
    let mut dims: Vec<TickDimension> = labels
        .iter()
        .enumerate()
        .filter(|(_, label)| label.is_visible())
        .map(|(index, label)| TickDimension::from_label(label, index, horizontal))
        .collect();
    dims.sort_by(|a, b| a.center().total_cmp(&b.center()));
    dims
}
