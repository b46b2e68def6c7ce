use tracing::warn;

use crate::core::ticks::nice_domain;
use crate::core::{ChartData, DataType, Scale};
use crate::error::ChartResult;

use super::ChartKind;

/// Unit-range scales derived from the data; the layout passes assign ranges.
#[derive(Debug, Clone)]
pub(super) struct DataScales {
    pub x: Scale,
    pub y: Scale,
    /// Match keys for data values, index-aligned with the x scale's labels.
    pub category_keys: Vec<String>,
}

pub(super) fn build_scales(
    kind: ChartKind,
    data: &ChartData,
    stacked: bool,
    y_tick_count: usize,
) -> ChartResult<DataScales> {
    let labels = data.categories();
    let category_keys = data.category_keys();
    let declared_x = data.properties.x_data_type;
    let categorical_x = kind == ChartKind::Bar
        || declared_x == Some(DataType::Ordinal)
        || !data.has_numeric_x();

    let x = if categorical_x {
        if kind == ChartKind::Bar {
            Scale::band(labels, (0.0, 1.0))?
        } else {
            Scale::ordinal(labels, (0.0, 1.0))?
        }
    } else {
        let (lo, hi) = widen(finite_extent(
            data.enabled_series()
                .flat_map(|series| series.values.iter())
                .filter_map(|value| value.x.as_number()),
            "x",
        ));
        if declared_x == Some(DataType::Datetime) {
            Scale::time((lo, hi), (0.0, 1.0))?
        } else {
            Scale::linear((lo, hi), (0.0, 1.0))?
        }
    };

    let (lo, hi) = y_extent(kind, data, stacked, &category_keys);
    let (lo, hi) = widen((lo, hi));
    let (lo, hi) = nice_domain(lo, hi, y_tick_count.max(1));
    let y = Scale::linear((lo, hi), (1.0, 0.0))?;

    Ok(DataScales {
        x,
        y,
        category_keys,
    })
}

fn y_extent(kind: ChartKind, data: &ChartData, stacked: bool, category_keys: &[String]) -> (f64, f64) {
    let includes_zero = matches!(kind, ChartKind::Bar | ChartKind::Area);
    let (lo, hi) = if stacked && includes_zero {
        stacked_extent(kind, data, category_keys)
    } else {
        finite_extent(
            data.enabled_series()
                .flat_map(|series| series.values.iter())
                .map(|value| value.y),
            "y",
        )
    };
    if includes_zero {
        (lo.min(0.0), hi.max(0.0))
    } else {
        (lo, hi)
    }
}

// Bars stack per category; areas per point index.
fn stacked_extent(kind: ChartKind, data: &ChartData, category_keys: &[String]) -> (f64, f64) {
    let mut positive: Vec<f64> = Vec::new();
    let mut negative: Vec<f64> = Vec::new();
    for series in data.enabled_series() {
        for (point_index, value) in series.values.iter().enumerate() {
            if !value.y.is_finite() {
                continue;
            }
            let slot = if kind == ChartKind::Bar {
                let label = value.x.label();
                match category_keys.iter().position(|c| *c == label) {
                    Some(index) => index,
                    None => continue,
                }
            } else {
                point_index
            };
            if positive.len() <= slot {
                positive.resize(slot + 1, 0.0);
                negative.resize(slot + 1, 0.0);
            }
            if value.y >= 0.0 {
                positive[slot] += value.y;
            } else {
                negative[slot] += value.y;
            }
        }
    }
    let hi = positive.iter().copied().fold(0.0, f64::max);
    let lo = negative.iter().copied().fold(0.0, f64::min);
    (lo, hi)
}

fn finite_extent(values: impl Iterator<Item = f64>, axis: &str) -> (f64, f64) {
    let mut skipped = 0_usize;
    let mut extent: Option<(f64, f64)> = None;
    for value in values {
        if !value.is_finite() {
            skipped += 1;
            continue;
        }
        extent = Some(match extent {
            Some((lo, hi)) => (lo.min(value), hi.max(value)),
            None => (value, value),
        });
    }
    if skipped > 0 {
        warn!(axis, skipped, "skipping non-finite values in scale domain");
    }
    extent.unwrap_or((0.0, 1.0))
}

fn widen((lo, hi): (f64, f64)) -> (f64, f64) {
    if lo == hi {
        if lo == 0.0 { (0.0, 1.0) } else { (lo - lo.abs() * 0.5, hi + hi.abs() * 0.5) }
    } else {
        (lo, hi)
    }
}
