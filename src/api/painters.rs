use crate::core::{Bounds, ChartData, Datum, Scale, Series, TickValue};
use crate::error::{ChartError, ChartResult};
use crate::render::{CirclePrimitive, Color, PolylinePrimitive, RectPrimitive, RenderFrame};

/// Everything a painter needs once the layout passes have settled.
#[derive(Debug, Clone, Copy)]
pub struct PaintContext<'a> {
    pub data: &'a ChartData,
    /// Inner plot area in screen coordinates.
    pub plot: Bounds,
    /// X scale over `0..plot.width()` (reversed for right-to-left).
    pub x_scale: Option<&'a Scale>,
    /// Y scale over `plot.height()..0`.
    pub y_scale: Option<&'a Scale>,
    /// Category match keys, index-aligned with the band scale's labels.
    pub category_keys: &'a [String],
    /// Resolved color per series, indexed like `data.data`.
    pub colors: &'a [Color],
    pub stacked: bool,
}

impl PaintContext<'_> {
    fn scales(&self, painter: &str) -> ChartResult<(&Scale, &Scale)> {
        match (self.x_scale, self.y_scale) {
            (Some(x), Some(y)) => Ok((x, y)),
            _ => Err(ChartError::InvalidConfig(format!(
                "`{painter}` painter requires cartesian scales"
            ))),
        }
    }

    fn enabled(&self) -> impl Iterator<Item = (usize, &Series)> {
        self.data
            .data
            .iter()
            .enumerate()
            .filter(|(_, series)| !series.disabled)
    }

    fn color(&self, series_index: usize) -> Color {
        self.colors
            .get(series_index)
            .copied()
            .unwrap_or(Color::BLACK)
    }

    fn x_position(&self, scale: &Scale, x: &Datum) -> Option<f64> {
        if scale.is_continuous() {
            let value = x.as_number().filter(|v| v.is_finite())?;
            return Some(scale.position(&TickValue::Number(value)));
        }
        let label = x.label();
        let index = self.category_keys.iter().position(|c| *c == label)?;
        Some(scale.position(&TickValue::Category { index, label }))
    }

    fn category_index(&self, x: &Datum) -> Option<usize> {
        let label = x.label();
        self.category_keys.iter().position(|c| *c == label)
    }

    fn to_screen(&self, x: f64, y: f64) -> (f64, f64) {
        (self.plot.left + x, self.plot.top + y)
    }
}

/// Draws data series into a frame once axes have settled.
pub trait SeriesPainter {
    fn name(&self) -> &'static str;
    fn paint(&self, ctx: &PaintContext<'_>, frame: &mut RenderFrame) -> ChartResult<()>;
}

/// Grouped or stacked vertical bars on a band x scale.
#[derive(Debug, Clone, Copy, Default)]
pub struct BarPainter;

impl SeriesPainter for BarPainter {
    fn name(&self) -> &'static str {
        "bar"
    }

    fn paint(&self, ctx: &PaintContext<'_>, frame: &mut RenderFrame) -> ChartResult<()> {
        let (x_scale, y_scale) = ctx.scales(self.name())?;
        let enabled: Vec<(usize, &Series)> = ctx.enabled().collect();
        if enabled.is_empty() {
            return Ok(());
        }
        let band = x_scale.band_width().max(1.0);
        let zero = y_scale.position(&TickValue::Number(0.0));
        // Running positive/negative totals per category for stacking.
        let mut stacks = vec![(0.0_f64, 0.0_f64); ctx.category_keys.len()];

        for (slot, (series_index, series)) in enabled.iter().enumerate() {
            let fill = ctx.color(*series_index);
            for value in series.values.iter().filter(|v| v.y.is_finite()) {
                let Some(center) = ctx.x_position(x_scale, &value.x) else {
                    continue;
                };
                let (x, width, base, top) = if ctx.stacked {
                    let Some(stack) = ctx
                        .category_index(&value.x)
                        .and_then(|index| stacks.get_mut(index))
                    else {
                        continue;
                    };
                    let running = if value.y >= 0.0 {
                        &mut stack.0
                    } else {
                        &mut stack.1
                    };
                    let base = *running;
                    *running += value.y;
                    (center - band / 2.0, band, base, *running)
                } else {
                    let width = band / enabled.len() as f64;
                    let x = center - band / 2.0 + slot as f64 * width;
                    (x, width, 0.0, value.y)
                };
                let y0 = if base == 0.0 {
                    zero
                } else {
                    y_scale.position(&TickValue::Number(base))
                };
                let y1 = y_scale.position(&TickValue::Number(top));
                let (sx, sy) = ctx.to_screen(x, y0.min(y1));
                frame
                    .rects
                    .push(RectPrimitive::new(sx, sy, width, (y1 - y0).abs(), fill));
            }
        }
        Ok(())
    }
}

/// Polylines per series, optionally closed down to the baseline as areas.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinePainter {
    pub fill_area: bool,
}

impl SeriesPainter for LinePainter {
    fn name(&self) -> &'static str {
        if self.fill_area { "area" } else { "line" }
    }

    fn paint(&self, ctx: &PaintContext<'_>, frame: &mut RenderFrame) -> ChartResult<()> {
        let (x_scale, y_scale) = ctx.scales(self.name())?;
        // Stacked areas accumulate by point index.
        let mut baselines: Vec<f64> = Vec::new();

        for (series_index, series) in ctx.enabled() {
            let color = ctx.color(series_index);
            let mut upper: Vec<(f64, f64)> = Vec::with_capacity(series.values.len());
            let mut lower: Vec<(f64, f64)> = Vec::with_capacity(series.values.len());

            for (point_index, value) in series.values.iter().enumerate() {
                if !value.y.is_finite() {
                    continue;
                }
                let Some(x) = ctx.x_position(x_scale, &value.x) else {
                    continue;
                };
                let base = if ctx.stacked && self.fill_area {
                    if baselines.len() <= point_index {
                        baselines.resize(point_index + 1, 0.0);
                    }
                    let base = baselines[point_index];
                    baselines[point_index] += value.y;
                    base
                } else {
                    0.0
                };
                let y = y_scale.position(&TickValue::Number(base + value.y));
                let y_base = y_scale.position(&TickValue::Number(base));
                upper.push(ctx.to_screen(x, y));
                lower.push(ctx.to_screen(x, y_base));
            }
            if upper.is_empty() {
                continue;
            }

            if self.fill_area {
                let mut outline = upper.clone();
                outline.extend(lower.into_iter().rev());
                frame.polylines.push(PolylinePrimitive {
                    points: outline,
                    stroke: color,
                    stroke_width: 1.0,
                    fill: Some(Color { alpha: 0.4, ..color }),
                });
            }
            frame.polylines.push(PolylinePrimitive {
                points: upper,
                stroke: color,
                stroke_width: 1.5,
                fill: None,
            });
        }
        Ok(())
    }
}

/// Circles sized by each value's `size`.
#[derive(Debug, Clone, Copy)]
pub struct BubblePainter {
    pub min_radius: f64,
    pub max_radius: f64,
}

impl Default for BubblePainter {
    fn default() -> Self {
        Self {
            min_radius: 3.0,
            max_radius: 20.0,
        }
    }
}

impl SeriesPainter for BubblePainter {
    fn name(&self) -> &'static str {
        "bubble"
    }

    fn paint(&self, ctx: &PaintContext<'_>, frame: &mut RenderFrame) -> ChartResult<()> {
        let (x_scale, y_scale) = ctx.scales(self.name())?;
        let max_size = ctx
            .enabled()
            .flat_map(|(_, series)| series.values.iter())
            .filter_map(|value| value.size)
            .filter(|size| size.is_finite() && *size > 0.0)
            .fold(0.0, f64::max);

        for (series_index, series) in ctx.enabled() {
            let fill = ctx.color(series_index);
            for value in series.values.iter().filter(|v| v.y.is_finite()) {
                let Some(x) = ctx.x_position(x_scale, &value.x) else {
                    continue;
                };
                let y = y_scale.position(&TickValue::Number(value.y));
                let radius = match value.size {
                    Some(size) if max_size > 0.0 && size.is_finite() && size > 0.0 => {
                        self.min_radius
                            + (size / max_size).sqrt() * (self.max_radius - self.min_radius)
                    }
                    _ => self.min_radius,
                };
                let (cx, cy) = ctx.to_screen(x, y);
                frame.circles.push(CirclePrimitive {
                    cx,
                    cy,
                    radius,
                    fill,
                });
            }
        }
        Ok(())
    }
}

/// Painter for kinds whose drawing the host supplies.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPainter;

impl SeriesPainter for NoopPainter {
    fn name(&self) -> &'static str {
        "noop"
    }

    fn paint(&self, _ctx: &PaintContext<'_>, _frame: &mut RenderFrame) -> ChartResult<()> {
        Ok(())
    }
}
