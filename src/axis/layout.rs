use smallvec::smallvec;
use tracing::{debug, trace};

use crate::axis::{
    AxisConfig, AxisOrientation, LabelStrategy, ResolverState, StrategyFlags, TickDimension,
    TickLabel, has_collision, normalize_angle, rotated_anchor, rotated_extent, screen_rotation,
    tick_dimensions, tick_spacing, wrap_words,
};
use crate::core::ticks::normalize_tick_values;
use crate::core::{Bounds, Margin, Scale, TickValue};
use crate::error::ChartResult;
use crate::render::{
    Color, LinePrimitive, PrimitiveRole, RenderFrame, TextAnchor, TextBaseline, TextMeasurer,
    TextPrimitive,
};

/// One tick mark along the axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub value: TickValue,
    pub position: f64,
    /// Highlighted zero line.
    pub zero: bool,
}

/// Axis title placement in axis-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTitle {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub rotation_deg: f64,
    pub baseline: TextBaseline,
    pub height: f64,
}

/// Fully resolved axis: tick geometry, labels, strategy and reported margin.
///
/// Coordinates are axis-local; `append_to_frame` translates them onto the
/// plot origin the chart chooses.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLayout {
    pub orientation: AxisOrientation,
    pub range: (f64, f64),
    pub ticks: Vec<AxisTick>,
    pub labels: Vec<TickLabel>,
    pub end_labels: Vec<TickLabel>,
    pub title: Option<AxisTitle>,
    pub strategy: LabelStrategy,
    pub dimensions: Vec<TickDimension>,
    /// Distance from the axis line to the far edge of labels and title.
    pub thickness: f64,
    /// Overhang past the range ends, `(low, high)` along the axis.
    pub overhang: (f64, f64),
    pub margin: Margin,
    font_size_px: f64,
    tick_size: f64,
    show_grid: bool,
    show_domain: bool,
}

impl AxisLayout {
    /// Lays out ticks and labels for `scale` and resolves label collisions.
    pub fn compute(
        config: &AxisConfig,
        scale: &Scale,
        measurer: &dyn TextMeasurer,
    ) -> ChartResult<Self> {
        config.validate()?;
        let orientation = config.orientation;
        let horizontal = orientation.is_horizontal();
        let continuous = scale.is_continuous();

        let values = tick_values(config, scale);
        let ticks: Vec<AxisTick> = values
            .iter()
            .map(|value| AxisTick {
                value: value.clone(),
                position: scale.position(value),
                zero: config.highlight_zero && continuous && value.as_number() == Some(0.0),
            })
            .collect();

        let mut labels: Vec<TickLabel> = ticks
            .iter()
            .enumerate()
            .map(|(index, tick)| {
                let text = config.format_tick(&tick.value, index);
                let mut label = TickLabel::new(
                    tick.value.clone(),
                    index,
                    tick.position,
                    text,
                    measurer,
                    config.font_size_px,
                );
                label.rtl = config.direction.is_rtl();
                place_plain(&mut label, config);
                label
            })
            .collect();

        let strategy = if horizontal && !labels.is_empty() {
            let positions: Vec<f64> = ticks.iter().map(|tick| tick.position).collect();
            let (lo, hi) = scale.range_extent();
            let spacing = tick_spacing(scale.step(), &positions, hi - lo);
            resolve_collisions(&mut labels, config, spacing, measurer)
        } else {
            LabelStrategy::None
        };

        let end_labels = if config.show_max_min && continuous {
            end_labels(config, scale, strategy, measurer)
        } else {
            Vec::new()
        };
        suppress_under_end_labels(&mut labels, &end_labels);

        let dimensions = tick_dimensions(&labels, horizontal);
        let extent = label_extent(&labels, &end_labels, strategy, horizontal, config);
        let mut thickness = config.tick_size + config.tick_padding + extent;

        let title = config.axis_label.as_deref().filter(|t| !t.is_empty()).map(|text| {
            let height = measurer.measure(text, config.font_size_px).height;
            let title = place_title(text, thickness, height, scale.range(), config);
            thickness += config.axis_label_distance + height;
            title
        });

        let overhang = if continuous {
            edge_overhang(&labels, &end_labels, scale.range_extent(), horizontal)
        } else {
            (0.0, 0.0)
        };
        let margin = reported_margin(orientation, thickness, overhang);

        trace!(
            ?orientation,
            ticks = ticks.len(),
            ?strategy,
            thickness,
            "axis layout"
        );

        Ok(Self {
            orientation,
            range: scale.range(),
            ticks,
            labels,
            end_labels,
            title,
            strategy,
            dimensions,
            thickness,
            overhang,
            margin,
            font_size_px: config.font_size_px,
            tick_size: config.tick_size,
            show_grid: config.show_grid,
            show_domain: config.show_domain,
        })
    }

    /// Labels that are drawn, i.e. not suppressed by an end label.
    pub fn visible_labels(&self) -> impl Iterator<Item = &TickLabel> {
        self.labels.iter().filter(|label| label.is_visible())
    }

    /// Emits domain, tick, grid, label and title primitives translated to `origin`.
    ///
    /// `grid_length` is the plot extent perpendicular to the axis; grid lines
    /// and the highlighted zero line run across it.
    pub fn append_to_frame(&self, frame: &mut RenderFrame, origin: (f64, f64), grid_length: f64) {
        let (dx, dy) = origin;
        let horizontal = self.orientation.is_horizontal();
        let outward = self.orientation.outward_sign();
        let to_screen = |along: f64, across: f64| {
            if horizontal {
                (dx + along, dy + across)
            } else {
                (dx + across, dy + along)
            }
        };
        let segment = |a: (f64, f64), b: (f64, f64), role: PrimitiveRole| {
            LinePrimitive::new(a.0, a.1, b.0, b.1, 1.0, Color::AXIS).with_role(role)
        };

        if self.show_domain {
            let (lo, hi) = (self.range.0.min(self.range.1), self.range.0.max(self.range.1));
            frame.lines.push(segment(
                to_screen(lo, 0.0),
                to_screen(hi, 0.0),
                PrimitiveRole::AxisDomain,
            ));
        }

        for tick in &self.ticks {
            if self.tick_size > 0.0 {
                frame.lines.push(segment(
                    to_screen(tick.position, 0.0),
                    to_screen(tick.position, outward * self.tick_size),
                    PrimitiveRole::AxisTick,
                ));
            }
            if grid_length > 0.0 && (self.show_grid || tick.zero) {
                let role = if tick.zero {
                    PrimitiveRole::AxisTickZero
                } else {
                    PrimitiveRole::AxisTick
                };
                frame.lines.push(segment(
                    to_screen(tick.position, 0.0),
                    to_screen(tick.position, -outward * grid_length),
                    role,
                ));
            }
        }

        let drawable = |label: &&TickLabel| label.lines.iter().any(|line| !line.is_empty());
        for label in self.labels.iter().filter(drawable) {
            frame.texts.push(label.to_primitive(
                dx,
                dy,
                self.font_size_px,
                Color::TEXT,
                PrimitiveRole::TickLabel,
            ));
        }
        for label in self.end_labels.iter().filter(drawable) {
            frame.texts.push(label.to_primitive(
                dx,
                dy,
                self.font_size_px,
                Color::TEXT,
                PrimitiveRole::EndLabel,
            ));
        }

        if let Some(title) = &self.title {
            frame.texts.push(
                TextPrimitive::new(
                    title.text.clone(),
                    title.x + dx,
                    title.y + dy,
                    self.font_size_px,
                    Color::TEXT,
                    TextAnchor::Middle,
                )
                .with_baseline(title.baseline)
                .with_rotation(title.rotation_deg)
                .with_role(PrimitiveRole::AxisTitle),
            );
        }
    }
}

fn tick_values(config: &AxisConfig, scale: &Scale) -> Vec<TickValue> {
    match (&config.tick_values, scale.continuous_domain()) {
        (Some(explicit), Some(_)) => normalize_tick_values(explicit)
            .into_iter()
            .map(TickValue::Number)
            .collect(),
        _ => scale.ticks(config.tick_count.max(1)),
    }
}

fn place_plain(label: &mut TickLabel, config: &AxisConfig) {
    let base = config.tick_size + config.tick_padding;
    label.rotation_deg = 0.0;
    match config.orientation {
        AxisOrientation::Bottom => {
            label.x = label.position;
            label.y = base + label.offset;
            label.baseline = TextBaseline::Hanging;
            label.set_physical_anchor(TextAnchor::Middle);
        }
        AxisOrientation::Top => {
            label.x = label.position;
            label.y = -(base + label.offset) - label.height();
            label.baseline = TextBaseline::Hanging;
            label.set_physical_anchor(TextAnchor::Middle);
        }
        AxisOrientation::Left => {
            label.x = -base;
            label.y = label.position;
            label.baseline = TextBaseline::Middle;
            label.set_physical_anchor(TextAnchor::End);
        }
        AxisOrientation::Right => {
            label.x = base;
            label.y = label.position;
            label.baseline = TextBaseline::Middle;
            label.set_physical_anchor(TextAnchor::Start);
        }
    }
}

fn place_rotated(label: &mut TickLabel, config: &AxisConfig, normalized_deg: f64) {
    let base = config.tick_size + config.tick_padding;
    label.offset = 0.0;
    label.x = label.position;
    label.y = config.orientation.outward_sign() * base;
    label.baseline = TextBaseline::Middle;
    label.rotation_deg = screen_rotation(normalized_deg, config.orientation);
    label.set_physical_anchor(rotated_anchor(normalized_deg));
}

fn resolve_collisions(
    labels: &mut [TickLabel],
    config: &AxisConfig,
    spacing: f64,
    measurer: &dyn TextMeasurer,
) -> LabelStrategy {
    let flags = StrategyFlags {
        wrap: config.wrap_ticks,
        stagger: config.stagger_ticks,
        rotate_deg: config.rotate_ticks,
    };
    let gap = config.label_gap;
    let font = config.font_size_px;
    let mut state = ResolverState::Initial;
    let mut collision = has_collision(&tick_dimensions(labels, true), 1, gap);

    loop {
        state = state.next(flags, collision);
        match state {
            ResolverState::WrapAttempted => {
                for label in labels.iter_mut() {
                    let lines = wrap_words(&label.text, spacing, measurer, font);
                    label.set_lines(lines, measurer, font);
                    place_plain(label, config);
                }
                collision = has_collision(&tick_dimensions(labels, true), 1, gap);
                trace!(collision, spacing, "tick labels wrapped");
            }
            ResolverState::StaggerAttempted { .. } => {
                let max_height = labels.iter().map(TickLabel::height).fold(0.0, f64::max);
                for label in labels.iter_mut() {
                    label.offset = if label.index % 2 == 1 {
                        max_height + gap
                    } else {
                        0.0
                    };
                    place_plain(label, config);
                }
                collision = has_collision(&tick_dimensions(labels, true), 2, gap);
                trace!(collision, "tick labels staggered");
            }
            ResolverState::Rotated { angle_deg } => {
                let normalized = normalize_angle(angle_deg);
                for label in labels.iter_mut() {
                    label.set_lines(smallvec![label.text.clone()], measurer, font);
                    place_rotated(label, config, normalized);
                }
                debug!(angle = normalized, "tick labels rotated");
                return LabelStrategy::Rotate {
                    angle_deg: normalized,
                };
            }
            ResolverState::Resolved(strategy) => return strategy,
            ResolverState::Initial => return LabelStrategy::None,
        }
    }
}

fn end_labels(
    config: &AxisConfig,
    scale: &Scale,
    strategy: LabelStrategy,
    measurer: &dyn TextMeasurer,
) -> Vec<TickLabel> {
    let Some((d0, d1)) = scale.continuous_domain() else {
        return Vec::new();
    };
    [d0, d1]
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let value = TickValue::Number(value);
            let position = scale.position(&value);
            let text = config.format_tick(&value, index);
            let mut label =
                TickLabel::new(value, index, position, text, measurer, config.font_size_px);
            label.rtl = config.direction.is_rtl();
            match strategy {
                LabelStrategy::Rotate { angle_deg } => place_rotated(&mut label, config, angle_deg),
                _ => place_plain(&mut label, config),
            }
            label
        })
        .collect()
}

fn suppress_under_end_labels(labels: &mut [TickLabel], end_labels: &[TickLabel]) {
    if end_labels.is_empty() {
        return;
    }
    let boxes: Vec<Bounds> = end_labels.iter().map(TickLabel::bounds).collect();
    for label in labels.iter_mut() {
        let bounds = label.bounds();
        if boxes.iter().any(|end| end.intersects(bounds)) {
            label.opacity = 0.0;
        }
    }
}

fn label_extent(
    labels: &[TickLabel],
    end_labels: &[TickLabel],
    strategy: LabelStrategy,
    horizontal: bool,
    config: &AxisConfig,
) -> f64 {
    let all = || labels.iter().chain(end_labels.iter());
    let max_width = all().map(TickLabel::width).fold(0.0, f64::max);
    if !horizontal {
        return max_width;
    }
    let max_height = all().map(TickLabel::height).fold(0.0, f64::max);
    match strategy {
        LabelStrategy::None | LabelStrategy::Wrap => max_height,
        LabelStrategy::Stagger { .. } => 2.0 * max_height + config.label_gap,
        LabelStrategy::Rotate { angle_deg } => rotated_extent(angle_deg, max_width),
    }
}

fn place_title(
    text: &str,
    thickness: f64,
    height: f64,
    range: (f64, f64),
    config: &AxisConfig,
) -> AxisTitle {
    let middle = (range.0 + range.1) / 2.0;
    let distance = thickness + config.axis_label_distance;
    let (x, y, rotation_deg, baseline) = match config.orientation {
        AxisOrientation::Bottom => (middle, distance, 0.0, TextBaseline::Hanging),
        AxisOrientation::Top => (middle, -distance - height, 0.0, TextBaseline::Hanging),
        AxisOrientation::Left => (-distance - height / 2.0, middle, -90.0, TextBaseline::Middle),
        AxisOrientation::Right => (distance + height / 2.0, middle, 90.0, TextBaseline::Middle),
    };
    AxisTitle {
        text: text.to_owned(),
        x,
        y,
        rotation_deg,
        baseline,
        height,
    }
}

fn edge_overhang(
    labels: &[TickLabel],
    end_labels: &[TickLabel],
    (lo, hi): (f64, f64),
    horizontal: bool,
) -> (f64, f64) {
    let Some(union) = labels
        .iter()
        .filter(|label| label.is_visible())
        .chain(end_labels.iter())
        .map(TickLabel::bounds)
        .reduce(Bounds::union)
    else {
        return (0.0, 0.0);
    };
    let (start, end) = if horizontal {
        (union.left, union.right)
    } else {
        (union.top, union.bottom)
    };
    ((lo - start).max(0.0), (end - hi).max(0.0))
}

fn reported_margin(orientation: AxisOrientation, thickness: f64, overhang: (f64, f64)) -> Margin {
    let (low, high) = overhang;
    match orientation {
        AxisOrientation::Bottom => Margin::new(0.0, high, thickness, low),
        AxisOrientation::Top => Margin::new(thickness, high, 0.0, low),
        AxisOrientation::Left => Margin::new(low, 0.0, high, thickness),
        AxisOrientation::Right => Margin::new(low, thickness, high, 0.0),
    }
}
