use tracing::{debug, info, warn};

use crate::axis::{AxisConfig, AxisOrientation};
use crate::core::{Bounds, DataType, Margin, Scale, ScaleKind};
use crate::error::ChartResult;
use crate::render::{
    Color, PrimitiveRole, RenderFrame, Renderer, TextAnchor, TextBaseline, TextPrimitive,
    reconcile,
};

use super::format::{time_tick_formatter, value_formatter};
use super::layout_pass::{LayoutPassInput, run_layout_passes};
use super::scale_builder::build_scales;
use super::{
    Chart, ChartEvent, HeaderLayout, LayoutReport, LegendEntry, PaintContext, RenderOutcome,
};

const MESSAGE_FONT_SIZE_PX: f64 = 18.0;

impl<R: Renderer> Chart<R> {
    /// Lays out and draws the chart, then emits `Rendered`.
    ///
    /// Empty or all-zero data and a plot area below the configured minimum
    /// height are reported through [`RenderOutcome`] with a centered message
    /// rather than as errors.
    pub fn render(&mut self) -> ChartResult<RenderOutcome> {
        self.config.validate()?;
        self.data.validate()?;

        let viewport = self.config.viewport;
        let mut frame =
            RenderFrame::new(viewport).with_transition(self.config.duration_ms, self.config.delay_ms);
        let rtl = self.config.direction.is_rtl();
        let margin = self.config.margin;
        let available_width = (f64::from(viewport.width) - margin.horizontal()).max(0.0);

        let colors = self.series_colors();
        let header = self.header_layout(available_width, &colors);
        header.append_to_frame(&mut frame, (margin.left, margin.top), rtl);
        let available_height =
            (f64::from(viewport.height) - margin.vertical() - header.height).max(0.0);

        let mut report = LayoutReport {
            header_height: header.height,
            inner_width: available_width,
            inner_height: available_height,
            ..LayoutReport::default()
        };

        let outcome = if self.data.is_empty_or_zero() {
            self.push_message(&mut frame, &self.config.no_data_message, rtl);
            RenderOutcome::NoData
        } else if self.kind.has_axes() {
            self.render_cartesian(
                &mut frame,
                &mut report,
                available_width,
                available_height,
                header.height,
                &colors,
            )?
        } else if available_height < self.config.min_inner_height || available_width <= 0.0 {
            self.push_message(&mut frame, &self.config.insufficient_space_message, rtl);
            RenderOutcome::InsufficientSpace
        } else {
            let plot = Bounds::from_origin_size(
                margin.left,
                margin.top + header.height,
                available_width,
                available_height,
            );
            let category_keys = self.data.category_keys();
            let context = PaintContext {
                data: &self.data,
                plot,
                x_scale: None,
                y_scale: None,
                category_keys: &category_keys,
                colors: &colors,
                stacked: self.config.stacked,
            };
            self.painter.paint(&context, &mut frame)?;
            RenderOutcome::Rendered
        };

        let keys: Vec<String> = self
            .data
            .enabled_series()
            .map(|series| series.key.clone())
            .collect();
        self.last_diff = reconcile(&self.previous_keys, &keys);
        self.previous_keys = keys;

        self.renderer.render(&frame)?;
        info!(
            kind = %self.kind,
            ?outcome,
            primitives = frame.primitive_count(),
            entered = self.last_diff.enter.len(),
            exited = self.last_diff.exit.len(),
            "render chart"
        );
        self.last_report = Some(report);
        self.last_outcome = Some(outcome);
        self.dispatcher.emit(&ChartEvent::Rendered { outcome });
        Ok(outcome)
    }

    fn render_cartesian(
        &self,
        frame: &mut RenderFrame,
        report: &mut LayoutReport,
        available_width: f64,
        available_height: f64,
        header_height: f64,
        colors: &[Color],
    ) -> ChartResult<RenderOutcome> {
        let rtl = self.config.direction.is_rtl();
        let (mut x_config, mut y_config) = self.config.effective_axes();
        let scales = build_scales(self.kind, &self.data, self.config.stacked, y_config.tick_count)?;
        let properties = &self.data.properties;
        install_default_formatter(&mut x_config, &scales.x, properties.x_data_type);
        install_default_formatter(&mut y_config, &scales.y, properties.y_data_type);

        let input = LayoutPassInput {
            available_width,
            available_height,
            passes: self.config.layout_passes_for(self.kind),
            x_config: &x_config,
            y_config: &y_config,
            x_scale: &scales.x,
            y_scale: &scales.y,
            x_reversed: rtl,
            measurer: self.measurer.as_ref(),
        };
        let (plot, passes) = run_layout_passes(&input)?;
        report.passes = passes;
        report.inner_margin = plot.inner_margin;
        report.inner_width = plot.inner_width;
        report.inner_height = plot.inner_height;
        report.x_strategy = Some(plot.x_axis.strategy);

        if plot.inner_height < self.config.min_inner_height || plot.inner_width <= 0.0 {
            warn!(
                inner_width = plot.inner_width,
                inner_height = plot.inner_height,
                min_inner_height = self.config.min_inner_height,
                "not enough room for the plot area"
            );
            self.push_message(frame, &self.config.insufficient_space_message, rtl);
            return Ok(RenderOutcome::InsufficientSpace);
        }

        let Margin { top, left, .. } = plot.inner_margin;
        let ox = self.config.margin.left + left;
        let oy = self.config.margin.top + header_height + top;
        let (w, h) = (plot.inner_width, plot.inner_height);

        let x_origin = match plot.x_axis.orientation {
            AxisOrientation::Top => (ox, oy),
            _ => (ox, oy + h),
        };
        let y_origin = match plot.y_axis.orientation {
            AxisOrientation::Right => (ox + w, oy),
            _ => (ox, oy),
        };
        plot.x_axis.append_to_frame(frame, x_origin, h);
        plot.y_axis.append_to_frame(frame, y_origin, w);

        let context = PaintContext {
            data: &self.data,
            plot: Bounds::from_origin_size(ox, oy, w, h),
            x_scale: Some(&plot.x_scale),
            y_scale: Some(&plot.y_scale),
            category_keys: &scales.category_keys,
            colors,
            stacked: self.config.stacked,
        };
        self.painter.paint(&context, frame)?;
        debug!(
            painter = self.painter.name(),
            x_strategy = ?plot.x_axis.strategy,
            inner_width = w,
            inner_height = h,
            "paint series"
        );
        Ok(RenderOutcome::Rendered)
    }

    /// One color per series: the series' own hex color, else the palette.
    fn series_colors(&self) -> Vec<Color> {
        let palette = &self.config.palette;
        self.data
            .data
            .iter()
            .enumerate()
            .map(|(index, series)| {
                let literal = series
                    .color
                    .as_deref()
                    .unwrap_or(&palette[index % palette.len()]);
                Color::from_hex(literal).unwrap_or_else(|err| {
                    warn!(series = %series.key, %err, "falling back to axis color");
                    Color::AXIS
                })
            })
            .collect()
    }

    fn header_layout(&self, width: f64, colors: &[Color]) -> HeaderLayout {
        let title = if self.config.show_title {
            self.config
                .title
                .as_deref()
                .or(self.data.properties.title.as_deref())
        } else {
            None
        };
        let entries: Vec<LegendEntry> = if self.config.show_legend {
            self.data
                .data
                .iter()
                .zip(colors)
                .map(|(series, color)| LegendEntry {
                    key: series.key.clone(),
                    color: *color,
                    disabled: series.disabled,
                })
                .collect()
        } else {
            Vec::new()
        };
        HeaderLayout::compute(
            title,
            &entries,
            width,
            self.config.title_font_size_px,
            self.config.legend_font_size_px,
            self.config.direction.is_rtl(),
            self.measurer.as_ref(),
        )
    }

    fn push_message(&self, frame: &mut RenderFrame, message: &str, rtl: bool) {
        let viewport = frame.viewport;
        frame.texts.push(
            TextPrimitive::new(
                message,
                f64::from(viewport.width) / 2.0,
                f64::from(viewport.height) / 2.0,
                MESSAGE_FONT_SIZE_PX,
                Color::TEXT,
                TextAnchor::Middle,
            )
            .with_baseline(TextBaseline::Middle)
            .with_rtl(rtl)
            .with_role(PrimitiveRole::Message),
        );
    }
}

// Categorical axes keep their labels verbatim.
fn install_default_formatter(config: &mut AxisConfig, scale: &Scale, data_type: Option<DataType>) {
    if config.value_formatter.is_some() {
        return;
    }
    config.value_formatter = match (scale.kind(), scale.continuous_domain()) {
        (ScaleKind::Time, Some(domain)) => Some(time_tick_formatter(domain)),
        (ScaleKind::Linear, _) => Some(value_formatter(data_type)),
        _ => None,
    };
}
