use std::fmt::Write as _;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, PrimitiveRole, RenderFrame, Renderer, TextBaseline, TextPrimitive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SvgRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub paths_drawn: usize,
    pub texts_drawn: usize,
}

/// Serializes frames into standalone SVG documents.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    document: String,
    last_stats: SvgRenderStats,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The document produced by the last successful render.
    #[must_use]
    pub fn svg(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn into_svg(self) -> String {
        self.document
    }

    #[must_use]
    pub fn last_stats(&self) -> SvgRenderStats {
        self.last_stats
    }

    fn write_document(frame: &RenderFrame) -> Result<(String, SvgRenderStats), std::fmt::Error> {
        let mut out = String::new();
        let mut stats = SvgRenderStats::default();
        let (width, height) = (frame.viewport.width, frame.viewport.height);

        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" class="sc-chart" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        )?;
        let (duration, delay) = frame.transition_ms;
        if duration > 0 {
            writeln!(
                out,
                "<style>.sc-series {{ transition: all {duration}ms ease {delay}ms; }}</style>"
            )?;
        }

        for rect in &frame.rects {
            write!(
                out,
                r#"<rect class="{}" x="{}" y="{}" width="{}" height="{}""#,
                rect.role.css_class(),
                num(rect.x),
                num(rect.y),
                num(rect.width),
                num(rect.height)
            )?;
            write_paint(&mut out, "fill", rect.fill)?;
            out.push_str("/>\n");
            stats.rects_drawn += 1;
        }

        for polyline in &frame.polylines {
            let points: Vec<String> = polyline
                .points
                .iter()
                .map(|(x, y)| format!("{},{}", num(*x), num(*y)))
                .collect();
            let element = if polyline.fill.is_some() {
                "polygon"
            } else {
                "polyline"
            };
            write!(
                out,
                r#"<{element} class="{}" points="{}" stroke-width="{}""#,
                PrimitiveRole::Series.css_class(),
                points.join(" "),
                num(polyline.stroke_width)
            )?;
            write_paint(&mut out, "stroke", polyline.stroke)?;
            match polyline.fill {
                Some(fill) => write_paint(&mut out, "fill", fill)?,
                None => out.push_str(r#" fill="none""#),
            }
            out.push_str("/>\n");
            stats.paths_drawn += 1;
        }

        for circle in &frame.circles {
            write!(
                out,
                r#"<circle class="{}" cx="{}" cy="{}" r="{}""#,
                PrimitiveRole::Series.css_class(),
                num(circle.cx),
                num(circle.cy),
                num(circle.radius)
            )?;
            write_paint(&mut out, "fill", circle.fill)?;
            out.push_str("/>\n");
            stats.paths_drawn += 1;
        }

        for line in &frame.lines {
            write!(
                out,
                r#"<line class="{}" x1="{}" y1="{}" x2="{}" y2="{}" stroke-width="{}""#,
                line.role.css_class(),
                num(line.x1),
                num(line.y1),
                num(line.x2),
                num(line.y2),
                num(line.stroke_width)
            )?;
            write_paint(&mut out, "stroke", line.color)?;
            out.push_str("/>\n");
            stats.lines_drawn += 1;
        }

        for text in &frame.texts {
            write_text(&mut out, text)?;
            stats.texts_drawn += 1;
        }

        out.push_str("</svg>\n");
        Ok((out, stats))
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        let (document, stats) = Self::write_document(frame)
            .map_err(|_| ChartError::InvalidData("failed to serialize svg".to_owned()))?;
        self.document = document;
        self.last_stats = stats;
        Ok(())
    }
}

fn write_text(out: &mut String, text: &TextPrimitive) -> std::fmt::Result {
    let baseline = match text.baseline {
        TextBaseline::Hanging => "hanging",
        TextBaseline::Middle => "middle",
        TextBaseline::Alphabetic => "alphabetic",
    };
    write!(
        out,
        r#"<text class="{}" x="{}" y="{}" font-size="{}" text-anchor="{}" dominant-baseline="{}""#,
        text.role.css_class(),
        num(text.x),
        num(text.y),
        num(text.font_size_px),
        text.anchor.as_svg(),
        baseline
    )?;
    if text.rotation_deg != 0.0 {
        write!(
            out,
            r#" transform="rotate({} {} {})""#,
            num(text.rotation_deg),
            num(text.x),
            num(text.y)
        )?;
    }
    if text.rtl {
        out.push_str(r#" direction="rtl""#);
    }
    if text.opacity < 1.0 {
        write!(out, r#" opacity="{}""#, num(text.opacity))?;
    }
    write_paint(out, "fill", text.color)?;
    out.push('>');

    if text.lines.len() == 1 {
        out.push_str(&escape_xml(&text.lines[0]));
    } else {
        for (index, line) in text.lines.iter().enumerate() {
            let dy = if index == 0 { 0.0 } else { text.line_height_px };
            write!(
                out,
                r#"<tspan x="{}" dy="{}">{}</tspan>"#,
                num(text.x),
                num(dy),
                escape_xml(line)
            )?;
        }
    }
    out.push_str("</text>\n");
    Ok(())
}

fn write_paint(out: &mut String, attr: &str, color: Color) -> std::fmt::Result {
    write!(out, r#" {attr}="{}""#, color.to_hex())?;
    if color.alpha < 1.0 {
        write!(out, r#" {attr}-opacity="{}""#, num(color.alpha))?;
    }
    Ok(())
}

// Two decimals are plenty for pixel output and keep documents diff-friendly.
fn num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        "0".to_owned()
    } else {
        format!("{rounded}")
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use super::{SvgRenderer, escape_xml, num};
    use crate::core::Viewport;
    use crate::render::{
        Color, LinePrimitive, PrimitiveRole, RenderFrame, Renderer, TextAnchor, TextPrimitive,
    };

    #[test]
    fn renders_rotated_multiline_text() {
        let label = TextPrimitive::new("a", 10.0, 20.0, 12.0, Color::TEXT, TextAnchor::End)
            .with_lines(smallvec!["Quarter".to_owned(), "One".to_owned()])
            .with_rotation(-30.0)
            .with_role(PrimitiveRole::TickLabel);
        let frame = RenderFrame::new(Viewport::new(100, 50))
            .with_text(label)
            .with_line(LinePrimitive::new(0.0, 0.0, 10.0, 0.0, 1.0, Color::AXIS));
        let mut renderer = SvgRenderer::new();
        renderer.render(&frame).expect("render");

        let svg = renderer.svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"transform="rotate(-30 10 20)""#));
        assert!(svg.contains(r#"text-anchor="end""#));
        assert!(svg.contains("<tspan"));
        assert_eq!(renderer.last_stats().texts_drawn, 1);
        assert_eq!(renderer.last_stats().lines_drawn, 1);
    }

    #[test]
    fn invalid_frame_is_rejected_and_previous_document_kept() {
        let mut renderer = SvgRenderer::new();
        let ok = RenderFrame::new(Viewport::new(10, 10));
        renderer.render(&ok).expect("render");
        let before = renderer.svg().to_owned();

        let bad = RenderFrame::new(Viewport::new(0, 10));
        assert!(renderer.render(&bad).is_err());
        assert_eq!(renderer.svg(), before);
    }

    #[test]
    fn helpers_escape_and_round() {
        assert_eq!(escape_xml("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
        assert_eq!(num(1.23456), "1.23");
        assert_eq!(num(-0.001), "0");
    }
}
