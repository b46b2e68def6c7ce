use smallvec::{SmallVec, smallvec};

use crate::core::{Bounds, TickValue};
use crate::render::{Color, PrimitiveRole, TextAnchor, TextBaseline, TextMeasurer, TextPrimitive};

/// One positioned tick label in axis-local coordinates.
///
/// The axis line runs through the local origin: horizontal axes place it on
/// `y = 0` and vertical axes on `x = 0`. `anchor` is the reading-order anchor
/// written to the backend; with `rtl` set it is the mirror of the on-screen edge.
#[derive(Debug, Clone, PartialEq)]
pub struct TickLabel {
    pub value: TickValue,
    /// Index of the tick in generation order.
    pub index: usize,
    /// Pixel position of the tick along the axis.
    pub position: f64,
    /// Formatted text before any wrapping.
    pub text: String,
    pub lines: SmallVec<[String; 2]>,
    pub line_widths: SmallVec<[f64; 2]>,
    pub line_height: f64,
    pub x: f64,
    pub y: f64,
    pub anchor: TextAnchor,
    pub baseline: TextBaseline,
    /// Backend rotation in degrees, clockwise around `(x, y)`.
    pub rotation_deg: f64,
    /// Perpendicular shift applied by staggering.
    pub offset: f64,
    pub opacity: f64,
    pub rtl: bool,
}

impl TickLabel {
    pub fn new(
        value: TickValue,
        index: usize,
        position: f64,
        text: String,
        measurer: &dyn TextMeasurer,
        font_size_px: f64,
    ) -> Self {
        let mut label = Self {
            value,
            index,
            position,
            text: text.clone(),
            lines: SmallVec::new(),
            line_widths: SmallVec::new(),
            line_height: 0.0,
            x: position,
            y: 0.0,
            anchor: TextAnchor::Middle,
            baseline: TextBaseline::Hanging,
            rotation_deg: 0.0,
            offset: 0.0,
            opacity: 1.0,
            rtl: false,
        };
        label.set_lines(smallvec![text], measurer, font_size_px);
        label
    }

    /// Replaces the rendered lines and re-measures them.
    pub fn set_lines(
        &mut self,
        lines: SmallVec<[String; 2]>,
        measurer: &dyn TextMeasurer,
        font_size_px: f64,
    ) {
        let metrics: SmallVec<[_; 2]> = lines
            .iter()
            .map(|line| measurer.measure(line, font_size_px))
            .collect();
        self.line_widths = metrics.iter().map(|m| m.width).collect();
        self.line_height = metrics.iter().map(|m| m.height).fold(0.0, f64::max);
        self.lines = lines;
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.line_widths.iter().copied().fold(0.0, f64::max)
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.line_height * self.lines.len() as f64
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    /// Sets the reading-order anchor from the on-screen one.
    pub fn set_physical_anchor(&mut self, anchor: TextAnchor) {
        self.anchor = if self.rtl { anchor.mirrored() } else { anchor };
    }

    #[must_use]
    pub fn physical_anchor(&self) -> TextAnchor {
        if self.rtl {
            self.anchor.mirrored()
        } else {
            self.anchor
        }
    }

    /// Axis-aligned box of the label, rotation included.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        let (w, h) = (self.width(), self.height());
        let (left, right) = match self.physical_anchor() {
            TextAnchor::Start => (0.0, w),
            TextAnchor::Middle => (-w / 2.0, w / 2.0),
            TextAnchor::End => (-w, 0.0),
        };
        let (top, bottom) = match self.baseline {
            TextBaseline::Hanging => (0.0, h),
            TextBaseline::Middle => (-h / 2.0, h / 2.0),
            TextBaseline::Alphabetic => (-self.line_height, h - self.line_height),
        };

        if self.rotation_deg == 0.0 {
            return Bounds::new(left, top, right, bottom).translate(self.x, self.y);
        }

        let (sin, cos) = self.rotation_deg.to_radians().sin_cos();
        let corners = [(left, top), (right, top), (right, bottom), (left, bottom)];
        let mut out = Bounds::new(
            f64::INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::NEG_INFINITY,
        );
        for (px, py) in corners {
            let rx = px * cos - py * sin;
            let ry = px * sin + py * cos;
            out = out.union(Bounds::new(rx, ry, rx, ry));
        }
        out.translate(self.x, self.y)
    }

    /// Converts to a draw command translated by `(dx, dy)`.
    #[must_use]
    pub fn to_primitive(
        &self,
        dx: f64,
        dy: f64,
        font_size_px: f64,
        color: Color,
        role: PrimitiveRole,
    ) -> TextPrimitive {
        TextPrimitive::new(
            self.text.clone(),
            self.x + dx,
            self.y + dy,
            font_size_px,
            color,
            self.anchor,
        )
        .with_lines(self.lines.clone())
        .with_line_height(self.line_height)
        .with_baseline(self.baseline)
        .with_rotation(self.rotation_deg)
        .with_opacity(self.opacity)
        .with_rtl(self.rtl)
        .with_role(role)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::TickLabel;
    use crate::core::TickValue;
    use crate::render::{Color, MonospaceTextMeasurer, PrimitiveRole, TextAnchor, TextBaseline};

    fn label(text: &str) -> TickLabel {
        TickLabel::new(
            TickValue::Number(0.0),
            0,
            50.0,
            text.to_owned(),
            &MonospaceTextMeasurer::new(10.0, 12.0),
            12.0,
        )
    }

    #[test]
    fn unrotated_bounds_follow_anchor_and_baseline() {
        let mut l = label("abcd");
        l.y = 8.0;
        let b = l.bounds();
        assert_relative_eq!(b.left, 30.0);
        assert_relative_eq!(b.right, 70.0);
        assert_relative_eq!(b.top, 8.0);
        assert_relative_eq!(b.bottom, 20.0);

        l.set_physical_anchor(TextAnchor::End);
        l.baseline = TextBaseline::Middle;
        let b = l.bounds();
        assert_relative_eq!(b.right, 50.0);
        assert_relative_eq!(b.top, 2.0);
    }

    #[test]
    fn rotated_end_anchored_label_extends_down_left() {
        let mut l = label("abcdefghij");
        l.baseline = TextBaseline::Middle;
        l.set_physical_anchor(TextAnchor::End);
        l.rotation_deg = -90.0;
        let b = l.bounds();
        assert_relative_eq!(b.bottom, 100.0, epsilon = 1e-9);
        assert_relative_eq!(b.top, 0.0, epsilon = 1e-9);
        assert_relative_eq!(b.width(), 12.0, epsilon = 1e-9);
    }

    #[test]
    fn rtl_keeps_physical_anchor_and_mirrors_reading_anchor() {
        let mut l = label("ab");
        l.rtl = true;
        l.set_physical_anchor(TextAnchor::End);
        assert_eq!(l.anchor, TextAnchor::Start);
        assert_eq!(l.physical_anchor(), TextAnchor::End);
        let primitive = l.to_primitive(0.0, 0.0, 12.0, Color::TEXT, PrimitiveRole::TickLabel);
        assert!(primitive.rtl);
        assert_eq!(primitive.physical_anchor(), TextAnchor::End);
    }
}
