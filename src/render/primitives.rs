use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const AXIS: Self = Self::rgb(0.4, 0.4, 0.4);
    pub const TEXT: Self = Self::rgb(0.2, 0.2, 0.2);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Parses `#rgb` or `#rrggbb`.
    pub fn from_hex(hex: &str) -> ChartResult<Self> {
        let digits = hex.trim().trim_start_matches('#');
        let expanded: String = match digits.len() {
            3 if digits.is_ascii() => digits.chars().flat_map(|c| [c, c]).collect(),
            6 if digits.is_ascii() => digits.to_owned(),
            _ => {
                return Err(ChartError::InvalidData(format!(
                    "unsupported color literal `{hex}`"
                )));
            }
        };
        let channel = |range: std::ops::Range<usize>| -> ChartResult<f64> {
            u8::from_str_radix(&expanded[range], 16)
                .map(|value| f64::from(value) / 255.0)
                .map_err(|_| ChartError::InvalidData(format!("invalid color literal `{hex}`")))
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        let byte = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            byte(self.red),
            byte(self.green),
            byte(self.blue)
        )
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// What a primitive belongs to; backends map this to a CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveRole {
    AxisDomain,
    AxisTick,
    AxisTickZero,
    TickLabel,
    EndLabel,
    AxisTitle,
    Title,
    Legend,
    Series,
    Message,
}

impl PrimitiveRole {
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::AxisDomain => "sc-axis-domain",
            Self::AxisTick => "sc-axis-tick",
            Self::AxisTickZero => "sc-axis-tick sc-zero",
            Self::TickLabel => "sc-tick-label",
            Self::EndLabel => "sc-axis-maxmin",
            Self::AxisTitle => "sc-axis-label",
            Self::Title => "sc-title",
            Self::Legend => "sc-legend",
            Self::Series => "sc-series",
            Self::Message => "sc-no-data",
        }
    }
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
    pub role: PrimitiveRole,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
            role: PrimitiveRole::Series,
        }
    }

    #[must_use]
    pub const fn with_role(mut self, role: PrimitiveRole) -> Self {
        self.role = role;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(ChartError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Filled rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Color,
    pub role: PrimitiveRole,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64, fill: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill,
            role: PrimitiveRole::Series,
        }
    }

    #[must_use]
    pub const fn with_role(mut self, role: PrimitiveRole) -> Self {
        self.role = role;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "rect origin must be finite".to_owned(),
            ));
        }
        if !self.width.is_finite() || !self.height.is_finite() {
            return Err(ChartError::InvalidData(
                "rect size must be finite".to_owned(),
            ));
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(ChartError::InvalidData(
                "rect size must be >= 0".to_owned(),
            ));
        }
        self.fill.validate()
    }
}

/// Open or closed polyline; closed polylines with a fill render as areas.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylinePrimitive {
    pub points: Vec<(f64, f64)>,
    pub stroke: Color,
    pub stroke_width: f64,
    pub fill: Option<Color>,
}

impl PolylinePrimitive {
    pub fn validate(&self) -> ChartResult<()> {
        if self
            .points
            .iter()
            .any(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(ChartError::InvalidData(
                "polyline points must be finite".to_owned(),
            ));
        }
        if let Some(fill) = self.fill {
            fill.validate()?;
        }
        self.stroke.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CirclePrimitive {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub fill: Color,
}

impl CirclePrimitive {
    pub fn validate(self) -> ChartResult<()> {
        if !self.cx.is_finite() || !self.cy.is_finite() {
            return Err(ChartError::InvalidData(
                "circle center must be finite".to_owned(),
            ));
        }
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(ChartError::InvalidData(
                "circle radius must be finite and >= 0".to_owned(),
            ));
        }
        self.fill.validate()
    }
}

/// Horizontal text anchor relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    /// Swaps `Start` and `End`, as right-to-left layouts do.
    #[must_use]
    pub fn mirrored(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::Middle => Self::Middle,
            Self::End => Self::Start,
        }
    }

    #[must_use]
    pub fn as_svg(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// Vertical placement of the first text line relative to `TextPrimitive::y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    Hanging,
    Middle,
    Alphabetic,
}

/// Draw command for one (possibly multi-line) label in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    /// One entry per rendered line.
    pub lines: SmallVec<[String; 2]>,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub line_height_px: f64,
    pub color: Color,
    pub anchor: TextAnchor,
    pub baseline: TextBaseline,
    /// Clockwise rotation in degrees around `(x, y)`.
    pub rotation_deg: f64,
    pub opacity: f64,
    /// Right-to-left text; backends interpret `anchor` in reading order.
    pub rtl: bool,
    pub role: PrimitiveRole,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        anchor: TextAnchor,
    ) -> Self {
        let mut lines = SmallVec::new();
        lines.push(text.into());
        Self {
            lines,
            x,
            y,
            font_size_px,
            line_height_px: font_size_px * 1.2,
            color,
            anchor,
            baseline: TextBaseline::Alphabetic,
            rotation_deg: 0.0,
            opacity: 1.0,
            rtl: false,
            role: PrimitiveRole::Message,
        }
    }

    #[must_use]
    pub fn with_lines(mut self, lines: SmallVec<[String; 2]>) -> Self {
        self.lines = lines;
        self
    }

    #[must_use]
    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation_deg: f64) -> Self {
        self.rotation_deg = rotation_deg;
        self
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    #[must_use]
    pub fn with_rtl(mut self, rtl: bool) -> Self {
        self.rtl = rtl;
        self
    }

    /// The anchor in screen terms, after undoing right-to-left mirroring.
    #[must_use]
    pub fn physical_anchor(&self) -> TextAnchor {
        if self.rtl {
            self.anchor.mirrored()
        } else {
            self.anchor
        }
    }

    #[must_use]
    pub fn with_line_height(mut self, line_height_px: f64) -> Self {
        self.line_height_px = line_height_px;
        self
    }

    #[must_use]
    pub fn with_role(mut self, role: PrimitiveRole) -> Self {
        self.role = role;
        self
    }

    /// All lines joined with a space.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join(" ")
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.lines.iter().all(String::is_empty) {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() || !self.rotation_deg.is_finite() {
            return Err(ChartError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(ChartError::InvalidData(
                "text opacity must be in [0, 1]".to_owned(),
            ));
        }
        self.color.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, TextAnchor};

    #[test]
    fn hex_colors_round_trip() {
        let color = Color::from_hex("#1f77b4").expect("hex");
        assert_eq!(color.to_hex(), "#1f77b4");
        assert_eq!(Color::from_hex("#fff").expect("short hex").to_hex(), "#ffffff");
        assert!(Color::from_hex("blue").is_err());
    }

    #[test]
    fn mirrored_anchor_swaps_edges_only() {
        assert_eq!(TextAnchor::Start.mirrored(), TextAnchor::End);
        assert_eq!(TextAnchor::End.mirrored(), TextAnchor::Start);
        assert_eq!(TextAnchor::Middle.mirrored(), TextAnchor::Middle);
    }
}
