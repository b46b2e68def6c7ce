use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, LinePrimitive, PolylinePrimitive, PrimitiveRole, RectPrimitive,
    TextPrimitive,
};

/// Everything one `render()` draws, in backend-agnostic pixel space.
///
/// Primitives are grouped by shape; each carries a [`PrimitiveRole`] so
/// backends and tests can pick out axes, labels, legend and series.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub lines: Vec<LinePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub polylines: Vec<PolylinePrimitive>,
    pub circles: Vec<CirclePrimitive>,
    pub texts: Vec<TextPrimitive>,
    /// `(duration, delay)` in milliseconds for backends that animate.
    pub transition_ms: (u32, u32),
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            lines: Vec::new(),
            rects: Vec::new(),
            polylines: Vec::new(),
            circles: Vec::new(),
            texts: Vec::new(),
            transition_ms: (0, 0),
        }
    }

    #[must_use]
    pub fn with_transition(mut self, duration_ms: u32, delay_ms: u32) -> Self {
        self.transition_ms = (duration_ms, delay_ms);
        self
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    /// Texts carrying the given role, in insertion order.
    pub fn texts_with_role(&self, role: PrimitiveRole) -> impl Iterator<Item = &TextPrimitive> {
        self.texts.iter().filter(move |text| text.role == role)
    }

    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.lines.len() + self.rects.len() + self.polylines.len() + self.circles.len() + self.texts.len()
    }

    /// Rejects non-finite geometry before a backend sees it.
    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.lines.iter().try_for_each(|line| line.validate())?;
        self.rects.iter().try_for_each(|rect| rect.validate())?;
        self.polylines.iter().try_for_each(PolylinePrimitive::validate)?;
        self.circles.iter().try_for_each(|circle| circle.validate())?;
        self.texts.iter().try_for_each(TextPrimitive::validate)
    }
}
