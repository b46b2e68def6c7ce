//! Text measurement hooks for layout.
//!
//! Axis and header layout need label bounding boxes before anything is drawn.
//! Measurement is injected so the same layout code runs against real font
//! metrics, a browser bridge, or deterministic stand-ins in tests.

/// Measured size of a single line of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
}

/// Measures one line of text at a given font size.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font_size_px: f64) -> TextMetrics;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, font_size_px: f64) -> TextMetrics {
        (**self).measure(text, font_size_px)
    }
}

/// Backend-independent width estimate using per-character-class advances.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font_size_px: f64) -> TextMetrics {
        let units = text.chars().fold(0.0, |acc, ch| {
            acc + match ch {
                '0'..='9' => 0.56,
                '.' | ',' | ':' | ';' | 'i' | 'l' | 'j' | '\'' => 0.28,
                '-' | '+' | '%' | '(' | ')' => 0.36,
                ' ' => 0.28,
                'm' | 'w' | 'M' | 'W' => 0.86,
                c if c.is_uppercase() => 0.68,
                _ => 0.55,
            }
        });
        TextMetrics {
            width: units * font_size_px,
            height: font_size_px * 1.2,
        }
    }
}

/// Every character advances by the same fixed width; line height is fixed too.
///
/// Deterministic, so layout results do not depend on font availability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceTextMeasurer {
    pub char_width_px: f64,
    pub line_height_px: f64,
}

impl MonospaceTextMeasurer {
    #[must_use]
    pub const fn new(char_width_px: f64, line_height_px: f64) -> Self {
        Self {
            char_width_px,
            line_height_px,
        }
    }
}

impl Default for MonospaceTextMeasurer {
    fn default() -> Self {
        Self::new(7.0, 14.0)
    }
}

impl TextMeasurer for MonospaceTextMeasurer {
    fn measure(&self, text: &str, _font_size_px: f64) -> TextMetrics {
        TextMetrics {
            width: self.char_width_px * text.chars().count() as f64,
            height: self.line_height_px,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{HeuristicTextMeasurer, MonospaceTextMeasurer, TextMeasurer};

    #[test]
    fn monospace_width_scales_with_char_count() {
        let measurer = MonospaceTextMeasurer::new(5.0, 10.0);
        assert_eq!(measurer.measure("abcd", 12.0).width, 20.0);
        assert_eq!(measurer.measure("", 12.0).width, 0.0);
        assert_eq!(measurer.measure("é", 12.0).width, 5.0);
    }

    #[test]
    fn heuristic_width_grows_with_font_size() {
        let small = HeuristicTextMeasurer.measure("January", 10.0);
        let large = HeuristicTextMeasurer.measure("January", 20.0);
        assert!(large.width > small.width);
        assert!(HeuristicTextMeasurer.measure("WWW", 10.0).width > small.width * 0.3);
    }
}
