use smallvec::{SmallVec, smallvec};

use crate::core::ticks::min_spacing;
use crate::render::TextMeasurer;

/// Greedy word wrap within `max_width`.
///
/// Words are accumulated while the measured line stays within `max_width`; a
/// single word wider than that still occupies a line on its own.
pub fn wrap_words(
    text: &str,
    max_width: f64,
    measurer: &dyn TextMeasurer,
    font_size_px: f64,
) -> SmallVec<[String; 2]> {
    let mut lines: SmallVec<[String; 2]> = SmallVec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if measurer.measure(&candidate, font_size_px).width <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_owned()));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        return smallvec![text.to_owned()];
    }
    lines
}

/// Distance available to each label along the axis.
///
/// Band scales pass their step; continuous scales the minimum adjacent tick
/// distance. A single tick gets the whole range.
#[must_use]
pub fn tick_spacing(band_step: Option<f64>, positions: &[f64], range_span: f64) -> f64 {
    if let Some(step) = band_step {
        return step.abs();
    }
    let mut sorted: Vec<f64> = positions.iter().copied().filter(|p| p.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    match min_spacing(&sorted) {
        spacing if spacing > 0.0 => spacing,
        _ => range_span.abs(),
    }
}
