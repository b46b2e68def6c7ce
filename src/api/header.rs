use crate::core::Bounds;
use crate::render::{
    Color, PrimitiveRole, RectPrimitive, RenderFrame, TextAnchor, TextBaseline, TextMeasurer,
    TextPrimitive,
};

const TITLE_GAP_PX: f64 = 8.0;
const SWATCH_PX: f64 = 10.0;
const SWATCH_GAP_PX: f64 = 5.0;
const ITEM_GAP_PX: f64 = 16.0;
const ROW_GAP_PX: f64 = 4.0;

/// One series as shown in the legend strip.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub key: String,
    pub color: Color,
    pub disabled: bool,
}

/// Positioned legend item, relative to the header origin.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendItem {
    pub entry: LegendEntry,
    pub swatch: Bounds,
    pub text_x: f64,
    pub text_y: f64,
    pub row: usize,
}

/// Title and legend strip drawn above the plot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeaderLayout {
    pub title: Option<String>,
    pub title_height: f64,
    pub items: Vec<LegendItem>,
    pub rows: usize,
    /// Total height subtracted from the plot area.
    pub height: f64,
    width: f64,
    title_font_size_px: f64,
    legend_font_size_px: f64,
}

impl HeaderLayout {
    /// Lays out the title and wraps legend items into rows within `width`.
    pub fn compute(
        title: Option<&str>,
        entries: &[LegendEntry],
        width: f64,
        title_font_size_px: f64,
        legend_font_size_px: f64,
        rtl: bool,
        measurer: &dyn TextMeasurer,
    ) -> Self {
        let title = title.filter(|t| !t.trim().is_empty()).map(str::to_owned);
        let title_height = title
            .as_deref()
            .map_or(0.0, |t| measurer.measure(t, title_font_size_px).height + TITLE_GAP_PX);

        let mut items = Vec::with_capacity(entries.len());
        let mut cursor = 0.0;
        let mut row = 0;
        let mut row_height: f64 = 0.0;
        let mut top = title_height;
        for entry in entries {
            let metrics = measurer.measure(&entry.key, legend_font_size_px);
            let item_width = SWATCH_PX + SWATCH_GAP_PX + metrics.width;
            if cursor > 0.0 && cursor + item_width > width {
                top += row_height + ROW_GAP_PX;
                cursor = 0.0;
                row += 1;
                row_height = 0.0;
            }
            let line_height = metrics.height.max(SWATCH_PX);
            row_height = row_height.max(line_height);
            let left = if rtl {
                width - cursor - item_width
            } else {
                cursor
            };
            let (swatch_left, text_x) = if rtl {
                (left + item_width - SWATCH_PX, left + item_width - SWATCH_PX - SWATCH_GAP_PX)
            } else {
                (left, left + SWATCH_PX + SWATCH_GAP_PX)
            };
            let swatch_top = top + (line_height - SWATCH_PX) / 2.0;
            items.push(LegendItem {
                entry: entry.clone(),
                swatch: Bounds::from_origin_size(swatch_left, swatch_top, SWATCH_PX, SWATCH_PX),
                text_x,
                text_y: top + line_height / 2.0,
                row,
            });
            cursor += item_width + ITEM_GAP_PX;
        }

        let rows = if items.is_empty() { 0 } else { row + 1 };
        let legend_height = if rows == 0 {
            0.0
        } else {
            top - title_height + row_height + ROW_GAP_PX
        };

        Self {
            title,
            title_height,
            items,
            rows,
            height: title_height + legend_height,
            width,
            title_font_size_px,
            legend_font_size_px,
        }
    }

    pub fn append_to_frame(&self, frame: &mut RenderFrame, origin: (f64, f64), rtl: bool) {
        let (dx, dy) = origin;
        if let Some(title) = &self.title {
            frame.texts.push(
                TextPrimitive::new(
                    title.clone(),
                    dx + self.width / 2.0,
                    dy,
                    self.title_font_size_px,
                    Color::TEXT,
                    TextAnchor::Middle,
                )
                .with_baseline(TextBaseline::Hanging)
                .with_rtl(rtl)
                .with_role(PrimitiveRole::Title),
            );
        }
        for item in &self.items {
            let fill = if item.entry.disabled {
                Color { alpha: 0.25, ..item.entry.color }
            } else {
                item.entry.color
            };
            frame.rects.push(
                RectPrimitive::new(
                    dx + item.swatch.left,
                    dy + item.swatch.top,
                    item.swatch.width(),
                    item.swatch.height(),
                    fill,
                )
                .with_role(PrimitiveRole::Legend),
            );
            if item.entry.key.is_empty() {
                continue;
            }
            // Reading-order start is the right edge in right-to-left layouts.
            frame.texts.push(
                TextPrimitive::new(
                    item.entry.key.clone(),
                    dx + item.text_x,
                    dy + item.text_y,
                    self.legend_font_size_px,
                    Color::TEXT,
                    TextAnchor::Start,
                )
                .with_baseline(TextBaseline::Middle)
                .with_rtl(rtl)
                .with_role(PrimitiveRole::Legend),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{HeaderLayout, LegendEntry};
    use crate::render::{Color, MonospaceTextMeasurer};

    fn entries(keys: &[&str]) -> Vec<LegendEntry> {
        keys.iter()
            .map(|key| LegendEntry {
                key: (*key).to_owned(),
                color: Color::BLACK,
                disabled: false,
            })
            .collect()
    }

    #[test]
    fn legend_wraps_into_rows() {
        let measurer = MonospaceTextMeasurer::new(10.0, 14.0);
        // Each item: 10 + 5 + 40 = 55px, plus 16px gap.
        let header = HeaderLayout::compute(
            Some("Sales"),
            &entries(&["East", "West", "Nord"]),
            130.0,
            16.0,
            12.0,
            false,
            &measurer,
        );
        assert_eq!(header.rows, 2);
        assert_eq!(header.items[2].row, 1);
        assert_relative_eq!(header.title_height, 22.0);
        assert_relative_eq!(header.height, 22.0 + 14.0 + 4.0 + 14.0 + 4.0);
    }

    #[test]
    fn empty_header_takes_no_space() {
        let measurer = MonospaceTextMeasurer::default();
        let header = HeaderLayout::compute(None, &[], 300.0, 16.0, 12.0, false, &measurer);
        assert_eq!(header.height, 0.0);
        assert_eq!(header.rows, 0);
    }

    #[test]
    fn rtl_starts_items_from_the_right_edge() {
        let measurer = MonospaceTextMeasurer::new(10.0, 14.0);
        let header =
            HeaderLayout::compute(None, &entries(&["East"]), 200.0, 16.0, 12.0, true, &measurer);
        assert_relative_eq!(header.items[0].swatch.right, 200.0);
        assert_relative_eq!(header.items[0].text_x, 185.0);
    }
}
