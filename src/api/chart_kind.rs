use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ChartError;

use super::{BarPainter, BubblePainter, LinePainter, NoopPainter, SeriesPainter};

/// Closed registry of chart types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Area,
    Pie,
    Funnel,
    Bubble,
    Tree,
    Globe,
}

impl ChartKind {
    pub const ALL: [Self; 8] = [
        Self::Bar,
        Self::Line,
        Self::Area,
        Self::Pie,
        Self::Funnel,
        Self::Bubble,
        Self::Tree,
        Self::Globe,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Line => "line",
            Self::Area => "area",
            Self::Pie => "pie",
            Self::Funnel => "funnel",
            Self::Bubble => "bubble",
            Self::Tree => "tree",
            Self::Globe => "globe",
        }
    }

    /// Whether the kind draws cartesian axes and runs the margin passes.
    #[must_use]
    pub fn has_axes(self) -> bool {
        matches!(self, Self::Bar | Self::Line | Self::Area | Self::Bubble)
    }

    /// Fixed number of axis layout passes per render.
    #[must_use]
    pub fn layout_passes(self) -> usize {
        match self {
            Self::Bar | Self::Bubble => 3,
            Self::Line | Self::Area => 4,
            Self::Pie | Self::Funnel | Self::Tree | Self::Globe => 1,
        }
    }

    /// Painter used when the host does not plug in its own.
    #[must_use]
    pub fn default_painter(self) -> Box<dyn SeriesPainter> {
        match self {
            Self::Bar => Box::new(BarPainter),
            Self::Line => Box::new(LinePainter { fill_area: false }),
            Self::Area => Box::new(LinePainter { fill_area: true }),
            Self::Bubble => Box::new(BubblePainter::default()),
            Self::Pie | Self::Funnel | Self::Tree | Self::Globe => Box::new(NoopPainter),
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = ChartError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let normalized = tag.trim().to_ascii_lowercase();
        let kind = match normalized.as_str() {
            "bar" | "multibar" => Self::Bar,
            "line" => Self::Line,
            "area" | "stackedarea" => Self::Area,
            "pie" => Self::Pie,
            "funnel" => Self::Funnel,
            "bubble" | "scatter" => Self::Bubble,
            "tree" => Self::Tree,
            "globe" => Self::Globe,
            _ => return Err(ChartError::UnknownChartKind(tag.to_owned())),
        };
        Ok(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::ChartKind;

    #[test]
    fn tags_and_aliases_parse() {
        assert_eq!("multibar".parse::<ChartKind>().expect("kind"), ChartKind::Bar);
        assert_eq!(" StackedArea ".parse::<ChartKind>().expect("kind"), ChartKind::Area);
        assert_eq!("scatter".parse::<ChartKind>().expect("kind"), ChartKind::Bubble);
        assert!("sankey".parse::<ChartKind>().is_err());
        for kind in ChartKind::ALL {
            assert_eq!(kind.as_str().parse::<ChartKind>().expect("round trip"), kind);
        }
    }

    #[test]
    fn axis_kinds_run_multiple_passes() {
        for kind in ChartKind::ALL {
            if kind.has_axes() {
                assert!((2..=5).contains(&kind.layout_passes()));
            } else {
                assert_eq!(kind.default_painter().name(), "noop");
            }
        }
    }
}
