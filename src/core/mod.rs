pub mod data;
pub mod scale;
pub mod ticks;
pub mod types;

pub use data::{ChartData, ChartProperties, DataType, Datum, Group, Series, SeriesValue};
pub use scale::{BandScale, ContinuousScale, Scale, ScaleKind, TickValue};
pub use types::{Bounds, Margin, Viewport};
