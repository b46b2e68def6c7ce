//! Axis tick layout and label collision resolution.
//!
//! An axis lays its labels out along the scale range, detects overlaps between
//! neighbouring labels and, for horizontal axes, walks a fixed chain of
//! fallbacks (wrap, stagger, rotate) until the labels fit. The resulting
//! thickness and edge overhang are reported as a [`crate::core::Margin`] that
//! the chart feeds back into its plot area.

mod collision;
mod config;
mod dimensions;
mod label;
mod layout;
mod rotate;
mod strategy;
mod wrap;

pub use collision::{collision_count, has_collision};
pub use config::{AxisConfig, AxisOrientation, Direction, TickFormatter};
pub use dimensions::{TickDimension, tick_dimensions};
pub use label::TickLabel;
pub use layout::{AxisLayout, AxisTick, AxisTitle};
pub use rotate::{
    DEFAULT_ROTATION_DEG, ROTATED_LINE_ALLOWANCE_PX, normalize_angle, rotated_anchor,
    rotated_extent, screen_rotation,
};
pub use strategy::{LabelStrategy, ResolverState, StrategyFlags};
pub use wrap::{tick_spacing, wrap_words};
