use crate::axis::AxisOrientation;
use crate::render::TextAnchor;

/// Default fallback rotation in degrees.
pub const DEFAULT_ROTATION_DEG: f64 = 30.0;

/// Allowance for the rotated line height when sizing the axis.
pub const ROTATED_LINE_ALLOWANCE_PX: f64 = 11.0;

/// Folds any angle into `[-90, 90)`; text rotated by 180 reads the same way up.
#[must_use]
pub fn normalize_angle(angle_deg: f64) -> f64 {
    (angle_deg + 90.0).rem_euclid(180.0) - 90.0
}

/// Backend rotation for a normalized angle. Bottom labels turn counter-clockwise
/// for positive angles; top axes mirror the sign.
#[must_use]
pub fn screen_rotation(normalized_deg: f64, orientation: AxisOrientation) -> f64 {
    match orientation {
        AxisOrientation::Top => normalized_deg,
        _ => -normalized_deg,
    }
}

/// On-screen anchor for a rotated label.
#[must_use]
pub fn rotated_anchor(normalized_deg: f64) -> TextAnchor {
    if normalized_deg > 0.0 {
        TextAnchor::End
    } else if normalized_deg < 0.0 {
        TextAnchor::Start
    } else {
        TextAnchor::Middle
    }
}

/// Perpendicular extent of rotated labels.
#[must_use]
pub fn rotated_extent(normalized_deg: f64, max_width: f64) -> f64 {
    let (sin, cos) = normalized_deg.to_radians().sin_cos();
    sin.abs() * max_width + cos.abs() * ROTATED_LINE_ALLOWANCE_PX
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{normalize_angle, rotated_anchor, rotated_extent, screen_rotation};
    use crate::axis::AxisOrientation;
    use crate::render::TextAnchor;

    #[test]
    fn angles_fold_into_half_turn() {
        assert_relative_eq!(normalize_angle(30.0), 30.0);
        assert_relative_eq!(normalize_angle(120.0), -60.0);
        assert_relative_eq!(normalize_angle(-135.0), 45.0);
        assert_relative_eq!(normalize_angle(390.0), 30.0);
    }

    #[test]
    fn anchor_and_sign_follow_angle_and_side() {
        assert_eq!(rotated_anchor(30.0), TextAnchor::End);
        assert_eq!(rotated_anchor(-45.0), TextAnchor::Start);
        assert_eq!(rotated_anchor(0.0), TextAnchor::Middle);
        assert_relative_eq!(screen_rotation(30.0, AxisOrientation::Bottom), -30.0);
        assert_relative_eq!(screen_rotation(30.0, AxisOrientation::Top), 30.0);
    }

    #[test]
    fn extent_mixes_width_and_line_allowance() {
        assert_relative_eq!(rotated_extent(30.0, 100.0), 50.0 + 11.0 * 0.75_f64.sqrt(), epsilon = 1e-9);
        assert_relative_eq!(rotated_extent(0.0, 100.0), 11.0, epsilon = 1e-9);
    }
}
