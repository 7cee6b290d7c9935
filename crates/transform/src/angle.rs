//! Angle containment tests with thresholds in turns.

use glam::Vec3;

use crate::rotation::turns_to_radians;

/// `true` when the angle between `v` and `w` is at most `turns` of a full turn.
///
/// Thresholds outside `[0, 1]` and zero-length inputs are never within.
pub fn angle_between_vectors_is_within(v: Vec3, w: Vec3, turns: f32) -> bool {
    if !(0.0..=1.0).contains(&turns) {
        log::debug!("angle threshold {turns} is outside [0, 1] turns");
        return false;
    }
    let (Some(v), Some(w)) = (v.try_normalize(), w.try_normalize()) else {
        return false;
    };

    // Exactly zero for parallel inputs.
    let angle = v.cross(w).length().atan2(v.dot(w));
    angle <= turns_to_radians(turns)
}

/// `true` when `other` lies within ± half of `sector_angle_turns` around `center`.
///
/// The sector width itself must be in `[0, 1]` turns.
pub fn vector_is_within_centered_sector(center: Vec3, other: Vec3, sector_angle_turns: f32) -> bool {
    if !(0.0..=1.0).contains(&sector_angle_turns) {
        log::debug!("sector width {sector_angle_turns} is outside [0, 1] turns");
        return false;
    }
    angle_between_vectors_is_within(center, other, sector_angle_turns / 2.0)
}
