//! Rotation convention shared by every matrix this crate builds.
//!
//! Stored rotation is `(pitch, yaw, roll)` in turns (1.0 = 360°). Radians only
//! appear here, at the boundary with glam.
//!
//! Composition follows the first-person camera convention:
//!
//! 1. yaw about world up (+Y),
//! 2. pitch about the right axis derived from the yawed forward,
//! 3. roll about the yawed forward,
//!
//! combined as `roll * pitch * yaw`. The local forward axis before any rotation
//! is +Z, so the derived right is `up × forward` = +X at zero yaw. Collapsing
//! the derived axes gives the intrinsic `Y * Z * X` product, which is what
//! [`turns_from_quat`] inverts.

use std::f32::consts::TAU;

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Local forward axis before rotation.
pub const LOCAL_FORWARD: Vec3 = Vec3::Z;

#[inline]
pub fn turns_to_radians(turns: f32) -> f32 {
    turns * TAU
}

#[inline]
pub fn radians_to_turns(radians: f32) -> f32 {
    radians / TAU
}

/// Build the orientation for `(pitch, yaw, roll)` given in turns.
pub fn quat_from_turns(pitch_yaw_roll: Vec3) -> Quat {
    let pitch = turns_to_radians(pitch_yaw_roll.x);
    let yaw = turns_to_radians(pitch_yaw_roll.y);
    let roll = turns_to_radians(pitch_yaw_roll.z);

    let yaw_q = Quat::from_rotation_y(yaw);
    let forward = yaw_q * LOCAL_FORWARD;
    let right = Vec3::Y.cross(forward).normalize();

    let pitch_q = Quat::from_axis_angle(right, pitch);
    let roll_q = Quat::from_axis_angle(forward, roll);

    (roll_q * pitch_q * yaw_q).normalize()
}

#[inline]
pub fn rotation_matrix_from_turns(pitch_yaw_roll: Vec3) -> Mat4 {
    Mat4::from_quat(quat_from_turns(pitch_yaw_roll))
}

/// Recover `(pitch, yaw, roll)` in turns from an orientation.
///
/// Unique while roll stays inside ±¼ turn; at the boundary a different but
/// equivalent yaw/pitch pair may come back.
pub fn turns_from_quat(rotation: Quat) -> Vec3 {
    let (yaw, roll, pitch) = rotation.to_euler(EulerRot::YZX);
    Vec3::new(
        radians_to_turns(pitch),
        radians_to_turns(yaw),
        radians_to_turns(roll),
    )
}
