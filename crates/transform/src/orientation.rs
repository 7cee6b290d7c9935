//! Rotation-only and look-at matrices built from direction vectors.
//!
//! All of these place the look direction on local -Z (right-handed camera
//! convention): the third column holds `-look`. Look vectors must be non-zero.

use glam::{Mat4, Vec3, Vec4};

use crate::transform::Transform;

pub const WORLD_UP: Vec3 = Vec3::Y;

/// Below this, `look × hint` is treated as parallel.
const PARALLEL_EPSILON: f32 = 1e-6;

/// Rotation whose columns are `right`, `up` and `-look`.
///
/// The inputs are used as given; pass an orthonormal basis.
pub fn create_billboard_transform(right: Vec3, up: Vec3, look: Vec3) -> Mat4 {
    Mat4::from_cols(
        right.extend(0.0),
        up.extend(0.0),
        (-look).extend(0.0),
        Vec4::W,
    )
}

/// Billboard facing `look`, with right and up derived against world up.
pub fn create_billboard_transform_from_look(look: Vec3) -> Mat4 {
    let (right, up, look) = basis_from_look(look, WORLD_UP);
    create_billboard_transform(right, up, look)
}

/// Billboard that may only spin about `lock_axis`, which is used directly as up.
///
/// The look direction is flattened onto the plane orthogonal to the lock axis,
/// e.g. a standing character turning toward a target above it.
pub fn create_billboard_transform_with_lock_axis(lock_axis: Vec3, look: Vec3) -> Mat4 {
    let up = lock_axis.normalize();
    let crossed = look.normalize().cross(up);
    let right = if crossed.length_squared() > PARALLEL_EPSILON {
        crossed.normalize()
    } else {
        // Looking straight along the lock axis: any right orthogonal to it works.
        up.cross(fallback_hint(up)).normalize()
    };
    let look = up.cross(right);
    create_billboard_transform(right, up, look)
}

/// Billboard built from a transform's computed right/up/forward vectors.
pub fn create_billboard_transform_for(transform: &Transform) -> Mat4 {
    create_billboard_transform(
        transform.compute_right_vector(),
        transform.compute_up_vector(),
        transform.compute_forward_vector(),
    )
}

/// Look-at style model matrix: billboard basis plus `position` in the fourth column.
pub fn create_translation_and_look_transform(position: Vec3, look: Vec3, up_hint: Vec3) -> Mat4 {
    let (right, up, look) = basis_from_look(look, up_hint);
    let mut matrix = create_billboard_transform(right, up, look);
    matrix.w_axis = position.extend(1.0);
    matrix
}

/// Matrix taking local +Y onto `look` and the origin onto `position`.
///
/// Useful for geometry modelled along +Y (cylinders, arrows).
pub fn change_of_basis_move_y_to_look_dir(position: Vec3, look: Vec3, up_hint: Vec3) -> Mat4 {
    let y = look.normalize();
    let x = y.cross(hint_for(y, up_hint)).normalize();
    let z = x.cross(y);
    Mat4::from_cols(x.extend(0.0), y.extend(0.0), z.extend(0.0), position.extend(1.0))
}

/// Orthonormal `(right, up, look)` with `look` normalized.
pub fn basis_from_look(look: Vec3, up_hint: Vec3) -> (Vec3, Vec3, Vec3) {
    let look = look.normalize();
    let right = look.cross(hint_for(look, up_hint)).normalize();
    let up = right.cross(look).normalize();
    (right, up, look)
}

/// `up_hint`, unless it is parallel to `look`.
fn hint_for(look: Vec3, up_hint: Vec3) -> Vec3 {
    if look.cross(up_hint).length_squared() > PARALLEL_EPSILON {
        up_hint
    } else {
        fallback_hint(look)
    }
}

/// World axis that is far from parallel to `v`.
fn fallback_hint(v: Vec3) -> Vec3 {
    if v.x.abs() < 0.9 { Vec3::X } else { Vec3::Z }
}
