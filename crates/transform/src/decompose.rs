//! Matrix decomposition into translation, rotation, scale, skew and perspective.

use glam::{Mat3, Mat4, Quat, Vec3, Vec4};

use crate::error::{TransformError, TransformResult};

/// Tolerance for the bottom-row and perspective checks.
pub const DECOMPOSITION_TOLERANCE: f32 = 1e-5;

/// Parts of an affine matrix, as recovered by [`decompose`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decomposition {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    /// Shear factors `(yz, xz, xy)`; zero for a pure TRS matrix.
    pub skew: Vec3,
    /// `(0, 0, 0, 1)` for an affine matrix.
    pub perspective: Vec4,
}

impl Decomposition {
    #[inline]
    pub fn has_skew(&self) -> bool {
        self.skew.abs().max_element() > DECOMPOSITION_TOLERANCE
    }
}

/// Fails when the bottom row is not `(0, 0, 0, 1)` within tolerance.
pub fn check_bottom_row(matrix: &Mat4) -> TransformResult<()> {
    let row = matrix.row(3);
    if row.abs_diff_eq(Vec4::W, DECOMPOSITION_TOLERANCE) {
        Ok(())
    } else {
        Err(TransformError::NonAffineBottomRow { row })
    }
}

/// Split `matrix` into its parts.
///
/// Runs the bottom-row check first, then a full decomposition, then rejects a
/// non-negligible perspective component.
pub fn decompose(matrix: &Mat4) -> TransformResult<Decomposition> {
    check_bottom_row(matrix)?;
    let parts = decompose_unchecked(matrix)?;

    let magnitude = parts.perspective.truncate().length();
    if magnitude > DECOMPOSITION_TOLERANCE {
        return Err(TransformError::PerspectiveComponent { magnitude });
    }
    Ok(parts)
}

/// Pure predicate form of [`decompose`].
pub fn matrix_is_decomposable(matrix: &Mat4) -> bool {
    match decompose(matrix) {
        Ok(_) => true,
        Err(err) => {
            log::trace!("matrix is not decomposable: {err}");
            false
        }
    }
}

fn decompose_unchecked(matrix: &Mat4) -> TransformResult<Decomposition> {
    let w = matrix.w_axis.w;
    if w.abs() <= f32::EPSILON {
        return Err(TransformError::DegenerateMatrix);
    }
    let local = *matrix * (1.0 / w);

    let perspective = perspective_of(&local)?;
    let translation = local.w_axis.truncate();

    let mut x = local.x_axis.truncate();
    let mut y = local.y_axis.truncate();
    let mut z = local.z_axis.truncate();
    let mut scale = Vec3::ZERO;
    let mut skew = Vec3::ZERO;

    // Gram-Schmidt over the basis columns, collecting scale and shear.
    scale.x = x.length();
    x = normalized(x)?;

    skew.z = x.dot(y);
    y -= x * skew.z;
    scale.y = y.length();
    y = normalized(y)?;
    skew.z /= scale.y;

    skew.y = x.dot(z);
    z -= x * skew.y;
    skew.x = y.dot(z);
    z -= y * skew.x;
    scale.z = z.length();
    z = normalized(z)?;
    skew.y /= scale.z;
    skew.x /= scale.z;

    // Mirrored basis: fold the reflection into the scale.
    if x.dot(y.cross(z)) < 0.0 {
        scale = -scale;
        x = -x;
        y = -y;
        z = -z;
    }

    let rotation = Quat::from_mat3(&Mat3::from_cols(x, y, z)).normalize();

    Ok(Decomposition {
        translation,
        rotation,
        scale,
        skew,
        perspective,
    })
}

fn perspective_of(local: &Mat4) -> TransformResult<Vec4> {
    let rhs = local.row(3);
    if rhs.truncate().abs_diff_eq(Vec3::ZERO, f32::EPSILON) {
        return Ok(Vec4::W);
    }

    let mut projection = *local;
    projection.x_axis.w = 0.0;
    projection.y_axis.w = 0.0;
    projection.z_axis.w = 0.0;
    projection.w_axis.w = 1.0;
    if projection.determinant().abs() <= f32::EPSILON {
        return Err(TransformError::DegenerateMatrix);
    }
    Ok(projection.transpose().inverse() * rhs)
}

fn normalized(v: Vec3) -> TransformResult<Vec3> {
    v.try_normalize().ok_or(TransformError::DegenerateMatrix)
}
