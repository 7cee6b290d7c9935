//! Translation / rotation / scale with a lazily cached matrix and an owned child chain.

use std::cell::Cell;
use std::fmt;

use glam::{Mat4, Quat, Vec2, Vec3};

use crate::decompose::decompose;
use crate::error::{TransformError, TransformResult};
use crate::rotation::{quat_from_turns, rotation_matrix_from_turns, turns_from_quat, turns_to_radians};

/// Order in which the elementary matrices are multiplied.
///
/// Matrices act on column vectors, so the rightmost factor is applied first.
/// Scale is always applied first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TransformApplicationOrder {
    /// `rotation * translation * scale`
    ScaleTranslationRotation,
    /// `translation * rotation * scale`
    #[default]
    ScaleRotationTranslation,
}

impl TransformApplicationOrder {
    #[inline]
    pub fn compose(self, translation: Mat4, rotation: Mat4, scale: Mat4) -> Mat4 {
        match self {
            Self::ScaleTranslationRotation => rotation * translation * scale,
            Self::ScaleRotationTranslation => translation * rotation * scale,
        }
    }
}

/// Position, orientation and scale of an object, optionally chained to a child.
///
/// Rotation is stored as `(pitch, yaw, roll)` in turns; see [`crate::rotation`]
/// for how it becomes a matrix.
///
/// The matrix returned by [`Transform::matrix`] comes from exactly one source:
/// the override matrix while one is set, otherwise the TRS fields. TRS writes
/// made while an override is active are kept and take effect once it is cleared.
///
/// The child is exclusively owned: cloning deep-copies the whole chain and
/// dropping a transform drops its descendants.
#[derive(Clone, Debug)]
pub struct Transform {
    translation: Vec3,
    rotation: Vec3,
    scale: Vec3,
    order: TransformApplicationOrder,
    matrix_override: Option<Mat4>,
    child: Option<Box<Transform>>,
    /// `None` when stale.
    cached_matrix: Cell<Option<Mat4>>,
}

impl Transform {
    #[inline]
    pub const fn identity() -> Self {
        Self::with_order(
            Vec3::ZERO,
            Vec3::ZERO,
            Vec3::ONE,
            TransformApplicationOrder::ScaleRotationTranslation,
        )
    }

    #[inline]
    pub const fn new() -> Self {
        Self::identity()
    }

    /// `rotation` is `(pitch, yaw, roll)` in turns.
    #[inline]
    pub const fn from_trs(translation: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self::with_order(
            translation,
            rotation,
            scale,
            TransformApplicationOrder::ScaleRotationTranslation,
        )
    }

    pub const fn with_order(
        translation: Vec3,
        rotation: Vec3,
        scale: Vec3,
        order: TransformApplicationOrder,
    ) -> Self {
        Self {
            translation,
            rotation,
            scale,
            order,
            matrix_override: None,
            child: None,
            cached_matrix: Cell::new(None),
        }
    }

    #[inline]
    fn invalidate(&self) {
        self.cached_matrix.set(None);
    }

    #[inline]
    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    /// `(pitch, yaw, roll)` in turns.
    #[inline]
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    #[inline]
    pub fn rotation_pitch(&self) -> f32 {
        self.rotation.x
    }

    #[inline]
    pub fn rotation_yaw(&self) -> f32 {
        self.rotation.y
    }

    #[inline]
    pub fn rotation_roll(&self) -> f32 {
        self.rotation.z
    }

    #[inline]
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    #[inline]
    pub fn application_order(&self) -> TransformApplicationOrder {
        self.order
    }

    pub fn set_translation(&mut self, translation: Vec3) {
        self.translation = translation;
        self.invalidate();
    }

    pub fn set_translation_x(&mut self, x: f32) {
        self.translation.x = x;
        self.invalidate();
    }

    pub fn set_translation_y(&mut self, y: f32) {
        self.translation.y = y;
        self.invalidate();
    }

    pub fn set_translation_z(&mut self, z: f32) {
        self.translation.z = z;
        self.invalidate();
    }

    pub fn add_translation(&mut self, offset: Vec3) {
        self.translation += offset;
        self.invalidate();
    }

    pub fn reset_translation(&mut self) {
        self.set_translation(Vec3::ZERO);
    }

    pub fn set_rotation(&mut self, pitch_yaw_roll: Vec3) {
        self.rotation = pitch_yaw_roll;
        self.invalidate();
    }

    pub fn set_rotation_pitch(&mut self, pitch: f32) {
        self.rotation.x = pitch;
        self.invalidate();
    }

    pub fn set_rotation_yaw(&mut self, yaw: f32) {
        self.rotation.y = yaw;
        self.invalidate();
    }

    pub fn set_rotation_roll(&mut self, roll: f32) {
        self.rotation.z = roll;
        self.invalidate();
    }

    /// Not wrapped: a pitch of 1.25 stays 1.25.
    pub fn add_rotation(&mut self, pitch_yaw_roll: Vec3) {
        self.rotation += pitch_yaw_roll;
        self.invalidate();
    }

    pub fn add_rotation_pitch(&mut self, pitch: f32) {
        self.rotation.x += pitch;
        self.invalidate();
    }

    pub fn add_rotation_yaw(&mut self, yaw: f32) {
        self.rotation.y += yaw;
        self.invalidate();
    }

    pub fn add_rotation_roll(&mut self, roll: f32) {
        self.rotation.z += roll;
        self.invalidate();
    }

    pub fn reset_pitch(&mut self) {
        self.set_rotation_pitch(0.0);
    }

    pub fn reset_yaw(&mut self) {
        self.set_rotation_yaw(0.0);
    }

    pub fn reset_roll(&mut self) {
        self.set_rotation_roll(0.0);
    }

    pub fn reset_rotation(&mut self) {
        self.set_rotation(Vec3::ZERO);
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.invalidate();
    }

    pub fn set_uniform_scale(&mut self, scale: f32) {
        self.set_scale(Vec3::splat(scale));
    }

    pub fn set_scale_x(&mut self, x: f32) {
        self.scale.x = x;
        self.invalidate();
    }

    pub fn set_scale_y(&mut self, y: f32) {
        self.scale.y = y;
        self.invalidate();
    }

    pub fn set_scale_z(&mut self, z: f32) {
        self.scale.z = z;
        self.invalidate();
    }

    pub fn reset_scale(&mut self) {
        self.set_scale(Vec3::ONE);
    }

    pub fn set_application_order(&mut self, order: TransformApplicationOrder) {
        self.order = order;
        self.invalidate();
    }

    /// Back to zero translation, zero rotation and unit scale.
    ///
    /// The application order, override and child are left alone.
    pub fn reset(&mut self) {
        self.translation = Vec3::ZERO;
        self.rotation = Vec3::ZERO;
        self.scale = Vec3::ONE;
        self.invalidate();
    }

    #[inline]
    pub fn translation_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.translation)
    }

    #[inline]
    pub fn rotation_matrix(&self) -> Mat4 {
        rotation_matrix_from_turns(self.rotation)
    }

    #[inline]
    pub fn scale_matrix(&self) -> Mat4 {
        Mat4::from_scale(self.scale)
    }

    /// Local-to-parent matrix of this node alone.
    ///
    /// Returns the override verbatim when one is set; otherwise the TRS product
    /// in [`TransformApplicationOrder`], recomputed only after a mutation.
    pub fn matrix(&self) -> Mat4 {
        if let Some(matrix) = self.matrix_override {
            return matrix;
        }
        if let Some(matrix) = self.cached_matrix.get() {
            return matrix;
        }

        let matrix = self.order.compose(
            self.translation_matrix(),
            self.rotation_matrix(),
            self.scale_matrix(),
        );
        log::trace!("recomputed transform matrix ({:?})", self.order);
        self.cached_matrix.set(Some(matrix));
        matrix
    }

    /// Local-to-root matrix of the chain starting here: `self * child * grandchild ...`.
    pub fn full_matrix(&self) -> Mat4 {
        self.chain().fold(Mat4::IDENTITY, |acc, node| acc * node.matrix())
    }

    pub fn set_matrix_override(&mut self, matrix: Mat4) {
        self.matrix_override = Some(matrix);
    }

    pub fn clear_matrix_override(&mut self) {
        self.matrix_override = None;
    }

    #[inline]
    pub fn matrix_override(&self) -> Option<Mat4> {
        self.matrix_override
    }

    /// Replace translation, rotation and scale with the ones encoded in `matrix`.
    ///
    /// The matrix is interpreted under this transform's application order.
    /// On success any override matrix is cleared, so [`Transform::matrix`]
    /// reflects the new state. On error nothing changes.
    pub fn set_transform_matrix(&mut self, matrix: &Mat4) -> TransformResult<()> {
        let parts = decompose(matrix).inspect_err(|err| {
            log::warn!("rejected transform matrix: {err}");
        })?;
        if parts.has_skew() {
            log::warn!("transform matrix skew {} cannot be stored and is dropped", parts.skew);
        }

        self.translation = match self.order {
            TransformApplicationOrder::ScaleRotationTranslation => parts.translation,
            // R * T * S puts R * t in the translation column.
            TransformApplicationOrder::ScaleTranslationRotation => {
                parts.rotation.inverse() * parts.translation
            }
        };
        self.rotation = turns_from_quat(parts.rotation);
        self.scale = parts.scale;
        if self.matrix_override.take().is_some() {
            log::debug!("matrix override cleared by set_transform_matrix");
        }
        self.invalidate();
        Ok(())
    }

    /// Adopt `child`, dropping any previous one (and its descendants).
    pub fn set_child(&mut self, child: Transform) {
        if self.child.is_some() {
            log::debug!("replacing existing child transform");
        }
        self.child = Some(Box::new(child));
    }

    #[inline]
    pub fn child(&self) -> Option<&Transform> {
        self.child.as_deref()
    }

    #[inline]
    pub fn child_mut(&mut self) -> Option<&mut Transform> {
        self.child.as_deref_mut()
    }

    /// Detach and return the child together with its own descendants.
    pub fn take_child(&mut self) -> Option<Transform> {
        self.child.take().map(|child| *child)
    }

    pub fn clear_child(&mut self) {
        self.child = None;
    }

    /// This node followed by each descendant.
    pub fn chain(&self) -> impl Iterator<Item = &Transform> {
        std::iter::successors(Some(self), |node| node.child())
    }

    /// Number of nodes in the chain, including this one.
    pub fn chain_len(&self) -> usize {
        self.chain().count()
    }

    /// Negated translation and rotation with reciprocal scale, same order.
    ///
    /// The caller must not invert a transform with a zero scale component; see
    /// [`Transform::checked_inverse_transform`]. The child is not carried over.
    pub fn inverse_transform(&self) -> Transform {
        debug_assert!(
            self.scale.cmpne(Vec3::ZERO).all(),
            "inverse of a zero-scaled transform"
        );
        Self::with_order(
            -self.translation,
            -self.rotation,
            self.scale.recip(),
            self.order,
        )
    }

    pub fn checked_inverse_transform(&self) -> TransformResult<Transform> {
        match (0..3).find(|&axis| self.scale[axis] == 0.0) {
            Some(axis) => Err(TransformError::ZeroScale { axis }),
            None => Ok(self.inverse_transform()),
        }
    }

    /// `(cos p · cos y, sin p, cos p · sin y)` for pitch `p` and yaw `y`.
    pub fn compute_forward_vector(&self) -> Vec3 {
        let pitch = turns_to_radians(self.rotation.x);
        let yaw = turns_to_radians(self.rotation.y);
        Vec3::new(pitch.cos() * yaw.cos(), pitch.sin(), pitch.cos() * yaw.sin()).normalize()
    }

    /// Forward projected onto the XZ plane; pitch is ignored.
    pub fn compute_xz_forward_vector(&self) -> Vec3 {
        let yaw = turns_to_radians(self.rotation.y);
        Vec3::new(yaw.cos(), 0.0, yaw.sin()).normalize()
    }

    /// Planar forward `(cos y, sin y)` for top-down logic.
    pub fn compute_xz_forward_vector_r2(&self) -> Vec2 {
        let yaw = turns_to_radians(self.rotation.y);
        Vec2::new(yaw.cos(), yaw.sin())
    }

    pub fn compute_right_vector(&self) -> Vec3 {
        self.compute_forward_vector().cross(Vec3::Y).normalize()
    }

    pub fn compute_up_vector(&self) -> Vec3 {
        let forward = self.compute_forward_vector();
        let right = forward.cross(Vec3::Y).normalize();
        right.cross(forward).normalize()
    }

    /// Orientation quaternion of the stored rotation.
    #[inline]
    pub fn orientation(&self) -> Quat {
        quat_from_turns(self.rotation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl PartialEq for Transform {
    fn eq(&self, other: &Self) -> bool {
        self.translation == other.translation
            && self.rotation == other.rotation
            && self.scale == other.scale
            && self.order == other.order
            && self.matrix_override == other.matrix_override
            && self.child == other.child
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Vec3 { x, y, z } = self.translation;
        writeln!(f, "Position: ({x}, {y}, {z})")?;
        let Vec3 { x, y, z } = self.rotation;
        writeln!(f, "Rotation: ({x}, {y}, {z})")?;
        let Vec3 { x, y, z } = self.scale;
        writeln!(f, "Scale: ({x}, {y}, {z})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sample() -> Transform {
        Transform::from_trs(
            Vec3::new(1.0, -2.0, 0.5),
            Vec3::new(0.05, 0.1, -0.08),
            Vec3::new(2.0, 1.0, 0.5),
        )
    }

    #[test]
    fn defaults_are_identity() {
        let t = Transform::new();
        assert_eq!(t.translation(), Vec3::ZERO);
        assert_eq!(t.rotation(), Vec3::ZERO);
        assert_eq!(t.scale(), Vec3::ONE);
        assert_eq!(
            t.application_order(),
            TransformApplicationOrder::ScaleRotationTranslation
        );
        assert_eq!(t.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn translation_mutators() {
        let mut t = Transform::new();
        t.set_translation(Vec3::new(1.0, 2.0, 3.0));
        t.set_translation_y(5.0);
        t.add_translation(Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(t.translation(), Vec3::new(2.0, 6.0, 4.0));
        t.set_translation_x(-1.0);
        t.set_translation_z(0.0);
        assert_eq!(t.translation(), Vec3::new(-1.0, 6.0, 0.0));
        t.reset_translation();
        assert_eq!(t.translation(), Vec3::ZERO);
    }

    #[test]
    fn rotation_is_not_wrapped() {
        let mut t = Transform::new();
        t.set_rotation_pitch(0.75);
        t.add_rotation_pitch(0.5);
        t.add_rotation_yaw(-1.5);
        t.set_rotation_roll(0.1);
        t.add_rotation_roll(0.1);
        assert_abs_diff_eq!(t.rotation_pitch(), 1.25);
        assert_abs_diff_eq!(t.rotation_yaw(), -1.5);
        assert_abs_diff_eq!(t.rotation_roll(), 0.2);

        t.reset_yaw();
        assert_eq!(t.rotation_yaw(), 0.0);
        t.reset_pitch();
        t.reset_roll();
        assert_eq!(t.rotation(), Vec3::ZERO);
    }

    #[test]
    fn scale_mutators_accept_degenerate_values() {
        let mut t = Transform::new();
        t.set_uniform_scale(3.0);
        assert_eq!(t.scale(), Vec3::splat(3.0));
        t.set_scale_x(-1.0);
        t.set_scale_y(0.0);
        t.set_scale_z(4.0);
        assert_eq!(t.scale(), Vec3::new(-1.0, 0.0, 4.0));
        t.reset_scale();
        assert_eq!(t.scale(), Vec3::ONE);
    }

    #[test]
    fn reset_restores_identity_trs() {
        let mut t = sample();
        t.reset();
        assert_eq!(t.translation(), Vec3::ZERO);
        assert_eq!(t.rotation(), Vec3::ZERO);
        assert_eq!(t.scale(), Vec3::ONE);
        assert_eq!(t.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn cache_never_serves_stale_matrix() {
        let mut t = sample();
        let before = t.matrix();
        // Second read hits the cache.
        assert_eq!(t.matrix(), before);

        t.add_rotation_yaw(0.1);
        let after = t.matrix();
        assert!(!after.abs_diff_eq(before, 1e-4));

        let fresh = Transform::from_trs(t.translation(), t.rotation(), t.scale());
        assert_eq!(after, fresh.matrix());
    }

    #[test]
    fn cached_and_uncached_agree_after_every_mutator() {
        let mut t = Transform::new();
        let _ = t.matrix();
        let steps: [fn(&mut Transform); 6] = [
            |t| t.set_translation_z(4.0),
            |t| t.set_rotation_roll(0.2),
            |t| t.set_scale_y(3.0),
            |t| t.add_translation(Vec3::X),
            |t| t.set_application_order(TransformApplicationOrder::ScaleTranslationRotation),
            |t| t.reset_pitch(),
        ];
        for step in steps {
            step(&mut t);
            let expected = t.application_order().compose(
                t.translation_matrix(),
                t.rotation_matrix(),
                t.scale_matrix(),
            );
            assert_eq!(t.matrix(), expected);
        }
    }

    #[test]
    fn order_changes_the_matrix() {
        let translation = Vec3::new(1.0, 0.0, 0.0);
        let rotation = Vec3::new(0.0, 0.25, 0.0);
        let scale = Vec3::new(2.0, 1.0, 1.0);
        let rotate_last = Transform::with_order(
            translation,
            rotation,
            scale,
            TransformApplicationOrder::ScaleTranslationRotation,
        );
        let translate_last = Transform::with_order(
            translation,
            rotation,
            scale,
            TransformApplicationOrder::ScaleRotationTranslation,
        );
        assert!(!rotate_last.matrix().abs_diff_eq(translate_last.matrix(), 1e-3));
        // T * R * S keeps the translation column as-is.
        assert!(translate_last.matrix().w_axis.truncate().abs_diff_eq(translation, 1e-6));
        // R * T * S swings it around with the yaw.
        assert!(rotate_last.matrix().w_axis.truncate().abs_diff_eq(Vec3::NEG_Z, 1e-6));
    }

    #[test]
    fn override_takes_precedence_until_cleared() {
        let mut t = sample();
        let mut shear = Mat4::IDENTITY;
        shear.y_axis.x = 0.3;

        t.set_matrix_override(shear);
        t.set_translation(Vec3::new(9.0, 9.0, 9.0));
        t.add_rotation_yaw(0.2);
        assert_eq!(t.matrix(), shear);
        assert_eq!(t.matrix_override(), Some(shear));

        t.clear_matrix_override();
        let expected = Transform::from_trs(t.translation(), t.rotation(), t.scale()).matrix();
        assert_eq!(t.matrix(), expected);
    }

    #[test]
    fn override_set_before_first_read_does_not_stick() {
        let mut t = sample();
        t.set_matrix_override(Mat4::from_translation(Vec3::splat(5.0)));
        let _ = t.matrix();
        t.clear_matrix_override();
        assert_eq!(t.matrix(), sample().matrix());
    }

    #[test]
    fn round_trip_through_matrix() {
        let cases = [
            (
                Vec3::new(1.0, 2.0, 3.0),
                Vec3::new(0.1, -0.2, 0.15),
                Vec3::new(1.0, 2.0, 0.5),
            ),
            (
                Vec3::new(-7.5, 0.0, 12.0),
                Vec3::new(-0.24, 0.2, -0.1),
                Vec3::new(3.0, 3.0, 3.0),
            ),
            (Vec3::ZERO, Vec3::new(0.0, 0.0, 0.24), Vec3::new(0.1, 5.0, 1.0)),
        ];
        for order in [
            TransformApplicationOrder::ScaleRotationTranslation,
            TransformApplicationOrder::ScaleTranslationRotation,
        ] {
            for (translation, rotation, scale) in cases {
                let source = Transform::with_order(translation, rotation, scale, order);
                let mut target = Transform::with_order(Vec3::ZERO, Vec3::ZERO, Vec3::ONE, order);
                target.set_transform_matrix(&source.matrix()).unwrap();

                assert!(target.translation().abs_diff_eq(translation, 1e-4));
                assert!(target.scale().abs_diff_eq(scale, 1e-4));
                assert!(target.rotation().abs_diff_eq(rotation, 1e-4));
                assert!(target.matrix().abs_diff_eq(source.matrix(), 1e-4));
            }
        }
    }

    #[test]
    fn set_transform_matrix_replaces_active_override() {
        let mut t = sample();
        let mut shear = Mat4::IDENTITY;
        shear.y_axis.x = 0.3;
        t.set_matrix_override(shear);

        let target = Transform::from_trs(Vec3::new(0.0, 4.0, 1.0), Vec3::new(0.0, 0.1, 0.0), Vec3::ONE);
        t.set_transform_matrix(&target.matrix()).unwrap();

        assert_eq!(t.matrix_override(), None);
        assert!(t.matrix().abs_diff_eq(target.matrix(), 1e-5));
    }

    #[test]
    fn rejected_matrix_keeps_override() {
        let mut t = sample();
        t.set_matrix_override(Mat4::from_translation(Vec3::X));
        let mut projective = Mat4::IDENTITY;
        projective.x_axis.w = 0.5;

        assert!(t.set_transform_matrix(&projective).is_err());
        assert_eq!(t.matrix_override(), Some(Mat4::from_translation(Vec3::X)));
    }

    #[test]
    fn rejected_matrix_leaves_state_unchanged() {
        let mut t = sample();
        let before = t.clone();
        let mut projective = Mat4::IDENTITY;
        projective.z_axis.w = 0.001;

        let err = t.set_transform_matrix(&projective).unwrap_err();
        assert!(matches!(err, TransformError::NonAffineBottomRow { .. }));
        assert_eq!(t, before);
        assert_eq!(t.matrix(), before.matrix());
    }

    #[test]
    fn inverse_negates_and_reciprocates() {
        let t = Transform::with_order(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(0.1, 0.0, 0.0),
            Vec3::new(2.0, 2.0, 2.0),
            TransformApplicationOrder::ScaleTranslationRotation,
        );
        let inv = t.inverse_transform();
        assert_eq!(inv.translation(), Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(inv.rotation(), Vec3::new(-0.1, 0.0, 0.0));
        assert_eq!(inv.scale(), Vec3::new(0.5, 0.5, 0.5));
        assert_eq!(inv.application_order(), t.application_order());
    }

    #[test]
    fn checked_inverse_reports_zero_axis() {
        let mut t = Transform::new();
        t.set_scale_y(0.0);
        assert_eq!(
            t.checked_inverse_transform(),
            Err(TransformError::ZeroScale { axis: 1 })
        );
        assert!(Transform::new().checked_inverse_transform().is_ok());
    }

    #[test]
    fn direction_vectors_are_orthonormal() {
        let rotations = [
            Vec3::ZERO,
            Vec3::new(0.1, 0.2, 0.0),
            Vec3::new(-0.2, 0.7, 0.3),
            Vec3::new(0.24, -0.4, 0.9),
            Vec3::new(-0.13, 1.6, 0.0),
        ];
        for rotation in rotations {
            let t = Transform::from_trs(Vec3::ZERO, rotation, Vec3::ONE);
            let forward = t.compute_forward_vector();
            let right = t.compute_right_vector();
            let up = t.compute_up_vector();

            assert_abs_diff_eq!(forward.length(), 1.0, epsilon = 1e-5);
            assert_abs_diff_eq!(right.length(), 1.0, epsilon = 1e-5);
            assert_abs_diff_eq!(up.length(), 1.0, epsilon = 1e-5);
            assert_abs_diff_eq!(forward.dot(right), 0.0, epsilon = 1e-5);
            assert_abs_diff_eq!(forward.dot(up), 0.0, epsilon = 1e-5);
            assert_abs_diff_eq!(right.dot(up), 0.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn forward_vector_formula() {
        let t = Transform::from_trs(Vec3::ZERO, Vec3::ZERO, Vec3::ONE);
        assert!(t.compute_forward_vector().abs_diff_eq(Vec3::X, 1e-6));

        let t = Transform::from_trs(Vec3::ZERO, Vec3::new(0.0, 0.25, 0.0), Vec3::ONE);
        assert!(t.compute_forward_vector().abs_diff_eq(Vec3::Z, 1e-6));
    }

    #[test]
    fn xz_forward_ignores_pitch() {
        let t = Transform::from_trs(Vec3::ZERO, Vec3::new(0.2, 0.125, 0.0), Vec3::ONE);
        let xz = t.compute_xz_forward_vector();
        assert_eq!(xz.y, 0.0);
        assert_abs_diff_eq!(xz.length(), 1.0, epsilon = 1e-6);
        let planar = t.compute_xz_forward_vector_r2();
        assert!(planar.abs_diff_eq(Vec2::new(xz.x, xz.z), 1e-6));
    }

    #[test]
    fn chain_composes_translations() {
        let mut parent = Transform::from_trs(Vec3::X, Vec3::ZERO, Vec3::ONE);
        parent.set_child(Transform::from_trs(Vec3::Y, Vec3::ZERO, Vec3::ONE));
        let full = parent.full_matrix();
        assert!(full.w_axis.truncate().abs_diff_eq(Vec3::new(1.0, 1.0, 0.0), 1e-6));
        assert_eq!(parent.chain_len(), 2);
        // Without a child the full matrix is the node's own.
        assert_eq!(Transform::new().full_matrix(), Transform::new().matrix());
    }

    #[test]
    fn chain_is_ordered_parent_first() {
        let mut root = Transform::from_trs(Vec3::ZERO, Vec3::new(0.0, 0.25, 0.0), Vec3::ONE);
        let mut mid = Transform::from_trs(Vec3::X, Vec3::ZERO, Vec3::ONE);
        mid.set_child(Transform::from_trs(Vec3::ZERO, Vec3::ZERO, Vec3::splat(2.0)));
        root.set_child(mid);

        let expected = root.matrix()
            * root.child().unwrap().matrix()
            * root.child().unwrap().child().unwrap().matrix();
        assert!(root.full_matrix().abs_diff_eq(expected, 1e-6));
        assert_eq!(root.chain_len(), 3);
    }

    #[test]
    fn clone_deep_copies_chain() {
        let mut original = Transform::new();
        original.set_child(Transform::from_trs(Vec3::Y, Vec3::ZERO, Vec3::ONE));

        let mut copy = original.clone();
        copy.child_mut().unwrap().set_translation(Vec3::new(5.0, 5.0, 5.0));

        assert_eq!(original.child().unwrap().translation(), Vec3::Y);
        assert_eq!(copy.child().unwrap().translation(), Vec3::splat(5.0));
    }

    #[test]
    fn set_child_replaces_and_take_child_detaches() {
        let mut parent = Transform::new();
        parent.set_child(Transform::from_trs(Vec3::X, Vec3::ZERO, Vec3::ONE));
        parent.set_child(Transform::from_trs(Vec3::Z, Vec3::ZERO, Vec3::ONE));
        assert_eq!(parent.chain_len(), 2);

        let child = parent.take_child().unwrap();
        assert_eq!(child.translation(), Vec3::Z);
        assert!(parent.child().is_none());

        parent.set_child(child);
        parent.clear_child();
        assert_eq!(parent.chain_len(), 1);
    }

    #[test]
    fn display_lists_trs() {
        let t = Transform::from_trs(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(0.25, 0.0, 0.5),
            Vec3::new(1.0, 1.0, 2.0),
        );
        assert_eq!(
            t.to_string(),
            "Position: (1, 2, 3)\nRotation: (0.25, 0, 0.5)\nScale: (1, 1, 2)\n"
        );
    }
}
