//! Spatial transforms: TRS state, cached matrices, child chains, orientation helpers.

pub use glam::{EulerRot, Mat4, Quat, Vec2, Vec3, Vec4, vec3};

pub mod angle;
pub mod decompose;
pub mod error;
pub mod orientation;
pub mod rotation;
pub mod transform;

pub use angle::{angle_between_vectors_is_within, vector_is_within_centered_sector};
pub use decompose::{DECOMPOSITION_TOLERANCE, Decomposition, decompose, matrix_is_decomposable};
pub use error::{TransformError, TransformResult};
pub use orientation::{
    WORLD_UP, change_of_basis_move_y_to_look_dir, create_billboard_transform,
    create_billboard_transform_for, create_billboard_transform_from_look,
    create_billboard_transform_with_lock_axis, create_translation_and_look_transform,
};
pub use transform::{Transform, TransformApplicationOrder};
