//! Error taxonomy for matrix decomposition and checked inversion.

use glam::Vec4;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TransformError {
    /// Bottom row is not (0, 0, 0, 1): the matrix carries a projection.
    #[error("matrix bottom row {row} is not (0, 0, 0, 1)")]
    NonAffineBottomRow { row: Vec4 },

    #[error("matrix has a perspective component of magnitude {magnitude}")]
    PerspectiveComponent { magnitude: f32 },

    /// Homogeneous scale or one of the basis axes collapsed to zero length.
    #[error("matrix is degenerate and cannot be decomposed")]
    DegenerateMatrix,

    #[error("cannot invert a transform with zero scale on axis {axis}")]
    ZeroScale { axis: usize },
}

pub type TransformResult<T> = Result<T, TransformError>;
