//! Error types for mesh construction and hierarchy building.

use thiserror::Error;

/// Errors raised while assembling geometry or building an acceleration structure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccelError {
    /// A hierarchy was requested over zero primitives.
    #[error("cannot build an acceleration structure over an empty scene")]
    EmptyScene,

    /// The primitive index permutation is stored as u32.
    #[error("scene has {count} primitives, at most {max} are supported")]
    TooManyPrimitives { count: usize, max: usize },

    #[error("index buffer length {0} is not a multiple of 3")]
    IndexCountNotTriangles(usize),

    #[error("vertex index {index} out of range for mesh with {n_vertices} vertices")]
    VertexIndexOutOfRange { index: u32, n_vertices: usize },

    #[error("mesh has {positions} positions but {normals} normals")]
    NormalCountMismatch { positions: usize, normals: usize },
}

/// Result type for geometry and acceleration operations.
pub type Result<T> = std::result::Result<T, AccelError>;
