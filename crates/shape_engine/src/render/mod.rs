//! # Rendering
//!
//! Everything between shape parameters and pixels:
//!
//! - [`mesh`]: pure vertex builders for cubes, spheres, planes, triangles and rays
//! - [`renderers`]: per-shape wrappers that own a lazily uploaded vertex buffer
//! - [`api`]: the [`RenderBackend`] boundary and its handle types
//! - [`backends`]: a recording headless backend and an OpenGL backend
//! - [`camera`], [`lighting`], [`shader`]: the per-frame inputs of the single forward pass
//!
//! There is exactly one shader program per run. Renderers share it by handle
//! and never own it.

pub mod api;
pub mod backends;
pub mod camera;
pub mod lighting;
pub mod mesh;
pub mod renderers;
pub mod shader;
mod vertex;

pub use api::{
    BackendResult, BufferHandle, DrawCall, FillMode, RenderBackend, ShaderHandle, Topology,
};
pub use camera::{Camera, CameraController};
pub use lighting::LightingUniform;
pub use renderers::{
    CubeRenderer, PlaneRenderer, PrimitiveRenderer, RayRenderer, SphereRenderer,
    TriangleRenderer,
};
pub use shader::{ShaderError, ShaderSource};
pub use vertex::Vertex;

use crate::geometry::GeometryError;
use thiserror::Error;

/// Rendering errors
///
/// Backend failures are reported as strings so the high-level API does not
/// leak OpenGL types.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Shape parameters could not be turned into a mesh
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// A renderer was drawn before `initialize` gave it a shader
    #[error("{0} renderer used before initialize()")]
    NotInitialized(&'static str),

    /// Resource creation or management failed
    #[error("Resource creation failed: {0}")]
    ResourceCreationFailed(String),

    /// Backend-specific error occurred
    #[error("Backend error: {0}")]
    BackendError(String),

    /// Shader text could not be loaded
    #[error(transparent)]
    Shader(#[from] ShaderError),
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;
