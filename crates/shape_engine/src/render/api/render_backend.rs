//! Backend abstraction traits for the rendering system
//!
//! This module defines the trait that rendering backends implement so the
//! renderer wrappers and systems never touch a graphics API directly.

use crate::foundation::math::Mat4;
use crate::render::{LightingUniform, RenderError, ShaderSource, Vertex};

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

/// Handle to a linked shader program stored in the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u64);

/// Handle to a vertex buffer stored in the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u64);

/// How consecutive vertices are assembled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Topology {
    /// Independent triangles, 3 vertices each
    #[default]
    Triangles,
    /// Independent line segments, 2 vertices each
    Lines,
}

/// Rasterization mode for triangle topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FillMode {
    /// Filled polygons
    #[default]
    Solid,
    /// Polygon edges only; the mesh itself is unchanged
    Wireframe,
}

impl FillMode {
    /// Fill mode for a wireframe flag
    pub fn from_wireframe(wireframe: bool) -> Self {
        if wireframe {
            Self::Wireframe
        } else {
            Self::Solid
        }
    }
}

/// A single non-indexed draw
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    /// Program to draw with
    pub shader: ShaderHandle,
    /// Vertex buffer to read
    pub buffer: BufferHandle,
    /// Number of vertices to draw from the start of the buffer
    pub vertex_count: u32,
    /// Primitive assembly
    pub topology: Topology,
    /// Polygon fill mode
    pub fill_mode: FillMode,
    /// Whether lighting is skipped (debug lines)
    pub unlit: bool,
    /// Model matrix
    pub model: Mat4,
    /// View matrix
    pub view: Mat4,
    /// Projection matrix
    pub projection: Mat4,
}

/// Main rendering backend trait
///
/// Backends are driven from a single render thread and need not be `Send`.
pub trait RenderBackend {
    /// Clear the framebuffer and start a new frame
    fn begin_frame(&mut self, clear_color: [f32; 4]) -> BackendResult<()>;

    /// Compile and link a shader program
    ///
    /// Compile diagnostics are logged by the backend; a handle is returned
    /// even when compilation failed so the frame loop can continue.
    fn create_shader(&mut self, name: &str, source: &ShaderSource) -> BackendResult<ShaderHandle>;

    /// Release a shader program
    fn destroy_shader(&mut self, shader: ShaderHandle);

    /// Create a vertex buffer and upload the initial data
    fn create_vertex_buffer(&mut self, vertices: &[Vertex]) -> BackendResult<BufferHandle>;

    /// Replace the contents of an existing vertex buffer
    fn update_vertex_buffer(&mut self, buffer: BufferHandle, vertices: &[Vertex]) -> BackendResult<()>;

    /// Release a vertex buffer
    fn destroy_vertex_buffer(&mut self, buffer: BufferHandle);

    /// Set the lighting uniforms used by subsequent draws
    fn set_lighting(&mut self, lighting: &LightingUniform);

    /// Record or execute a draw
    fn draw(&mut self, call: &DrawCall) -> BackendResult<()>;

    /// Finish the frame
    fn end_frame(&mut self) -> BackendResult<()>;

    /// Framebuffer size changed
    fn resize(&mut self, width: u32, height: u32);
}
