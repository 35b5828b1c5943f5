//! Lazily uploaded vertex buffer shared by all renderer wrappers

use crate::foundation::math::Mat4;
use crate::geometry::GeometryResult;
use crate::render::{
    BufferHandle, DrawCall, FillMode, RenderBackend, RenderError, RenderResult, ShaderHandle,
    Topology, Vertex,
};

/// CPU copy of a mesh plus the backend buffer mirroring it
///
/// The vertex list is rebuilt only when marked dirty. The first upload
/// creates the buffer; later uploads update it in place.
#[derive(Debug, Default)]
pub(crate) struct GpuMesh {
    shader: Option<ShaderHandle>,
    buffer: Option<BufferHandle>,
    vertices: Vec<Vertex>,
    dirty: bool,
}

impl GpuMesh {
    pub fn new() -> Self {
        Self {
            dirty: true,
            ..Self::default()
        }
    }

    pub fn initialize(&mut self, shader: ShaderHandle) {
        self.shader = Some(shader);
        self.dirty = true;
    }

    pub fn is_initialized(&self) -> bool {
        self.shader.is_some()
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Rebuild if needed, upload if needed, then issue one draw
    pub fn draw<F>(
        &mut self,
        backend: &mut dyn RenderBackend,
        kind: &'static str,
        rebuild: F,
        topology: Topology,
        fill_mode: FillMode,
        model: &Mat4,
        view: &Mat4,
        projection: &Mat4,
    ) -> RenderResult<()>
    where
        F: FnOnce() -> GeometryResult<Vec<Vertex>>,
    {
        let shader = self.shader.ok_or(RenderError::NotInitialized(kind))?;

        if self.dirty {
            self.vertices = rebuild()?;
            match self.buffer {
                Some(buffer) => backend.update_vertex_buffer(buffer, &self.vertices)?,
                None => self.buffer = Some(backend.create_vertex_buffer(&self.vertices)?),
            }
            log::debug!("{kind} mesh uploaded ({} vertices)", self.vertices.len());
            self.dirty = false;
        }

        let buffer = self
            .buffer
            .ok_or_else(|| RenderError::ResourceCreationFailed(format!("{kind} buffer missing")))?;
        let vertex_count = u32::try_from(self.vertices.len())
            .map_err(|_| RenderError::ResourceCreationFailed(format!("{kind} mesh too large")))?;

        backend.draw(&DrawCall {
            shader,
            buffer,
            vertex_count,
            topology,
            fill_mode,
            unlit: topology == Topology::Lines,
            model: *model,
            view: *view,
            projection: *projection,
        })
    }

    /// Release the buffer; the next draw recreates it
    pub fn cleanup(&mut self, backend: &mut dyn RenderBackend) {
        if let Some(buffer) = self.buffer.take() {
            backend.destroy_vertex_buffer(buffer);
            self.dirty = true;
        }
    }
}
