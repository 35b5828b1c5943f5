//! In-memory recording backend

use crate::render::{
    BackendResult, BufferHandle, DrawCall, LightingUniform, RenderBackend, RenderError,
    ShaderHandle, ShaderSource, Topology, Vertex,
};
use std::collections::HashMap;

/// Counters accumulated over the backend's lifetime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeadlessStats {
    /// Shader programs created
    pub shaders_created: usize,
    /// Vertex buffers created
    pub buffers_created: usize,
    /// In-place buffer updates
    pub buffers_updated: usize,
    /// Vertex buffers destroyed
    pub buffers_destroyed: usize,
    /// Draw calls accepted
    pub draw_calls: usize,
    /// Completed frames
    pub frames: usize,
}

/// Backend that records instead of rendering
///
/// Draws are validated the way a real backend would fail: unknown handles
/// and vertex counts past the end of the buffer are errors.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    next_handle: u64,
    shaders: HashMap<ShaderHandle, String>,
    buffers: HashMap<BufferHandle, Vec<Vertex>>,
    draws: Vec<DrawCall>,
    lighting: Option<LightingUniform>,
    clear_color: [f32; 4],
    size: (u32, u32),
    stats: HeadlessStats,
}

impl HeadlessBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_handle(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }

    /// Draws recorded since the last `begin_frame`
    pub fn draws(&self) -> &[DrawCall] {
        &self.draws
    }

    /// Recorded draws using the given topology
    pub fn draws_with_topology(&self, topology: Topology) -> impl Iterator<Item = &DrawCall> {
        self.draws.iter().filter(move |d| d.topology == topology)
    }

    /// Lifetime counters
    pub fn stats(&self) -> HeadlessStats {
        self.stats
    }

    /// Contents of a live buffer
    pub fn buffer(&self, handle: BufferHandle) -> Option<&[Vertex]> {
        self.buffers.get(&handle).map(Vec::as_slice)
    }

    /// Number of buffers not yet destroyed
    pub fn live_buffers(&self) -> usize {
        self.buffers.len()
    }

    /// Number of shader programs not yet destroyed
    pub fn live_shaders(&self) -> usize {
        self.shaders.len()
    }

    /// Lighting most recently set
    pub fn lighting(&self) -> Option<&LightingUniform> {
        self.lighting.as_ref()
    }

    /// Clear color of the current frame
    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    /// Size from the last `resize`
    pub fn size(&self) -> (u32, u32) {
        self.size
    }
}

impl RenderBackend for HeadlessBackend {
    fn begin_frame(&mut self, clear_color: [f32; 4]) -> BackendResult<()> {
        self.draws.clear();
        self.clear_color = clear_color;
        Ok(())
    }

    fn create_shader(&mut self, name: &str, _source: &ShaderSource) -> BackendResult<ShaderHandle> {
        let handle = ShaderHandle(self.allocate_handle());
        self.shaders.insert(handle, name.to_string());
        self.stats.shaders_created += 1;
        log::debug!("Headless shader '{name}' created as {handle:?}");
        Ok(handle)
    }

    fn destroy_shader(&mut self, shader: ShaderHandle) {
        if self.shaders.remove(&shader).is_none() {
            log::warn!("Destroying unknown shader {shader:?}");
        }
    }

    fn create_vertex_buffer(&mut self, vertices: &[Vertex]) -> BackendResult<BufferHandle> {
        let handle = BufferHandle(self.allocate_handle());
        self.buffers.insert(handle, vertices.to_vec());
        self.stats.buffers_created += 1;
        log::debug!("Headless buffer {handle:?} created with {} vertices", vertices.len());
        Ok(handle)
    }

    fn update_vertex_buffer(&mut self, buffer: BufferHandle, vertices: &[Vertex]) -> BackendResult<()> {
        let stored = self.buffers.get_mut(&buffer).ok_or_else(|| {
            RenderError::BackendError(format!("update of unknown buffer {buffer:?}"))
        })?;
        stored.clear();
        stored.extend_from_slice(vertices);
        self.stats.buffers_updated += 1;
        Ok(())
    }

    fn destroy_vertex_buffer(&mut self, buffer: BufferHandle) {
        if self.buffers.remove(&buffer).is_some() {
            self.stats.buffers_destroyed += 1;
        } else {
            log::warn!("Destroying unknown buffer {buffer:?}");
        }
    }

    fn set_lighting(&mut self, lighting: &LightingUniform) {
        self.lighting = Some(*lighting);
    }

    fn draw(&mut self, call: &DrawCall) -> BackendResult<()> {
        if !self.shaders.contains_key(&call.shader) {
            return Err(RenderError::BackendError(format!(
                "draw with unknown shader {:?}",
                call.shader
            )));
        }
        let stored = self.buffers.get(&call.buffer).ok_or_else(|| {
            RenderError::BackendError(format!("draw with unknown buffer {:?}", call.buffer))
        })?;
        if call.vertex_count as usize > stored.len() {
            return Err(RenderError::BackendError(format!(
                "draw of {} vertices from a buffer holding {}",
                call.vertex_count,
                stored.len()
            )));
        }

        self.draws.push(call.clone());
        self.stats.draw_calls += 1;
        Ok(())
    }

    fn end_frame(&mut self) -> BackendResult<()> {
        self.stats.frames += 1;
        log::trace!("Headless frame {} recorded {} draws", self.stats.frames, self.draws.len());
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }
}
