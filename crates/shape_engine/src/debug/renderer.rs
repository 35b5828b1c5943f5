//! Line-list renderer for debug shapes

use super::{DebugDrawSystem, DebugPrimitive, DebugShape};
use crate::foundation::math::Mat4;
use crate::render::mesh::{
    box_edge_vertices, line_vertices, ray_vertices, sphere_line_vertices, DEFAULT_CIRCLE_SEGMENTS,
};
use crate::render::{
    BufferHandle, DrawCall, FillMode, RenderBackend, RenderError, RenderResult, ShaderHandle,
    Topology, Vertex,
};

/// Draws every queued debug shape with one line-list draw call
///
/// The vertex buffer is created on first use and rewritten each frame.
#[derive(Debug)]
pub struct DebugRenderer {
    buffer: Option<BufferHandle>,
    vertices: Vec<Vertex>,
    circle_segments: u32,
}

impl Default for DebugRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_CIRCLE_SEGMENTS)
    }
}

impl DebugRenderer {
    /// Renderer drawing spheres with `circle_segments` per great circle
    pub fn new(circle_segments: u32) -> Self {
        Self {
            buffer: None,
            vertices: Vec::new(),
            circle_segments: circle_segments.max(3),
        }
    }

    /// Vertices produced for the last frame
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn append_shape(&mut self, shape: &DebugShape) {
        let color = shape.color;
        match &shape.primitive {
            DebugPrimitive::Line { start, end } => {
                self.vertices.extend_from_slice(&line_vertices(*start, *end, color));
            }
            DebugPrimitive::Aabb(aabb) => {
                self.vertices.extend(box_edge_vertices(&aabb.corners(), color));
            }
            DebugPrimitive::Obb(obb) => {
                self.vertices.extend(box_edge_vertices(&obb.corners(), color));
            }
            DebugPrimitive::Sphere(sphere) => {
                match sphere_line_vertices(sphere.center, sphere.radius, self.circle_segments, color) {
                    Ok(lines) => self.vertices.extend(lines),
                    Err(e) => log::warn!("Skipping debug sphere: {e}"),
                }
            }
            DebugPrimitive::Ray(ray) => self.vertices.extend(ray_vertices(ray, color)),
        }
    }

    /// Stream the current shapes and draw them
    ///
    /// Issues no draw call when there is nothing to show.
    pub fn render(
        &mut self,
        debug: &DebugDrawSystem,
        backend: &mut dyn RenderBackend,
        shader: ShaderHandle,
        view: &Mat4,
        projection: &Mat4,
    ) -> RenderResult<()> {
        self.vertices.clear();
        for shape in debug.shapes() {
            self.append_shape(shape);
        }
        if self.vertices.is_empty() {
            return Ok(());
        }

        let buffer = match self.buffer {
            Some(buffer) => {
                backend.update_vertex_buffer(buffer, &self.vertices)?;
                buffer
            }
            None => {
                let buffer = backend.create_vertex_buffer(&self.vertices)?;
                self.buffer = Some(buffer);
                buffer
            }
        };
        let vertex_count = u32::try_from(self.vertices.len())
            .map_err(|_| RenderError::ResourceCreationFailed("debug line list too large".into()))?;

        log::trace!("Debug renderer drawing {vertex_count} line vertices");
        backend.draw(&DrawCall {
            shader,
            buffer,
            vertex_count,
            topology: Topology::Lines,
            fill_mode: FillMode::Solid,
            unlit: true,
            model: Mat4::identity(),
            view: *view,
            projection: *projection,
        })
    }

    /// Release the line buffer
    pub fn cleanup(&mut self, backend: &mut dyn RenderBackend) {
        if let Some(buffer) = self.buffer.take() {
            backend.destroy_vertex_buffer(buffer);
        }
        self.vertices.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::geometry::{Aabb, Obb, Ray, Sphere};
    use crate::render::backends::HeadlessBackend;
    use crate::render::ShaderSource;

    fn setup() -> (HeadlessBackend, ShaderHandle) {
        let mut backend = HeadlessBackend::new();
        let shader = backend.create_shader("debug", &ShaderSource::builtin()).unwrap();
        (backend, shader)
    }

    #[test]
    fn test_all_shapes_in_one_draw() {
        let (mut backend, shader) = setup();
        let mut debug = DebugDrawSystem::new();
        debug.draw_line(Vec3::zeros(), Vec3::x(), Vec3::x(), 0.0);
        debug.draw_aabb(Aabb::new(Vec3::zeros(), Vec3::repeat(1.0)), Vec3::y(), 0.0);
        debug.draw_obb(Obb::default(), Vec3::y(), 0.0);
        debug.draw_sphere(Sphere::new(Vec3::zeros(), 1.0).unwrap(), Vec3::z(), 0.0);
        debug.draw_ray(Ray::new(Vec3::zeros(), Vec3::y(), 2.0).unwrap(), Vec3::z(), 0.0);

        let mut renderer = DebugRenderer::new(16);
        renderer
            .render(&debug, &mut backend, shader, &Mat4::identity(), &Mat4::identity())
            .unwrap();

        let expected = 2 + 24 + 24 + 3 * 16 * 2 + 2;
        assert_eq!(renderer.vertex_count(), expected);
        assert_eq!(backend.draws().len(), 1);
        let call = &backend.draws()[0];
        assert_eq!(call.topology, Topology::Lines);
        assert!(call.unlit);
        assert_eq!(call.vertex_count as usize, expected);
    }

    #[test]
    fn test_buffer_reused_across_frames() {
        let (mut backend, shader) = setup();
        let mut debug = DebugDrawSystem::new();
        let mut renderer = DebugRenderer::default();

        for _ in 0..3 {
            debug.update(0.016);
            debug.draw_line(Vec3::zeros(), Vec3::x(), Vec3::x(), 0.0);
            renderer
                .render(&debug, &mut backend, shader, &Mat4::identity(), &Mat4::identity())
                .unwrap();
        }

        assert_eq!(backend.stats().buffers_created, 1);
        assert_eq!(backend.stats().buffers_updated, 2);

        renderer.cleanup(&mut backend);
        renderer.cleanup(&mut backend);
        assert_eq!(backend.live_buffers(), 0);
    }

    #[test]
    fn test_nothing_queued_means_no_draw() {
        let (mut backend, shader) = setup();
        let mut renderer = DebugRenderer::default();
        renderer
            .render(&DebugDrawSystem::new(), &mut backend, shader, &Mat4::identity(), &Mat4::identity())
            .unwrap();
        assert!(backend.draws().is_empty());
        assert_eq!(backend.live_buffers(), 0);
    }
}
