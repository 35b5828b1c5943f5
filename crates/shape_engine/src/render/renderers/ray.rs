use super::gpu_mesh::GpuMesh;
use crate::foundation::math::{Color, Mat4, Vec3};
use crate::geometry::{Aabb, GeometryResult, Ray};
use crate::render::mesh::ray_vertices;
use crate::render::{FillMode, RenderBackend, RenderResult, ShaderHandle, Topology};

/// Line segment visualizing a ray
///
/// Drawn unlit as a single line; the wireframe flag is kept for API
/// symmetry but has no visible effect on lines.
#[derive(Debug)]
pub struct RayRenderer {
    ray: Ray,
    color: Color,
    wireframe: bool,
    mesh: GpuMesh,
}

impl RayRenderer {
    /// Create from an origin, a direction (normalized here) and a length
    pub fn new(origin: Vec3, direction: Vec3, length: f32, color: Color) -> GeometryResult<Self> {
        Ok(Self {
            ray: Ray::new(origin, direction, length)?,
            color,
            wireframe: false,
            mesh: GpuMesh::new(),
        })
    }

    /// Store the shared shader and schedule the first upload
    pub fn initialize(&mut self, shader: ShaderHandle) {
        self.mesh.initialize(shader);
    }

    /// Draw with the given matrices
    pub fn render(
        &mut self,
        backend: &mut dyn RenderBackend,
        model: &Mat4,
        view: &Mat4,
        projection: &Mat4,
    ) -> RenderResult<()> {
        let (ray, color) = (self.ray, self.color);
        self.mesh.draw(
            backend,
            "Ray",
            move || Ok(ray_vertices(&ray, color)),
            Topology::Lines,
            FillMode::from_wireframe(self.wireframe),
            model,
            view,
            projection,
        )
    }

    /// Release GPU resources
    pub fn cleanup(&mut self, backend: &mut dyn RenderBackend) {
        self.mesh.cleanup(backend);
    }

    /// The ray being drawn
    pub fn ray(&self) -> &Ray {
        &self.ray
    }

    /// Move the ray origin
    pub fn set_origin(&mut self, origin: Vec3) -> GeometryResult<()> {
        self.ray = Ray::new(origin, self.ray.direction, self.ray.length)?;
        self.mesh.mark_dirty();
        Ok(())
    }

    /// Change the direction; zero vectors are rejected
    pub fn set_direction(&mut self, direction: Vec3) -> GeometryResult<()> {
        self.ray = Ray::new(self.ray.origin, direction, self.ray.length)?;
        self.mesh.mark_dirty();
        Ok(())
    }

    /// Change the visible length
    pub fn set_length(&mut self, length: f32) -> GeometryResult<()> {
        self.ray = Ray::new(self.ray.origin, self.ray.direction, length)?;
        self.mesh.mark_dirty();
        Ok(())
    }

    /// Current color
    pub fn color(&self) -> Color {
        self.color
    }

    /// Change the color; vertex colors are baked, so this re-uploads
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        self.mesh.mark_dirty();
    }

    /// Stored wireframe flag
    pub fn is_wireframe(&self) -> bool {
        self.wireframe
    }

    /// Store the wireframe flag without touching the mesh
    pub fn set_wireframe(&mut self, wireframe: bool) {
        self.wireframe = wireframe;
    }

    /// Whether `initialize` has been called
    pub fn is_initialized(&self) -> bool {
        self.mesh.is_initialized()
    }

    /// Whether the next render rebuilds the vertices
    pub fn needs_upload(&self) -> bool {
        self.mesh.is_dirty()
    }

    /// Local-space bounds of the segment
    pub fn local_bounds(&self) -> Aabb {
        let (start, end) = (self.ray.origin, self.ray.end());
        Aabb::new(start.inf(&end), start.sup(&end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::backends::HeadlessBackend;
    use crate::render::ShaderSource;

    #[test]
    fn test_draws_unlit_line() {
        let mut backend = HeadlessBackend::new();
        let shader = backend.create_shader("test", &ShaderSource::builtin()).unwrap();
        let mut ray = RayRenderer::new(Vec3::zeros(), Vec3::x(), 5.0, Vec3::new(1.0, 1.0, 0.0)).unwrap();
        ray.initialize(shader);
        let identity = Mat4::identity();

        ray.render(&mut backend, &identity, &identity, &identity).unwrap();
        let call = &backend.draws()[0];
        assert_eq!(call.topology, Topology::Lines);
        assert_eq!(call.vertex_count, 2);
        assert!(call.unlit);

        let vertices = backend.buffer(call.buffer).unwrap();
        assert_eq!(vertices[1].position, [5.0, 0.0, 0.0]);
    }

    #[test]
    fn test_zero_direction_rejected() {
        let mut ray = RayRenderer::new(Vec3::zeros(), Vec3::x(), 5.0, Vec3::repeat(1.0)).unwrap();
        assert!(ray.set_direction(Vec3::zeros()).is_err());
        assert!(RayRenderer::new(Vec3::zeros(), Vec3::zeros(), 1.0, Vec3::repeat(1.0)).is_err());
        assert_eq!(ray.ray().direction, Vec3::x());
    }

    #[test]
    fn test_length_change_marks_dirty() {
        let mut ray = RayRenderer::new(Vec3::zeros(), Vec3::y(), 1.0, Vec3::repeat(1.0)).unwrap();
        ray.set_length(3.0).unwrap();
        assert!(ray.needs_upload());
        assert_eq!(ray.local_bounds().max, Vec3::new(0.0, 3.0, 0.0));
    }
}
