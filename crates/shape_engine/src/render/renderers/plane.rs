use super::gpu_mesh::GpuMesh;
use crate::foundation::math::{Color, Mat4, Vec3};
use crate::geometry::{normalize_checked, Aabb, GeometryError, GeometryResult};
use crate::render::mesh::{check_non_negative, plane_basis, plane_vertices};
use crate::render::{FillMode, RenderBackend, RenderResult, ShaderHandle, Topology};

/// Finite square patch of a plane
#[derive(Debug)]
pub struct PlaneRenderer {
    normal: Vec3,
    distance: f32,
    size: f32,
    color: Color,
    wireframe: bool,
    mesh: GpuMesh,
}

impl PlaneRenderer {
    /// Create a square of side `size` on the plane `p·normal = distance`
    pub fn new(normal: Vec3, distance: f32, size: f32, color: Color) -> GeometryResult<Self> {
        let mut renderer = Self {
            normal: Vec3::y(),
            distance: 0.0,
            size: 1.0,
            color,
            wireframe: false,
            mesh: GpuMesh::new(),
        };
        renderer.set_normal(normal)?;
        renderer.set_distance(distance)?;
        renderer.set_size(size)?;
        Ok(renderer)
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
        let (normal, distance, size, color) = (self.normal, self.distance, self.size, self.color);
        self.mesh.draw(
            backend,
            "Plane",
            move || plane_vertices(normal, distance, size, color),
            Topology::Triangles,
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

    /// Unit normal
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Change the normal; it is normalized and must not be zero
    pub fn set_normal(&mut self, normal: Vec3) -> GeometryResult<()> {
        self.normal = normalize_checked(&normal, "plane normal")?;
        self.mesh.mark_dirty();
        Ok(())
    }

    /// Signed distance of the plane from the origin
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Move the plane along its normal
    pub fn set_distance(&mut self, distance: f32) -> GeometryResult<()> {
        if !distance.is_finite() {
            return Err(GeometryError::InvalidInput(format!(
                "plane distance must be finite, got {distance}"
            )));
        }
        self.distance = distance;
        self.mesh.mark_dirty();
        Ok(())
    }

    /// Side length of the square
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Change the side length
    pub fn set_size(&mut self, size: f32) -> GeometryResult<()> {
        check_non_negative(size, "plane size")?;
        self.size = size;
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

    /// Whether polygons are drawn as outlines
    pub fn is_wireframe(&self) -> bool {
        self.wireframe
    }

    /// Toggle outline drawing without touching the mesh
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

    /// Local-space bounds of the square (flat along the normal)
    pub fn local_bounds(&self) -> Aabb {
        let center = self.normal * self.distance;
        let Ok((_, tangent, bitangent)) = plane_basis(&self.normal) else {
            return Aabb::new(center, center);
        };
        let half = self.size * 0.5;
        let corners = [
            center - tangent * half - bitangent * half,
            center + tangent * half - bitangent * half,
            center + tangent * half + bitangent * half,
            center - tangent * half + bitangent * half,
        ];
        Aabb::from_points(&corners).unwrap_or_else(|| Aabb::new(center, center))
    }
}
