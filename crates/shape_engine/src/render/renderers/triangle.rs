use super::gpu_mesh::GpuMesh;
use crate::foundation::math::{Color, Mat4, Vec3};
use crate::geometry::{Aabb, GeometryResult};
use crate::render::mesh::{triangle_vertices, TriangleGeometry};
use crate::render::{FillMode, RenderBackend, RenderResult, ShaderHandle, Topology};

/// Single flat-shaded triangle
///
/// Vertices are uploaded relative to the centroid; place the owning entity
/// at [`TriangleRenderer::centroid`] to draw it where its points were given.
#[derive(Debug)]
pub struct TriangleRenderer {
    geometry: TriangleGeometry,
    color: Color,
    wireframe: bool,
    mesh: GpuMesh,
}

impl TriangleRenderer {
    /// Create from three world-space corners
    pub fn new(a: Vec3, b: Vec3, c: Vec3, color: Color) -> GeometryResult<Self> {
        Ok(Self {
            geometry: TriangleGeometry::new(a, b, c)?,
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
        let (geometry, color) = (self.geometry, self.color);
        self.mesh.draw(
            backend,
            "Triangle",
            move || Ok(triangle_vertices(&geometry, color)),
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

    /// Recentered geometry
    pub fn geometry(&self) -> &TriangleGeometry {
        &self.geometry
    }

    /// Centroid of the corners as given
    pub fn centroid(&self) -> Vec3 {
        self.geometry.centroid
    }

    /// Replace the corners; zero-area triangles are rejected
    pub fn set_points(&mut self, a: Vec3, b: Vec3, c: Vec3) -> GeometryResult<()> {
        self.geometry = TriangleGeometry::new(a, b, c)?;
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

    /// Local-space bounds around the centroid
    pub fn local_bounds(&self) -> Aabb {
        self.geometry.local_bounds()
    }
}
