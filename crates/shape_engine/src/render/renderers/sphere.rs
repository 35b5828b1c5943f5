use super::gpu_mesh::GpuMesh;
use crate::foundation::math::{Color, Mat4, Vec3};
use crate::geometry::{Aabb, GeometryError, GeometryResult, Sphere};
use crate::render::mesh::{
    check_finite, check_non_negative, sphere_vertices, DEFAULT_SPHERE_SECTORS,
    DEFAULT_SPHERE_STACKS,
};
use crate::render::{FillMode, RenderBackend, RenderResult, ShaderHandle, Topology};

/// Solid UV-sphere renderer
///
/// Wireframe mode draws the same triangle mesh with a line fill mode.
#[derive(Debug)]
pub struct SphereRenderer {
    center: Vec3,
    radius: f32,
    sectors: u32,
    stacks: u32,
    color: Color,
    wireframe: bool,
    mesh: GpuMesh,
}

impl SphereRenderer {
    /// Create a sphere at the default resolution
    pub fn new(center: Vec3, radius: f32, color: Color) -> GeometryResult<Self> {
        let mut renderer = Self {
            center: Vec3::zeros(),
            radius: 1.0,
            sectors: DEFAULT_SPHERE_SECTORS,
            stacks: DEFAULT_SPHERE_STACKS,
            color,
            wireframe: false,
            mesh: GpuMesh::new(),
        };
        renderer.set_center(center)?;
        renderer.set_radius(radius)?;
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
        let (center, radius, sectors, stacks, color) =
            (self.center, self.radius, self.sectors, self.stacks, self.color);
        self.mesh.draw(
            backend,
            "Sphere",
            move || sphere_vertices(center, radius, sectors, stacks, color),
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

    /// Bounding sphere in local space
    pub fn sphere(&self) -> Sphere {
        Sphere {
            center: self.center,
            radius: self.radius,
        }
    }

    /// Move the sphere within its local space
    pub fn set_center(&mut self, center: Vec3) -> GeometryResult<()> {
        check_finite(&center, "sphere center")?;
        self.center = center;
        self.mesh.mark_dirty();
        Ok(())
    }

    /// Current radius
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Change the radius
    pub fn set_radius(&mut self, radius: f32) -> GeometryResult<()> {
        check_non_negative(radius, "sphere radius")?;
        self.radius = radius;
        self.mesh.mark_dirty();
        Ok(())
    }

    /// `(sectors, stacks)`
    pub fn resolution(&self) -> (u32, u32) {
        (self.sectors, self.stacks)
    }

    /// Change the tessellation; needs at least 3 sectors and 2 stacks
    pub fn set_resolution(&mut self, sectors: u32, stacks: u32) -> GeometryResult<()> {
        if sectors < 3 || stacks < 2 {
            return Err(GeometryError::InvalidInput(format!(
                "sphere needs at least 3 sectors and 2 stacks, got {sectors}x{stacks}"
            )));
        }
        self.sectors = sectors;
        self.stacks = stacks;
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

    /// Local-space bounds
    pub fn local_bounds(&self) -> Aabb {
        self.sphere().to_aabb()
    }
}
